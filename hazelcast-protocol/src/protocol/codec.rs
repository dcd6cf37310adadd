//! Codec for framing Hazelcast client messages over a byte stream.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace};

use super::constants::*;
use super::fragment::{split_into_fragments, FragmentAssembler};
use super::frame::Frame;
use super::ClientMessage;
use crate::config::CodecConfig;
use crate::error::{ProtocolError, Result};

/// Codec for encoding and decoding Hazelcast client messages.
///
/// Implements the `tokio_util::codec::{Encoder, Decoder}` traits for use
/// with tokio's framed I/O. A message ends at the frame flagged `IS_FINAL`;
/// the encoder sets that flag and the decoder clears it again, so a decoded
/// message compares equal to the one that was encoded.
///
/// Fragmented messages are reassembled transparently. Outbound messages are
/// split when [`CodecConfig::max_fragment_size`] is set.
#[derive(Debug)]
pub struct ClientMessageCodec {
    config: CodecConfig,
    /// Frames of the sequence currently being read.
    pending_frames: Vec<Frame>,
    pending_size: usize,
    assembler: FragmentAssembler,
    next_fragment_id: i64,
}

impl ClientMessageCodec {
    /// Creates a codec with the default limits.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Creates a codec with the given limits.
    pub fn with_config(config: CodecConfig) -> Self {
        let assembler =
            FragmentAssembler::new(config.max_pending_fragments(), config.max_message_length());
        Self {
            config,
            pending_frames: Vec::new(),
            pending_size: 0,
            assembler,
            next_fragment_id: 0,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl Default for ClientMessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder<ClientMessage> for ClientMessageCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: ClientMessage, dst: &mut BytesMut) -> Result<()> {
        if item.is_empty() {
            return Err(ProtocolError::EmptyMessage);
        }
        let max_frame = self.config.max_frame_length();
        if let Some(frame) = item.frames().iter().find(|f| f.wire_size() > max_frame) {
            debug!(length = frame.wire_size(), max = max_frame, "rejecting outbound frame");
            return Err(ProtocolError::FrameTooLarge {
                length: frame.wire_size(),
                max: max_frame,
            });
        }
        if item.wire_size() > self.config.max_message_length() {
            return Err(ProtocolError::FrameTooLarge {
                length: item.wire_size(),
                max: self.config.max_message_length(),
            });
        }

        match self.config.max_fragment_size() {
            Some(max) if item.wire_size() > max => {
                let fragment_id = self.next_fragment_id;
                self.next_fragment_id = self.next_fragment_id.wrapping_add(1);
                for fragment in split_into_fragments(item, fragment_id, max) {
                    fragment.write_to(dst);
                }
            }
            _ => {
                trace!(
                    message_type = item.message_type(),
                    frames = item.frame_count(),
                    "encoding message"
                );
                item.write_to(dst);
            }
        }
        Ok(())
    }
}

impl Decoder for ClientMessageCodec {
    type Item = ClientMessage;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        loop {
            let Some(frame_length) = Frame::peek_length(src) else {
                return Ok(None);
            };
            if frame_length > self.config.max_frame_length() {
                return Err(ProtocolError::FrameTooLarge {
                    length: frame_length,
                    max: self.config.max_frame_length(),
                });
            }

            let Some(mut frame) = Frame::read_from(src)? else {
                src.reserve(frame_length.saturating_sub(src.len()));
                return Ok(None);
            };

            self.pending_size += frame.wire_size();
            if self.pending_size > self.config.max_message_length() {
                let length = self.pending_size;
                self.pending_frames.clear();
                self.pending_size = 0;
                return Err(ProtocolError::FrameTooLarge {
                    length,
                    max: self.config.max_message_length(),
                });
            }

            let is_final = frame.is_final_frame();
            frame.flags &= !IS_FINAL_FLAG;
            self.pending_frames.push(frame);
            if !is_final {
                continue;
            }

            let frames = std::mem::take(&mut self.pending_frames);
            self.pending_size = 0;
            if let Some(message) = self.assembler.accept(frames)? {
                debug!(
                    message_type = message.message_type(),
                    correlation_id = message.correlation_id(),
                    frames = message.frame_count(),
                    "decoded message"
                );
                return Ok(Some(message));
            }
        }
    }
}
