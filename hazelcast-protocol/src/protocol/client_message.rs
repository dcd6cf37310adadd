//! ClientMessage type for multi-frame Hazelcast protocol messages.

use std::borrow::Cow;

use bytes::BytesMut;

use super::constants::*;
use super::frame::Frame;
use super::iterator::ForwardFrameIterator;
use crate::codec::custom::error_holder;
use crate::codec::fixed_size::{
    decode_byte, decode_int, decode_long, encode_byte, encode_int, encode_long,
};
use crate::error::{ProtocolError, Result};

/// A client message composed of one or more frames.
///
/// The first frame is the "initial frame" containing the message header
/// (type, correlation ID, and partition ID for requests and events, or the
/// backup acknowledgement count for responses) followed by the fixed-size
/// fields of the operation. Additional frames carry variable-length fields
/// in the order the operation declares them.
///
/// `retryable` and `operation_name` are client-local metadata for the
/// invocation layer and are never written to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientMessage {
    frames: Vec<Frame>,
    retryable: bool,
    operation_name: Option<Cow<'static, str>>,
}

impl ClientMessage {
    /// Creates a new empty client message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty message ready to receive frames on the sending side.
    pub fn create_for_encode() -> Self {
        Self::new()
    }

    /// Creates a client message from received frames.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// Appends a frame; order of calls is wire order.
    pub fn add(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Returns a cursor positioned at the initial frame.
    pub fn frame_iterator(&self) -> ForwardFrameIterator<'_> {
        ForwardFrameIterator::new(&self.frames)
    }

    /// Returns whether the invocation layer may resend this request.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Marks whether the invocation layer may resend this request.
    pub fn set_retryable(&mut self, retryable: bool) {
        self.retryable = retryable;
    }

    /// Returns the diagnostic operation name, e.g. `Map.Put`.
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Sets the diagnostic operation name.
    pub fn set_operation_name(&mut self, name: impl Into<Cow<'static, str>>) {
        self.operation_name = Some(name.into());
    }

    fn header_field<T>(&self, read: impl FnOnce(&[u8]) -> Result<T>) -> Option<T> {
        self.frames.first().and_then(|f| read(&f.content).ok())
    }

    fn initial_content_mut(&mut self, offset: usize, size: usize) -> Result<&mut BytesMut> {
        let content = &mut self
            .frames
            .first_mut()
            .ok_or(ProtocolError::MissingFrame("initial frame"))?
            .content;
        if content.len() < offset + size {
            return Err(ProtocolError::BufferUnderflow {
                offset,
                needed: size,
                available: content.len(),
            });
        }
        Ok(content)
    }

    /// Returns the message type from the initial frame.
    ///
    /// Returns `None` if there is no initial frame or if the frame content
    /// is too short to contain a message type field.
    pub fn message_type(&self) -> Option<i32> {
        self.header_field(|c| decode_int(c, TYPE_FIELD_OFFSET))
    }

    /// Sets the message type in the initial frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingFrame`] without an initial frame, or
    /// [`ProtocolError::BufferUnderflow`] if it is too short for the field.
    pub fn set_message_type(&mut self, message_type: i32) -> Result<()> {
        let content = self.initial_content_mut(TYPE_FIELD_OFFSET, INT_SIZE_IN_BYTES)?;
        encode_int(content, TYPE_FIELD_OFFSET, message_type);
        Ok(())
    }

    /// Returns the correlation ID from the initial frame.
    pub fn correlation_id(&self) -> Option<i64> {
        self.header_field(|c| decode_long(c, CORRELATION_ID_FIELD_OFFSET))
    }

    /// Sets the correlation ID in the initial frame.
    ///
    /// Codecs leave the correlation ID zero; the transport assigns it.
    /// Fails like [`set_message_type`](Self::set_message_type) on a missing or
    /// short initial frame.
    pub fn set_correlation_id(&mut self, correlation_id: i64) -> Result<()> {
        let content = self.initial_content_mut(CORRELATION_ID_FIELD_OFFSET, LONG_SIZE_IN_BYTES)?;
        encode_long(content, CORRELATION_ID_FIELD_OFFSET, correlation_id);
        Ok(())
    }

    /// Returns the partition ID from the initial frame of a request or event.
    pub fn partition_id(&self) -> Option<i32> {
        self.header_field(|c| decode_int(c, PARTITION_ID_FIELD_OFFSET))
    }

    /// Sets the partition ID in the initial frame of a request.
    pub fn set_partition_id(&mut self, partition_id: i32) -> Result<()> {
        let content = self.initial_content_mut(PARTITION_ID_FIELD_OFFSET, INT_SIZE_IN_BYTES)?;
        encode_int(content, PARTITION_ID_FIELD_OFFSET, partition_id);
        Ok(())
    }

    /// Returns the number of backup acknowledgements a response announces.
    pub fn number_of_backup_acks(&self) -> Option<u8> {
        self.header_field(|c| decode_byte(c, RESPONSE_BACKUP_ACKS_FIELD_OFFSET))
    }

    /// Sets the number of backup acknowledgements in a response.
    pub fn set_number_of_backup_acks(&mut self, acks: u8) -> Result<()> {
        let content =
            self.initial_content_mut(RESPONSE_BACKUP_ACKS_FIELD_OFFSET, BYTE_SIZE_IN_BYTES)?;
        encode_byte(content, RESPONSE_BACKUP_ACKS_FIELD_OFFSET, acks);
        Ok(())
    }

    /// Returns the fragmentation id carried by a fragment's leading frame.
    pub fn fragmentation_id(&self) -> Option<i64> {
        self.header_field(|c| decode_long(c, FRAGMENTATION_ID_OFFSET))
    }

    /// Checks that the message has the type a decoder was generated for.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::Remote`] with the decoded error holders when the
    ///   message is an exception response
    /// - [`ProtocolError::UnexpectedMessageType`] for any other type
    /// - [`ProtocolError::MissingFrame`] or
    ///   [`ProtocolError::BufferUnderflow`] when there is no readable header
    pub fn expect_message_type(&self, expected: i32) -> Result<()> {
        let initial = self
            .frames
            .first()
            .ok_or(ProtocolError::MissingFrame("initial frame"))?;
        let actual = decode_int(&initial.content, TYPE_FIELD_OFFSET)?;

        if actual == expected {
            Ok(())
        } else if actual == EXCEPTION_MESSAGE_TYPE {
            Err(ProtocolError::Remote(error_holder::decode_errors(self)?))
        } else {
            Err(ProtocolError::UnexpectedMessageType { expected, actual })
        }
    }

    /// Returns a reference to the initial (first) frame, if present.
    pub fn initial_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }

    /// Returns a reference to all frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns a mutable reference to all frames.
    pub fn frames_mut(&mut self) -> &mut Vec<Frame> {
        &mut self.frames
    }

    /// Consumes the message and returns its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Returns the number of frames in the message.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the message has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Calculates the total size of the message on the wire.
    pub fn wire_size(&self) -> usize {
        self.frames.iter().map(Frame::wire_size).sum()
    }

    /// Writes all frames to the destination buffer.
    ///
    /// The last frame is written with the FINAL flag set; the in-memory
    /// frames are not modified.
    pub fn write_to(&self, dst: &mut BytesMut) {
        dst.reserve(self.wire_size());
        let last = self.frames.len().saturating_sub(1);
        for (index, frame) in self.frames.iter().enumerate() {
            let flags = if index == last {
                frame.flags | IS_FINAL_FLAG
            } else {
                frame.flags
            };
            frame.write_with_flags(dst, flags);
        }
    }

    /// Returns true if this message is flagged as an event.
    pub fn is_event(&self) -> bool {
        self.frames
            .first()
            .map(Frame::is_event_frame)
            .unwrap_or(false)
    }

    /// Returns true if this message is a backup acknowledgement event.
    pub fn is_backup_event(&self) -> bool {
        self.frames
            .first()
            .map(Frame::is_backup_event_frame)
            .unwrap_or(false)
    }
}
