//! Splitting large messages into fragments and reassembling them.
//!
//! Each fragment is sent as its own frame sequence terminated by a final
//! frame. It starts with a fragmentation frame holding the fragment id: the
//! first fragment's frame is flagged `BEGIN_FRAGMENT`, the last one's
//! `END_FRAGMENT`, and those in between carry neither. The unsplit
//! message's frames follow, in order, spread over the fragments.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::client_message::ClientMessage;
use super::constants::*;
use super::frame::Frame;
use crate::codec::fixed_size::{decode_long, encode_long};
use crate::error::{ProtocolError, Result};

fn fragmentation_frame(fragment_id: i64) -> Frame {
    let mut frame = Frame::zeroed(LONG_SIZE_IN_BYTES, DEFAULT_FLAGS);
    encode_long(&mut frame.content, FRAGMENTATION_ID_OFFSET, fragment_id);
    frame
}

/// Splits `message` into fragments of at most `max_fragment_size` wire bytes.
///
/// Frames are never split, so a single frame larger than the limit travels
/// alone in an oversized fragment. A message that already fits is returned
/// unchanged as the only element.
pub fn split_into_fragments(
    message: ClientMessage,
    fragment_id: i64,
    max_fragment_size: usize,
) -> Vec<ClientMessage> {
    if message.frame_count() < 2 || message.wire_size() <= max_fragment_size {
        return vec![message];
    }

    let header_size = fragmentation_frame(fragment_id).wire_size();
    let mut fragments = Vec::new();
    let mut current = vec![fragmentation_frame(fragment_id)];
    let mut current_size = header_size;

    for frame in message.into_frames() {
        let size = frame.wire_size();
        if current.len() > 1 && current_size + size > max_fragment_size {
            fragments.push(std::mem::replace(
                &mut current,
                vec![fragmentation_frame(fragment_id)],
            ));
            current_size = header_size;
        }
        current.push(frame);
        current_size += size;
    }
    fragments.push(current);

    let last = fragments.len() - 1;
    for (index, frames) in fragments.iter_mut().enumerate() {
        if index == 0 {
            frames[0].add_flags(BEGIN_FRAGMENT_FLAG);
        } else if index == last {
            frames[0].add_flags(END_FRAGMENT_FLAG);
        }
    }

    debug!(fragment_id, fragments = fragments.len(), "split message into fragments");
    fragments.into_iter().map(ClientMessage::from_frames).collect()
}

#[derive(Debug, Default)]
struct PendingMessage {
    frames: Vec<Frame>,
    size: usize,
}

/// Reassembles fragmented messages received from the wire.
///
/// Fragments of different messages may interleave; they are told apart by
/// their fragment id.
#[derive(Debug)]
pub struct FragmentAssembler {
    pending: HashMap<i64, PendingMessage>,
    max_pending: usize,
    max_message_length: usize,
}

impl FragmentAssembler {
    /// Creates an assembler holding at most `max_pending` partial messages of
    /// at most `max_message_length` bytes each.
    pub fn new(max_pending: usize, max_message_length: usize) -> Self {
        Self {
            pending: HashMap::new(),
            max_pending,
            max_message_length,
        }
    }

    /// Number of messages awaiting further fragments.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Accepts one frame sequence terminated by a final frame.
    ///
    /// Returns the complete message once available. Unfragmented sequences
    /// are returned immediately. Fragments of unknown messages are dropped.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::EmptyMessage`] for an empty sequence
    /// - [`ProtocolError::BufferUnderflow`] if a fragmentation frame has no id
    /// - [`ProtocolError::MalformedFrame`] when too many messages are pending
    /// - [`ProtocolError::FrameTooLarge`] when a reassembled message exceeds
    ///   the maximum length
    pub fn accept(&mut self, frames: Vec<Frame>) -> Result<Option<ClientMessage>> {
        let first = frames.first().ok_or(ProtocolError::EmptyMessage)?;
        if first.is_unfragmented() {
            return Ok(Some(ClientMessage::from_frames(frames)));
        }

        let fragment_id = decode_long(&first.content, FRAGMENTATION_ID_OFFSET)?;
        let is_begin = first.is_begin_fragment();
        let is_end = first.is_end_fragment();
        let body: Vec<Frame> = frames.into_iter().skip(1).collect();
        let body_size: usize = body.iter().map(Frame::wire_size).sum();

        if is_begin {
            if !self.pending.contains_key(&fragment_id) && self.pending.len() >= self.max_pending {
                return Err(ProtocolError::MalformedFrame(format!(
                    "more than {} fragmented messages in flight",
                    self.max_pending
                )));
            }
            if self.pending.contains_key(&fragment_id) {
                warn!(fragment_id, "restarting fragmented message with duplicate id");
            }
            self.check_length(fragment_id, body_size)?;
            self.pending.insert(
                fragment_id,
                PendingMessage {
                    frames: body,
                    size: body_size,
                },
            );
            debug!(fragment_id, "began fragmented message");
            return Ok(None);
        }

        let Some(message) = self.pending.get_mut(&fragment_id) else {
            warn!(fragment_id, "dropping fragment of unknown message");
            return Ok(None);
        };
        let size = message.size + body_size;
        message.frames.extend(body);
        message.size = size;
        self.check_length(fragment_id, size)?;

        if is_end {
            let complete = self.pending.remove(&fragment_id).unwrap_or_default();
            debug!(fragment_id, frames = complete.frames.len(), "reassembled fragmented message");
            return Ok(Some(ClientMessage::from_frames(complete.frames)));
        }
        Ok(None)
    }

    fn check_length(&mut self, fragment_id: i64, size: usize) -> Result<()> {
        if size > self.max_message_length {
            self.pending.remove(&fragment_id);
            return Err(ProtocolError::FrameTooLarge {
                length: size,
                max: self.max_message_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn large_message() -> ClientMessage {
        let mut msg = ClientMessage::create_for_encode();
        msg.add(Frame::new_initial_frame(REQUEST_INITIAL_FRAME_SIZE));
        msg.set_message_type(0x010100).unwrap();
        for i in 0..10u8 {
            msg.add(Frame::from_slice(&[i; 40]));
        }
        msg
    }

    #[test]
    fn test_small_message_is_not_split() {
        let msg = large_message();
        let fragments = split_into_fragments(msg.clone(), 1, 4096);
        assert_eq!(fragments, vec![msg]);
    }

    #[test]
    fn test_split_flags_and_ids() {
        let fragments = split_into_fragments(large_message(), 77, 120);
        assert!(fragments.len() > 2);

        for fragment in &fragments {
            assert!(fragment.wire_size() <= 120);
            assert_eq!(fragment.fragmentation_id(), Some(77));
        }
        let heads: Vec<&Frame> = fragments.iter().map(|f| &f.frames()[0]).collect();
        assert!(heads[0].is_begin_fragment() && !heads[0].is_end_fragment());
        assert!(heads[1].flags == DEFAULT_FLAGS);
        let last = heads[heads.len() - 1];
        assert!(last.is_end_fragment() && !last.is_begin_fragment());
    }

    #[test]
    fn test_reassembly_restores_frames() {
        let original = large_message();
        let mut assembler = FragmentAssembler::new(4, 1 << 20);
        let mut result = None;
        for fragment in split_into_fragments(original.clone(), 5, 100) {
            assert!(result.is_none());
            result = assembler.accept(fragment.into_frames()).unwrap();
        }
        assert_eq!(result, Some(original));
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn test_interleaved_messages() {
        let a = split_into_fragments(large_message(), 1, 150);
        let b = split_into_fragments(large_message(), 2, 150);
        assert_eq!(a.len(), b.len());

        let mut assembler = FragmentAssembler::new(4, 1 << 20);
        let mut complete = Vec::new();
        for (x, y) in a.into_iter().zip(b) {
            complete.extend(assembler.accept(x.into_frames()).unwrap());
            complete.extend(assembler.accept(y.into_frames()).unwrap());
        }
        assert_eq!(complete, vec![large_message(), large_message()]);
    }

    #[test]
    fn test_unknown_fragment_is_dropped() {
        let fragments = split_into_fragments(large_message(), 9, 150);
        let mut assembler = FragmentAssembler::new(4, 1 << 20);
        let last = fragments.into_iter().last().unwrap();
        assert_eq!(assembler.accept(last.into_frames()).unwrap(), None);
    }

    #[test]
    fn test_pending_limit() {
        let mut assembler = FragmentAssembler::new(1, 1 << 20);
        let first = split_into_fragments(large_message(), 1, 150).remove(0);
        let second = split_into_fragments(large_message(), 2, 150).remove(0);
        assert!(assembler.accept(first.into_frames()).unwrap().is_none());
        assert!(matches!(
            assembler.accept(second.into_frames()),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_reassembled_length_limit() {
        let mut assembler = FragmentAssembler::new(4, 200);
        let mut outcome = Ok(None);
        for fragment in split_into_fragments(large_message(), 3, 100) {
            outcome = assembler.accept(fragment.into_frames());
            if outcome.is_err() {
                break;
            }
        }
        assert!(matches!(outcome, Err(ProtocolError::FrameTooLarge { max: 200, .. })));
        assert_eq!(assembler.pending(), 0);
    }
}
