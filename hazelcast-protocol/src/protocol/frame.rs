//! Frame type for the Hazelcast Open Binary Client Protocol.

use bytes::{Buf, BufMut, BytesMut};

use super::constants::*;
use crate::error::{ProtocolError, Result};

/// A single frame in the Hazelcast protocol.
///
/// On the wire each frame consists of:
/// - A 4-byte length field (little-endian), counting header and content
/// - A 2-byte flags field (little-endian)
/// - Variable-length content
///
/// A frame carries no encoding logic of its own. Codecs write fixed-width
/// fields into the content of an initial frame, or put a whole
/// variable-length value (string, blob, packed list) into one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The frame content (payload after flags).
    pub content: BytesMut,
    /// Frame flags indicating frame type and properties.
    pub flags: u16,
}

impl Frame {
    /// Creates a new frame with the given content and flags.
    pub fn new(content: BytesMut, flags: u16) -> Self {
        Self { content, flags }
    }

    /// Creates a new frame with content and default flags.
    pub fn with_content(content: BytesMut) -> Self {
        Self::new(content, DEFAULT_FLAGS)
    }

    /// Creates a new frame holding a copy of `bytes` with default flags.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::with_content(BytesMut::from(bytes))
    }

    /// Creates a new empty frame with the given flags.
    pub fn with_flags(flags: u16) -> Self {
        Self::new(BytesMut::new(), flags)
    }

    /// Creates a zero-filled frame of `size` bytes with the given flags.
    ///
    /// Fixed-size fields are written into it at precomputed offsets.
    pub fn zeroed(size: usize, flags: u16) -> Self {
        Self::new(BytesMut::zeroed(size), flags)
    }

    /// Creates the zero-filled initial frame of an unfragmented message.
    pub fn new_initial_frame(size: usize) -> Self {
        Self::zeroed(size, UNFRAGMENTED_MESSAGE)
    }

    /// Creates a begin frame (opens a nested data structure).
    pub fn new_begin_frame() -> Self {
        Self::with_flags(BEGIN_DATA_STRUCTURE_FLAG)
    }

    /// Creates an end frame (closes a nested data structure).
    pub fn new_end_frame() -> Self {
        Self::with_flags(END_DATA_STRUCTURE_FLAG)
    }

    /// Creates a null frame (represents an absent value).
    pub fn new_null_frame() -> Self {
        Self::with_flags(IS_NULL_FLAG)
    }

    /// Sets additional flag bits.
    pub fn add_flags(&mut self, flags: u16) {
        self.flags |= flags;
    }

    /// Returns true if all bits of `flags` are set.
    pub fn has_flags(&self, flags: u16) -> bool {
        self.flags & flags == flags
    }

    /// Returns true if this frame has the BEGIN_FRAGMENT flag set.
    pub fn is_begin_fragment(&self) -> bool {
        self.flags & BEGIN_FRAGMENT_FLAG != 0
    }

    /// Returns true if this frame has the END_FRAGMENT flag set.
    pub fn is_end_fragment(&self) -> bool {
        self.flags & END_FRAGMENT_FLAG != 0
    }

    /// Returns true if this frame starts an unfragmented message.
    pub fn is_unfragmented(&self) -> bool {
        self.has_flags(UNFRAGMENTED_MESSAGE)
    }

    /// Returns true if this frame has the BEGIN_DATA_STRUCTURE flag set.
    pub fn is_begin_frame(&self) -> bool {
        self.flags & BEGIN_DATA_STRUCTURE_FLAG != 0
    }

    /// Returns true if this frame has the END_DATA_STRUCTURE flag set.
    pub fn is_end_frame(&self) -> bool {
        self.flags & END_DATA_STRUCTURE_FLAG != 0
    }

    /// Returns true if this frame has the NULL flag set.
    pub fn is_null_frame(&self) -> bool {
        self.flags & IS_NULL_FLAG != 0
    }

    /// Returns true if this frame has the FINAL flag set.
    pub fn is_final_frame(&self) -> bool {
        self.flags & IS_FINAL_FLAG != 0
    }

    /// Returns true if this frame has the EVENT flag set.
    pub fn is_event_frame(&self) -> bool {
        self.flags & IS_EVENT_FLAG != 0
    }

    /// Returns true if this frame has the BACKUP_AWARE flag set.
    pub fn is_backup_aware_frame(&self) -> bool {
        self.flags & BACKUP_AWARE_FLAG != 0
    }

    /// Returns true if this frame has the BACKUP_EVENT flag set.
    pub fn is_backup_event_frame(&self) -> bool {
        self.flags & BACKUP_EVENT_FLAG != 0
    }

    /// Returns the size of this frame on the wire.
    ///
    /// This is also the value of the length field: the 4-byte length field,
    /// 2-byte flags and the content.
    pub fn wire_size(&self) -> usize {
        SIZE_OF_FRAME_LENGTH_AND_FLAGS + self.content.len()
    }

    /// Writes this frame to the given buffer.
    pub fn write_to(&self, dst: &mut BytesMut) {
        self.write_with_flags(dst, self.flags);
    }

    /// Writes this frame with `flags` in place of its own flags.
    ///
    /// The wire size must fit the 32-bit length field. [`ClientMessageCodec`]
    /// rejects frames above its configured maximum, which is bounded by
    /// `u32::MAX`, before writing.
    ///
    /// [`ClientMessageCodec`]: super::ClientMessageCodec
    pub(crate) fn write_with_flags(&self, dst: &mut BytesMut, flags: u16) {
        let length = u32::try_from(self.wire_size());
        debug_assert!(length.is_ok(), "frame exceeds the 32-bit length field");
        dst.reserve(self.wire_size());
        dst.put_u32_le(length.unwrap_or(u32::MAX));
        dst.put_u16_le(flags);
        dst.put_slice(&self.content);
    }

    /// Returns the length declared by the frame header at the start of `src`.
    ///
    /// Returns `None` if fewer than four bytes are buffered.
    pub fn peek_length(src: &[u8]) -> Option<usize> {
        if src.len() < SIZE_OF_FRAME_LENGTH_FIELD {
            return None;
        }
        Some(u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize)
    }

    /// Reads a frame from the given buffer.
    ///
    /// Returns `Ok(None)` if there isn't enough data to read a complete frame;
    /// the buffer is left untouched in that case.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedFrame`] if the declared length is
    /// shorter than the frame header.
    pub fn read_from(src: &mut BytesMut) -> Result<Option<Self>> {
        let frame_length = match Self::peek_length(src) {
            Some(length) => length,
            None => return Ok(None),
        };

        if frame_length < SIZE_OF_FRAME_LENGTH_AND_FLAGS {
            return Err(ProtocolError::MalformedFrame(format!(
                "declared length {frame_length} is shorter than the {SIZE_OF_FRAME_LENGTH_AND_FLAGS}-byte header"
            )));
        }

        if src.len() < frame_length {
            return Ok(None);
        }

        src.advance(SIZE_OF_FRAME_LENGTH_FIELD);
        let flags = src.get_u16_le();
        let content = src.split_to(frame_length - SIZE_OF_FRAME_LENGTH_AND_FLAGS);

        Ok(Some(Self::new(content, flags)))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::with_flags(DEFAULT_FLAGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame() {
        let content = BytesMut::from(&[1, 2, 3][..]);
        let frame = Frame::new(content.clone(), BEGIN_DATA_STRUCTURE_FLAG);
        assert_eq!(frame.content, content);
        assert_eq!(frame.flags, BEGIN_DATA_STRUCTURE_FLAG);
    }

    #[test]
    fn test_frame_flags() {
        let begin = Frame::new_begin_frame();
        assert!(begin.is_begin_frame());
        assert!(!begin.is_end_frame());

        let end = Frame::new_end_frame();
        assert!(!end.is_begin_frame());
        assert!(end.is_end_frame());

        let null = Frame::new_null_frame();
        assert!(null.is_null_frame());

        let final_frame = Frame::with_flags(IS_FINAL_FLAG);
        assert!(final_frame.is_final_frame());

        let event = Frame::with_flags(IS_EVENT_FLAG);
        assert!(event.is_event_frame());

        let backup = Frame::with_flags(BACKUP_EVENT_FLAG);
        assert!(backup.is_backup_event_frame());

        let aware = Frame::with_flags(BACKUP_AWARE_FLAG);
        assert!(aware.is_backup_aware_frame());
    }

    #[test]
    fn test_initial_frame_is_zeroed_and_unfragmented() {
        let frame = Frame::new_initial_frame(REQUEST_INITIAL_FRAME_SIZE);
        assert_eq!(frame.content.len(), 16);
        assert!(frame.content.iter().all(|b| *b == 0));
        assert!(frame.is_unfragmented());
        assert!(frame.is_begin_fragment());
        assert!(frame.is_end_fragment());
    }

    #[test]
    fn test_add_flags_keeps_existing() {
        let mut frame = Frame::new_initial_frame(EVENT_INITIAL_FRAME_SIZE);
        frame.add_flags(IS_EVENT_FLAG);
        assert!(frame.is_event_frame());
        assert!(frame.is_unfragmented());
    }

    #[test]
    fn test_wire_size() {
        let empty = Frame::default();
        assert_eq!(empty.wire_size(), 6);

        let with_content = Frame::from_slice(&[1, 2, 3, 4, 5]);
        assert_eq!(with_content.wire_size(), 11);
    }

    #[test]
    fn test_length_field_counts_header() {
        let frame = Frame::from_slice(&[0xAA, 0xBB, 0xCC]);
        let mut buf = BytesMut::new();
        frame.write_to(&mut buf);

        assert_eq!(&buf[..4], &9u32.to_le_bytes());
        assert_eq!(&buf[4..6], &DEFAULT_FLAGS.to_le_bytes());
        assert_eq!(&buf[6..], &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_write_and_read_frame() {
        let original = Frame::new(
            BytesMut::from(&[0xDE, 0xAD, 0xBE, 0xEF][..]),
            BEGIN_DATA_STRUCTURE_FLAG,
        );
        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        assert_eq!(buf.len(), original.wire_size());

        let decoded = Frame::read_from(&mut buf).unwrap().unwrap();
        assert_eq!(decoded, original);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_read_incomplete_length() {
        let mut buf = BytesMut::from(&[0x01, 0x02][..]);
        assert!(Frame::read_from(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_read_incomplete_content() {
        let mut buf = BytesMut::from(
            &[
                0x0A, 0x00, 0x00, 0x00, // length = 10 (header + 4 bytes content)
                0x00, 0x20, // IS_FINAL
                0x01, 0x02, // only 2 bytes of content
            ][..],
        );
        assert!(Frame::read_from(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn test_read_empty_frame() {
        let mut buf = BytesMut::from(
            &[
                0x06, 0x00, 0x00, 0x00, // length = 6 (just the header)
                0x00, 0x08, // END_DATA_STRUCTURE
            ][..],
        );

        let frame = Frame::read_from(&mut buf).unwrap().unwrap();
        assert!(frame.is_end_frame());
        assert!(frame.content.is_empty());
    }

    #[test]
    fn test_read_malformed_length() {
        let mut buf = BytesMut::from(&[0x03, 0x00, 0x00, 0x00, 0x00, 0x00][..]);
        let result = Frame::read_from(&mut buf);
        assert!(matches!(result, Err(ProtocolError::MalformedFrame(_))));
    }

    #[test]
    fn test_peek_length() {
        assert_eq!(Frame::peek_length(&[0x10, 0x00, 0x00, 0x00, 0xFF]), Some(16));
        assert_eq!(Frame::peek_length(&[0x10, 0x00]), None);
    }

    #[test]
    fn test_multiple_flags() {
        let frame = Frame::with_flags(BEGIN_FRAGMENT_FLAG | END_FRAGMENT_FLAG | IS_FINAL_FLAG);
        assert!(frame.is_begin_fragment());
        assert!(frame.is_end_fragment());
        assert!(frame.is_final_frame());
        assert!(frame.has_flags(UNFRAGMENTED_MESSAGE));
    }

    #[test]
    fn test_write_with_flags_overrides() {
        let frame = Frame::from_slice(b"x");
        let mut buf = BytesMut::new();
        frame.write_with_flags(&mut buf, IS_FINAL_FLAG);

        let decoded = Frame::read_from(&mut buf).unwrap().unwrap();
        assert!(decoded.is_final_frame());
        assert_eq!(frame.flags, DEFAULT_FLAGS);
    }

    #[test]
    fn test_read_large_frame() {
        let content: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let original = Frame::from_slice(&content);

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        let decoded = Frame::read_from(&mut buf).unwrap().unwrap();
        assert_eq!(decoded.content.len(), 1000);
        assert_eq!(&decoded.content[..], &content[..]);
    }

    #[test]
    fn test_default_frame_properties() {
        let frame = Frame::default();

        assert!(!frame.is_begin_frame());
        assert!(!frame.is_end_frame());
        assert!(!frame.is_null_frame());
        assert!(!frame.is_final_frame());
        assert!(!frame.is_event_frame());
        assert!(!frame.is_backup_event_frame());
        assert!(!frame.is_begin_fragment());
        assert!(frame.content.is_empty());
    }
}
