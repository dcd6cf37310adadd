//! Forward-only cursor over the frames of a message.

use super::frame::Frame;
use crate::error::{ProtocolError, Result};

/// A forward-only cursor over a message's frames.
///
/// The protocol has no field tags: decoders pull frames in exactly the order
/// the matching encoder appended them, and each variable-length field leaves
/// the cursor at the first frame of the next field. The cursor never rewinds.
#[derive(Debug, Clone)]
pub struct ForwardFrameIterator<'a> {
    frames: &'a [Frame],
    position: usize,
}

impl<'a> ForwardFrameIterator<'a> {
    /// Creates an iterator positioned at the first of `frames`.
    pub fn new(frames: &'a [Frame]) -> Self {
        Self {
            frames,
            position: 0,
        }
    }

    /// Returns true if at least one frame remains.
    pub fn has_next(&self) -> bool {
        self.position < self.frames.len()
    }

    /// Number of frames not yet consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.position
    }

    /// Index of the next frame.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next frame without consuming it.
    pub fn peek(&self) -> Option<&'a Frame> {
        self.frames.get(self.position)
    }

    /// Consumes and returns the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingFrame`] if the message is exhausted.
    pub fn next_frame(&mut self) -> Result<&'a Frame> {
        self.expect_next("frame")
    }

    /// Consumes and returns the next frame, naming it in the error if absent.
    pub fn expect_next(&mut self, what: &'static str) -> Result<&'a Frame> {
        let frame = self
            .frames
            .get(self.position)
            .ok_or(ProtocolError::MissingFrame(what))?;
        self.position += 1;
        Ok(frame)
    }

    /// Returns true if the next frame is a null frame.
    pub fn next_is_null_frame(&self) -> bool {
        self.peek().is_some_and(Frame::is_null_frame)
    }

    /// Returns true if the next frame closes a data structure.
    pub fn next_is_end_frame(&self) -> bool {
        self.peek().is_some_and(Frame::is_end_frame)
    }

    /// Consumes the next frame if it is a null frame.
    ///
    /// Returns true when a null frame was consumed.
    pub fn skip_null_frame(&mut self) -> bool {
        let is_null = self.next_is_null_frame();
        if is_null {
            self.position += 1;
        }
        is_null
    }

    /// Consumes a frame that must open a data structure.
    pub fn expect_begin_frame(&mut self) -> Result<()> {
        let frame = self.expect_next("begin data structure frame")?;
        if !frame.is_begin_frame() {
            return Err(ProtocolError::UnexpectedFrame {
                expected: "begin data structure frame",
                flags: frame.flags,
            });
        }
        Ok(())
    }

    /// Consumes a frame that must close a data structure.
    pub fn expect_end_frame(&mut self) -> Result<()> {
        let frame = self.expect_next("end data structure frame")?;
        if !frame.is_end_frame() {
            return Err(ProtocolError::UnexpectedFrame {
                expected: "end data structure frame",
                flags: frame.flags,
            });
        }
        Ok(())
    }

    /// Skips the remainder of the current data structure, including its end
    /// frame.
    ///
    /// Nested structures are skipped whole. Decoders call this after reading
    /// the fields they know, so structures extended by newer protocol
    /// versions still decode.
    pub fn fast_forward_to_end_frame(&mut self) -> Result<()> {
        let mut expected_end_frames = 1usize;
        while expected_end_frames != 0 {
            let frame = self.expect_next("end data structure frame")?;
            if frame.is_end_frame() {
                expected_end_frames -= 1;
            } else if frame.is_begin_frame() {
                expected_end_frames += 1;
            }
        }
        Ok(())
    }
}

impl<'a> Iterator for ForwardFrameIterator<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.get(self.position)?;
        self.position += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<Frame> {
        vec![
            Frame::from_slice(b"a"),
            Frame::new_begin_frame(),
            Frame::from_slice(b"b"),
            Frame::new_begin_frame(),
            Frame::from_slice(b"c"),
            Frame::new_end_frame(),
            Frame::new_end_frame(),
            Frame::new_null_frame(),
        ]
    }

    #[test]
    fn test_next_advances() {
        let frames = frames();
        let mut iter = ForwardFrameIterator::new(&frames);
        assert_eq!(iter.remaining(), 8);
        assert_eq!(&iter.next_frame().unwrap().content[..], b"a");
        assert_eq!(iter.position(), 1);
        assert!(iter.peek().unwrap().is_begin_frame());
    }

    #[test]
    fn test_next_past_end_fails() {
        let frames = vec![Frame::default()];
        let mut iter = ForwardFrameIterator::new(&frames);
        iter.next_frame().unwrap();
        assert!(!iter.has_next());
        assert!(matches!(
            iter.next_frame(),
            Err(ProtocolError::MissingFrame("frame"))
        ));
        assert!(iter.peek().is_none());
    }

    #[test]
    fn test_fast_forward_skips_nested() {
        let frames = frames();
        let mut iter = ForwardFrameIterator::new(&frames);
        iter.next_frame().unwrap();
        iter.expect_begin_frame().unwrap();
        iter.fast_forward_to_end_frame().unwrap();
        assert!(iter.next_is_null_frame());
        assert!(iter.skip_null_frame());
        assert!(!iter.has_next());
    }

    #[test]
    fn test_fast_forward_unterminated_fails() {
        let frames = vec![Frame::new_begin_frame(), Frame::from_slice(b"x")];
        let mut iter = ForwardFrameIterator::new(&frames);
        iter.expect_begin_frame().unwrap();
        assert!(iter.fast_forward_to_end_frame().is_err());
    }

    #[test]
    fn test_expect_begin_frame_rejects_data() {
        let frames = vec![Frame::from_slice(b"x")];
        let mut iter = ForwardFrameIterator::new(&frames);
        assert!(matches!(
            iter.expect_begin_frame(),
            Err(ProtocolError::UnexpectedFrame { .. })
        ));
    }

    #[test]
    fn test_skip_null_frame_only_consumes_null() {
        let frames = vec![Frame::from_slice(b"x")];
        let mut iter = ForwardFrameIterator::new(&frames);
        assert!(!iter.skip_null_frame());
        assert_eq!(iter.position(), 0);
    }

    #[test]
    fn test_std_iterator() {
        let frames = frames();
        let iter = ForwardFrameIterator::new(&frames);
        assert_eq!(iter.size_hint(), (8, Some(8)));
        assert_eq!(iter.filter(|f| f.is_end_frame()).count(), 2);
    }
}
