//! UTF-8 string codec: one frame holding the encoded bytes.

use crate::error::Result;
use crate::protocol::{ClientMessage, ForwardFrameIterator, Frame};

/// Appends `value` as a single UTF-8 frame.
pub fn encode(message: &mut ClientMessage, value: &str) {
    message.add(Frame::from_slice(value.as_bytes()));
}

/// Reads one frame as a UTF-8 string.
///
/// # Errors
///
/// Fails if no frame remains or the frame is not valid UTF-8.
pub fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<String> {
    let frame = iterator.expect_next("string frame")?;
    Ok(String::from_utf8(frame.content.to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_string_frame_is_raw_utf8() {
        let mut msg = ClientMessage::create_for_encode();
        encode(&mut msg, "häzel");
        assert_eq!(&msg.frames()[0].content[..], "häzel".as_bytes());
        assert_eq!(decode(&mut msg.frame_iterator()).unwrap(), "häzel");
    }

    #[test]
    fn test_empty_string_is_empty_frame() {
        let mut msg = ClientMessage::create_for_encode();
        encode(&mut msg, "");
        assert!(msg.frames()[0].content.is_empty());
        assert_eq!(decode(&mut msg.frame_iterator()).unwrap(), "");
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let msg = ClientMessage::from_frames(vec![Frame::from_slice(&[0xC3, 0x28])]);
        assert!(matches!(
            decode(&mut msg.frame_iterator()),
            Err(ProtocolError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_missing_frame_fails() {
        let msg = ClientMessage::new();
        assert!(matches!(
            decode(&mut msg.frame_iterator()),
            Err(ProtocolError::MissingFrame("string frame"))
        ));
    }
}
