//! Raw byte array codec.

use crate::error::Result;
use crate::protocol::{ClientMessage, ForwardFrameIterator, Frame};

/// Appends `bytes` as one frame.
pub fn encode(message: &mut ClientMessage, bytes: &[u8]) {
    message.add(Frame::from_slice(bytes));
}

/// Reads one frame as a byte array.
pub fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Vec<u8>> {
    Ok(iterator.expect_next("byte array frame")?.content.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_array_roundtrip() {
        let mut msg = ClientMessage::create_for_encode();
        encode(&mut msg, &[9, 8, 7]);
        encode(&mut msg, &[]);

        let mut iter = msg.frame_iterator();
        assert_eq!(decode(&mut iter).unwrap(), vec![9, 8, 7]);
        assert!(decode(&mut iter).unwrap().is_empty());
        assert!(decode(&mut iter).is_err());
    }
}
