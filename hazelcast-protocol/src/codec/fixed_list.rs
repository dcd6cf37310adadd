//! Lists of fixed-size values packed into a single frame.
//!
//! Lists of longs, ints and UUIDs are the generic list instantiated with a
//! [`FixedSizeCodec`] element: the frame content is `count * T::SIZE` bytes
//! and the count is implied by the frame length.

use crate::codec::fixed_size::FixedSizeCodec;
use crate::error::{ProtocolError, Result};
use crate::protocol::constants::DEFAULT_FLAGS;
use crate::protocol::{ClientMessage, ForwardFrameIterator, Frame};

/// Packs `items` into one frame.
pub fn encode_frame<T: FixedSizeCodec>(items: &[T]) -> Frame {
    let mut frame = Frame::zeroed(items.len() * T::SIZE, DEFAULT_FLAGS);
    for (index, item) in items.iter().enumerate() {
        T::encode_at(&mut frame.content, index * T::SIZE, item);
    }
    frame
}

/// Unpacks every element of `frame`.
pub fn decode_frame<T: FixedSizeCodec>(frame: &Frame) -> Result<Vec<T>> {
    let length = frame.content.len();
    if length % T::SIZE != 0 {
        return Err(ProtocolError::FixedListLength {
            length,
            element_size: T::SIZE,
        });
    }
    (0..length / T::SIZE)
        .map(|index| T::decode_at(&frame.content, index * T::SIZE))
        .collect()
}

/// Appends `items` as one packed frame.
pub fn encode<T: FixedSizeCodec>(message: &mut ClientMessage, items: &[T]) {
    message.add(encode_frame(items));
}

/// Reads one packed frame.
pub fn decode<T: FixedSizeCodec>(iterator: &mut ForwardFrameIterator<'_>) -> Result<Vec<T>> {
    decode_frame(iterator.expect_next("fixed-size list frame")?)
}

/// Appends a packed frame, or a null frame when the list is absent.
pub fn encode_nullable<T: FixedSizeCodec>(message: &mut ClientMessage, items: Option<&[T]>) {
    match items {
        Some(items) => encode(message, items),
        None => message.add(Frame::new_null_frame()),
    }
}

/// Reads a packed frame, or `None` for a null frame.
pub fn decode_nullable<T: FixedSizeCodec>(
    iterator: &mut ForwardFrameIterator<'_>,
) -> Result<Option<Vec<T>>> {
    if iterator.skip_null_frame() {
        Ok(None)
    } else {
        decode(iterator).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_long_list_packs_into_one_frame() {
        let mut msg = ClientMessage::create_for_encode();
        encode(&mut msg, &[1i64, -2, i64::MAX]);

        assert_eq!(msg.frame_count(), 1);
        assert_eq!(msg.frames()[0].content.len(), 24);
        let decoded: Vec<i64> = decode(&mut msg.frame_iterator()).unwrap();
        assert_eq!(decoded, vec![1, -2, i64::MAX]);
    }

    #[test]
    fn test_uuid_list() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let frame = encode_frame(&ids);
        assert_eq!(frame.content.len(), 34);
        assert_eq!(decode_frame::<Uuid>(&frame).unwrap(), ids);
    }

    #[test]
    fn test_int_list_empty() {
        let mut msg = ClientMessage::create_for_encode();
        encode::<i32>(&mut msg, &[]);
        assert!(msg.frames()[0].content.is_empty());
        assert!(decode::<i32>(&mut msg.frame_iterator()).unwrap().is_empty());
    }

    #[test]
    fn test_ragged_frame_rejected() {
        let frame = Frame::from_slice(&[0; 10]);
        assert!(matches!(
            decode_frame::<i64>(&frame),
            Err(ProtocolError::FixedListLength {
                length: 10,
                element_size: 8
            })
        ));
    }

    #[test]
    fn test_nullable_list() {
        let mut msg = ClientMessage::create_for_encode();
        encode_nullable::<i64>(&mut msg, None);
        encode_nullable(&mut msg, Some(&[5i64][..]));

        let mut iter = msg.frame_iterator();
        assert_eq!(decode_nullable::<i64>(&mut iter).unwrap(), None);
        assert_eq!(decode_nullable::<i64>(&mut iter).unwrap(), Some(vec![5]));
    }
}
