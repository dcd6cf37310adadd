//! Multi-frame list codecs.
//!
//! A structural list is delimited by a begin and an end data-structure frame
//! with each element encoded in between. A counted list, used by older
//! operations, instead starts with a frame holding the element count and has
//! no end marker. An operation fixes one convention per field.

use crate::codec::fixed_size::{decode_int, encode_int};
use crate::error::{ProtocolError, Result};
use crate::protocol::constants::{DEFAULT_FLAGS, INT_SIZE_IN_BYTES};
use crate::protocol::{ClientMessage, ForwardFrameIterator, Frame};

/// Wire convention for a list field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListEncoding {
    /// Begin frame, elements, end frame.
    #[default]
    Structural,
    /// Count frame, then exactly that many elements.
    Counted,
}

impl ListEncoding {
    /// Encodes `items` with this convention.
    pub fn encode<T>(
        self,
        message: &mut ClientMessage,
        items: &[T],
        encode_item: impl FnMut(&mut ClientMessage, &T),
    ) {
        match self {
            Self::Structural => encode(message, items, encode_item),
            Self::Counted => encode_counted(message, items, encode_item),
        }
    }

    /// Decodes a list with this convention.
    pub fn decode<'a, T>(
        self,
        iterator: &mut ForwardFrameIterator<'a>,
        decode_item: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<T>,
    ) -> Result<Vec<T>> {
        match self {
            Self::Structural => decode(iterator, decode_item),
            Self::Counted => decode_counted(iterator, decode_item),
        }
    }
}

/// Encodes a structural list.
pub fn encode<T>(
    message: &mut ClientMessage,
    items: &[T],
    mut encode_item: impl FnMut(&mut ClientMessage, &T),
) {
    message.add(Frame::new_begin_frame());
    for item in items {
        encode_item(message, item);
    }
    message.add(Frame::new_end_frame());
}

/// Encodes a structural list whose elements may be absent.
///
/// Absent elements are written as null frames.
pub fn encode_contains_nullable<T>(
    message: &mut ClientMessage,
    items: &[Option<T>],
    mut encode_item: impl FnMut(&mut ClientMessage, &T),
) {
    message.add(Frame::new_begin_frame());
    for item in items {
        match item {
            Some(item) => encode_item(message, item),
            None => message.add(Frame::new_null_frame()),
        }
    }
    message.add(Frame::new_end_frame());
}

/// Encodes a structural list, or a null frame when the list is absent.
pub fn encode_nullable<T>(
    message: &mut ClientMessage,
    items: Option<&[T]>,
    encode_item: impl FnMut(&mut ClientMessage, &T),
) {
    match items {
        Some(items) => encode(message, items, encode_item),
        None => message.add(Frame::new_null_frame()),
    }
}

/// Decodes a structural list.
///
/// An empty list decodes to an empty vector, never to an absent value.
pub fn decode<'a, T>(
    iterator: &mut ForwardFrameIterator<'a>,
    mut decode_item: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    iterator.expect_begin_frame()?;
    let mut items = Vec::new();
    loop {
        match iterator.peek() {
            Some(frame) if frame.is_end_frame() => break,
            Some(_) => items.push(decode_item(iterator)?),
            None => return Err(ProtocolError::MissingFrame("end data structure frame")),
        }
    }
    iterator.expect_end_frame()?;
    Ok(items)
}

/// Decodes a structural list whose elements may be null frames.
pub fn decode_contains_nullable<'a, T>(
    iterator: &mut ForwardFrameIterator<'a>,
    mut decode_item: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<T>,
) -> Result<Vec<Option<T>>> {
    decode(iterator, |it| {
        if it.skip_null_frame() {
            Ok(None)
        } else {
            decode_item(it).map(Some)
        }
    })
}

/// Decodes a structural list, or `None` for a null frame.
pub fn decode_nullable<'a, T>(
    iterator: &mut ForwardFrameIterator<'a>,
    decode_item: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<T>,
) -> Result<Option<Vec<T>>> {
    if iterator.skip_null_frame() {
        Ok(None)
    } else {
        decode(iterator, decode_item).map(Some)
    }
}

/// Encodes a counted list: a count frame followed by the elements.
///
/// `items` must hold at most `i32::MAX` elements. A longer list could not be
/// sent anyway: its frames alone exceed any message the codec writes.
pub fn encode_counted<T>(
    message: &mut ClientMessage,
    items: &[T],
    mut encode_item: impl FnMut(&mut ClientMessage, &T),
) {
    let length = i32::try_from(items.len());
    debug_assert!(length.is_ok(), "counted list longer than i32::MAX");
    let mut count = Frame::zeroed(INT_SIZE_IN_BYTES, DEFAULT_FLAGS);
    encode_int(&mut count.content, 0, length.unwrap_or(i32::MAX));
    message.add(count);
    for item in items {
        encode_item(message, item);
    }
}

/// Decodes a counted list.
pub fn decode_counted<'a, T>(
    iterator: &mut ForwardFrameIterator<'a>,
    mut decode_item: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let frame = iterator.expect_next("list count frame")?;
    let count = decode_int(&frame.content, 0)?;
    let count = usize::try_from(count).map_err(|_| ProtocolError::InvalidCount(count))?;
    // Every element takes at least one frame.
    if count > iterator.remaining() {
        return Err(ProtocolError::MissingFrame("list element"));
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(decode_item(iterator)?);
    }
    Ok(items)
}
