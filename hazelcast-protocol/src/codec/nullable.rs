//! Encodings of optional values.
//!
//! Two conventions are deployed and they are not interchangeable:
//!
//! - [`NullEncoding::NullFrame`]: an absent value is a single empty frame
//!   flagged `IS_NULL`; a present value is encoded as usual.
//! - [`NullEncoding::PresenceFlag`]: a one-byte frame holding an is-null
//!   boolean always comes first; the value follows only when present.
//!
//! Each operation uses exactly one of them for a given field, and its decoder
//! must use the same one. There is no way to tell them apart on the wire.

use crate::codec::fixed_size::{decode_bool, encode_bool};
use crate::error::Result;
use crate::protocol::constants::{BOOLEAN_SIZE_IN_BYTES, DEFAULT_FLAGS};
use crate::protocol::{ClientMessage, ForwardFrameIterator, Frame};

/// Wire convention for an optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullEncoding {
    /// Absent values are an `IS_NULL` frame.
    #[default]
    NullFrame,
    /// An is-null boolean frame precedes the value.
    PresenceFlag,
}

impl NullEncoding {
    /// Encodes an optional value with this convention.
    pub fn encode<T: ?Sized>(
        self,
        message: &mut ClientMessage,
        value: Option<&T>,
        encode: impl FnOnce(&mut ClientMessage, &T),
    ) {
        match self {
            Self::NullFrame => encode_nullable(message, value, encode),
            Self::PresenceFlag => encode_flagged(message, value, encode),
        }
    }

    /// Decodes an optional value with this convention.
    pub fn decode<'a, T>(
        self,
        iterator: &mut ForwardFrameIterator<'a>,
        decode: impl FnOnce(&mut ForwardFrameIterator<'a>) -> Result<T>,
    ) -> Result<Option<T>> {
        match self {
            Self::NullFrame => decode_nullable(iterator, decode),
            Self::PresenceFlag => decode_flagged(iterator, decode),
        }
    }
}

/// Encodes `value`, or a null frame when absent.
pub fn encode_nullable<T: ?Sized>(
    message: &mut ClientMessage,
    value: Option<&T>,
    encode: impl FnOnce(&mut ClientMessage, &T),
) {
    match value {
        Some(value) => encode(message, value),
        None => message.add(Frame::new_null_frame()),
    }
}

/// Consumes a null frame, or decodes the value.
pub fn decode_nullable<'a, T>(
    iterator: &mut ForwardFrameIterator<'a>,
    decode: impl FnOnce(&mut ForwardFrameIterator<'a>) -> Result<T>,
) -> Result<Option<T>> {
    if iterator.skip_null_frame() {
        Ok(None)
    } else {
        decode(iterator).map(Some)
    }
}

/// Encodes an is-null flag frame, then `value` when present.
pub fn encode_flagged<T: ?Sized>(
    message: &mut ClientMessage,
    value: Option<&T>,
    encode: impl FnOnce(&mut ClientMessage, &T),
) {
    let mut flag = Frame::zeroed(BOOLEAN_SIZE_IN_BYTES, DEFAULT_FLAGS);
    encode_bool(&mut flag.content, 0, value.is_none());
    message.add(flag);
    if let Some(value) = value {
        encode(message, value);
    }
}

/// Reads an is-null flag frame, then the value when present.
pub fn decode_flagged<'a, T>(
    iterator: &mut ForwardFrameIterator<'a>,
    decode: impl FnOnce(&mut ForwardFrameIterator<'a>) -> Result<T>,
) -> Result<Option<T>> {
    let flag = iterator.expect_next("is-null flag frame")?;
    if decode_bool(&flag.content, 0)? {
        Ok(None)
    } else {
        decode(iterator).map(Some)
    }
}
