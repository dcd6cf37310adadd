//! Fixed-width scalar codecs.
//!
//! Values are written little-endian at a caller-supplied offset inside a
//! frame's content. Encoders index the buffer directly: initial frames are
//! allocated from a [`FixedLayout`](crate::protocol::FixedLayout) that already
//! accounts for every field, so an encoder writing out of bounds is a bug in
//! the calling codec. Decoders read frames received from a peer and report
//! short buffers as [`ProtocolError::BufferUnderflow`].

use uuid::Uuid;

use crate::error::{ProtocolError, Result};
use crate::protocol::constants::*;

fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(ProtocolError::BufferUnderflow {
            offset,
            needed: N,
            available: buf.len(),
        })
}

/// Writes a byte at `offset`.
pub fn encode_byte(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

/// Reads a byte at `offset`.
pub fn decode_byte(buf: &[u8], offset: usize) -> Result<u8> {
    read_array::<BYTE_SIZE_IN_BYTES>(buf, offset).map(|b| b[0])
}

/// Writes a boolean at `offset` as `0` or `1`.
pub fn encode_bool(buf: &mut [u8], offset: usize, value: bool) {
    encode_byte(buf, offset, u8::from(value));
}

/// Reads a boolean at `offset`; any non-zero byte is `true`.
pub fn decode_bool(buf: &[u8], offset: usize) -> Result<bool> {
    decode_byte(buf, offset).map(|b| b != 0)
}

/// Writes a 32-bit integer at `offset`.
pub fn encode_int(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + INT_SIZE_IN_BYTES].copy_from_slice(&value.to_le_bytes());
}

/// Reads a 32-bit integer at `offset`.
pub fn decode_int(buf: &[u8], offset: usize) -> Result<i32> {
    read_array(buf, offset).map(i32::from_le_bytes)
}

/// Writes a 64-bit integer at `offset`.
pub fn encode_long(buf: &mut [u8], offset: usize, value: i64) {
    buf[offset..offset + LONG_SIZE_IN_BYTES].copy_from_slice(&value.to_le_bytes());
}

/// Reads a 64-bit integer at `offset`.
pub fn decode_long(buf: &[u8], offset: usize) -> Result<i64> {
    read_array(buf, offset).map(i64::from_le_bytes)
}

/// Writes a nullable UUID at `offset`.
///
/// Layout: is-null boolean, most significant half, least significant half.
/// A null UUID leaves the two halves untouched.
pub fn encode_uuid(buf: &mut [u8], offset: usize, value: Option<Uuid>) {
    encode_bool(buf, offset, value.is_none());
    if let Some(uuid) = value {
        let (most, least) = uuid.as_u64_pair();
        encode_long(buf, offset + BOOLEAN_SIZE_IN_BYTES, most as i64);
        encode_long(
            buf,
            offset + BOOLEAN_SIZE_IN_BYTES + LONG_SIZE_IN_BYTES,
            least as i64,
        );
    }
}

/// Reads a nullable UUID at `offset`.
pub fn decode_uuid(buf: &[u8], offset: usize) -> Result<Option<Uuid>> {
    if decode_bool(buf, offset)? {
        return Ok(None);
    }
    let most = decode_long(buf, offset + BOOLEAN_SIZE_IN_BYTES)?;
    let least = decode_long(buf, offset + BOOLEAN_SIZE_IN_BYTES + LONG_SIZE_IN_BYTES)?;
    Ok(Some(Uuid::from_u64_pair(most as u64, least as u64)))
}

/// A value with a fixed encoded width.
///
/// Used to pack homogeneous lists into a single frame.
pub trait FixedSizeCodec: Sized {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Writes `value` at `offset`.
    fn encode_at(buf: &mut [u8], offset: usize, value: &Self);

    /// Reads a value at `offset`.
    fn decode_at(buf: &[u8], offset: usize) -> Result<Self>;
}

impl FixedSizeCodec for u8 {
    const SIZE: usize = BYTE_SIZE_IN_BYTES;

    fn encode_at(buf: &mut [u8], offset: usize, value: &Self) {
        encode_byte(buf, offset, *value);
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<Self> {
        decode_byte(buf, offset)
    }
}

impl FixedSizeCodec for bool {
    const SIZE: usize = BOOLEAN_SIZE_IN_BYTES;

    fn encode_at(buf: &mut [u8], offset: usize, value: &Self) {
        encode_bool(buf, offset, *value);
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<Self> {
        decode_bool(buf, offset)
    }
}

impl FixedSizeCodec for i32 {
    const SIZE: usize = INT_SIZE_IN_BYTES;

    fn encode_at(buf: &mut [u8], offset: usize, value: &Self) {
        encode_int(buf, offset, *value);
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<Self> {
        decode_int(buf, offset)
    }
}

impl FixedSizeCodec for i64 {
    const SIZE: usize = LONG_SIZE_IN_BYTES;

    fn encode_at(buf: &mut [u8], offset: usize, value: &Self) {
        encode_long(buf, offset, *value);
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<Self> {
        decode_long(buf, offset)
    }
}

impl FixedSizeCodec for Uuid {
    const SIZE: usize = UUID_SIZE_IN_BYTES;

    fn encode_at(buf: &mut [u8], offset: usize, value: &Self) {
        encode_uuid(buf, offset, Some(*value));
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<Self> {
        decode_uuid(buf, offset)?.ok_or(ProtocolError::UnexpectedNull("uuid in fixed-size list"))
    }
}
