//! Entry lists: key-value pairs sent as two parallel lists.
//!
//! All keys are encoded first as one list, then all values as a second list
//! of the same length. Decoding zips them back together by index; differing
//! lengths are a fatal [`ProtocolError::EntryListLengthMismatch`].

use uuid::Uuid;

use crate::codec::fixed_list;
use crate::codec::fixed_size::FixedSizeCodec;
use crate::codec::list;
use crate::error::{ProtocolError, Result};
use crate::protocol::{ClientMessage, ForwardFrameIterator, Frame};

/// Pairs `keys[i]` with `values[i]`.
///
/// # Errors
///
/// Returns [`ProtocolError::EntryListLengthMismatch`] if the lists differ in
/// length.
pub fn zip_entries<K, V>(keys: Vec<K>, values: Vec<V>) -> Result<Vec<(K, V)>> {
    if keys.len() != values.len() {
        return Err(ProtocolError::EntryListLengthMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }
    Ok(keys.into_iter().zip(values).collect())
}

/// Encodes entries as a structural key list followed by a structural value
/// list.
pub fn encode<K, V>(
    message: &mut ClientMessage,
    entries: &[(K, V)],
    mut encode_key: impl FnMut(&mut ClientMessage, &K),
    mut encode_value: impl FnMut(&mut ClientMessage, &V),
) {
    message.add(Frame::new_begin_frame());
    for (key, _) in entries {
        encode_key(message, key);
    }
    message.add(Frame::new_end_frame());

    message.add(Frame::new_begin_frame());
    for (_, value) in entries {
        encode_value(message, value);
    }
    message.add(Frame::new_end_frame());
}

/// Decodes entries written by [`encode`].
pub fn decode<'a, K, V>(
    iterator: &mut ForwardFrameIterator<'a>,
    decode_key: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<K>,
    decode_value: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<V>,
) -> Result<Vec<(K, V)>> {
    let keys = list::decode(iterator, decode_key)?;
    let values = list::decode(iterator, decode_value)?;
    zip_entries(keys, values)
}

/// Encodes entries, or a null frame when absent.
pub fn encode_nullable<K, V>(
    message: &mut ClientMessage,
    entries: Option<&[(K, V)]>,
    encode_key: impl FnMut(&mut ClientMessage, &K),
    encode_value: impl FnMut(&mut ClientMessage, &V),
) {
    match entries {
        Some(entries) => encode(message, entries, encode_key, encode_value),
        None => message.add(Frame::new_null_frame()),
    }
}

/// Decodes entries, or `None` for a null frame.
pub fn decode_nullable<'a, K, V>(
    iterator: &mut ForwardFrameIterator<'a>,
    decode_key: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<K>,
    decode_value: impl FnMut(&mut ForwardFrameIterator<'a>) -> Result<V>,
) -> Result<Option<Vec<(K, V)>>> {
    if iterator.skip_null_frame() {
        Ok(None)
    } else {
        decode(iterator, decode_key, decode_value).map(Some)
    }
}

/// Encodes fixed-size entries as a packed key frame and a packed value frame.
pub fn encode_fixed<K, V>(message: &mut ClientMessage, entries: &[(K, V)])
where
    K: FixedSizeCodec + Copy,
    V: FixedSizeCodec + Copy,
{
    let keys: Vec<K> = entries.iter().map(|(k, _)| *k).collect();
    let values: Vec<V> = entries.iter().map(|(_, v)| *v).collect();
    fixed_list::encode(message, &keys);
    fixed_list::encode(message, &values);
}

/// Decodes entries written by [`encode_fixed`].
pub fn decode_fixed<K, V>(iterator: &mut ForwardFrameIterator<'_>) -> Result<Vec<(K, V)>>
where
    K: FixedSizeCodec,
    V: FixedSizeCodec,
{
    let keys = fixed_list::decode(iterator)?;
    let values = fixed_list::decode(iterator)?;
    zip_entries(keys, values)
}

/// Encodes UUID to int-list entries, as used by partition tables.
///
/// The value lists come first as a structural list of packed int frames,
/// followed by the keys as one packed UUID frame.
pub fn encode_uuid_int_list(message: &mut ClientMessage, entries: &[(Uuid, Vec<i32>)]) {
    message.add(Frame::new_begin_frame());
    for (_, ids) in entries {
        fixed_list::encode(message, ids);
    }
    message.add(Frame::new_end_frame());
    let keys: Vec<Uuid> = entries.iter().map(|(uuid, _)| *uuid).collect();
    fixed_list::encode(message, &keys);
}

/// Decodes entries written by [`encode_uuid_int_list`].
pub fn decode_uuid_int_list(
    iterator: &mut ForwardFrameIterator<'_>,
) -> Result<Vec<(Uuid, Vec<i32>)>> {
    let values = list::decode(iterator, fixed_list::decode::<i32>)?;
    let keys = fixed_list::decode::<Uuid>(iterator)?;
    zip_entries(keys, values)
}
