//! Checks whether a map contains a key.

use hazelcast_protocol::codec::fixed_size::{decode_bool, decode_long, encode_bool, encode_long};
use hazelcast_protocol::codec::{data, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x010600;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x010601;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.ContainsKey";

const REQUEST: FixedLayout<1> = FixedLayout::request([LONG_SIZE_IN_BYTES]);
const REQUEST_THREAD_ID_OFFSET: usize = REQUEST.offset(0);
const RESPONSE: FixedLayout<1> = FixedLayout::response([BOOLEAN_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of a contains-key check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
    /// Serialized key.
    pub key: Data,
    /// Id of the calling thread.
    pub thread_id: i64,
}

/// Result of a contains-key check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Whether the key is mapped.
    pub response: bool,
}

/// Encodes a contains-key request.
pub fn encode_request(name: &str, key: &Data, thread_id: i64) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_THREAD_ID_OFFSET, thread_id);
    message.add(initial);
    string::encode(&mut message, name);
    data::encode(&mut message, key);
    message
}

/// Decodes a contains-key request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let thread_id = decode_long(&initial.content, REQUEST_THREAD_ID_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        key: data::decode(&mut iterator)?,
        thread_id,
    })
}

/// Encodes a contains-key response.
pub fn encode_response(response: bool) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_bool(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes a contains-key response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_bool(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_sits_after_backup_acks() {
        let message = encode_response(true);
        let initial = message.initial_frame().unwrap();
        assert_eq!(initial.content.len(), 14);
        assert_eq!(initial.content[13], 1);
        assert!(decode_response(&message).unwrap().response);
        assert!(!decode_response(&encode_response(false)).unwrap().response);
    }

    #[test]
    fn test_short_response_frame_fails() {
        let mut message = ClientMessage::create_for_encode();
        message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE_INITIAL_FRAME_SIZE));
        assert!(decode_response(&message).is_err());
    }

    #[test]
    fn test_request_round_trip() {
        let key = Data::from(vec![3, 1]);
        let params = decode_request(&encode_request("m", &key, -1)).unwrap();
        assert_eq!((params.name.as_str(), params.key, params.thread_id), ("m", key, -1));
    }
}
