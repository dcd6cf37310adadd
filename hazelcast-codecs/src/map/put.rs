//! Puts an entry into a map, returning the previous value.

use hazelcast_protocol::codec::fixed_size::{decode_long, encode_long};
use hazelcast_protocol::codec::{data, nullable, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x010100;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x010101;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.Put";

const REQUEST: FixedLayout<2> = FixedLayout::request([LONG_SIZE_IN_BYTES, LONG_SIZE_IN_BYTES]);
const REQUEST_THREAD_ID_OFFSET: usize = REQUEST.offset(0);
const REQUEST_TTL_OFFSET: usize = REQUEST.offset(1);

/// Parameters of a map put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
    /// Serialized key.
    pub key: Data,
    /// Serialized value.
    pub value: Data,
    /// Id of the calling thread, for lock ownership.
    pub thread_id: i64,
    /// Time to live in milliseconds; negative uses the map default.
    pub ttl: i64,
}

/// Result of a map put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Previous value, absent if the key was not mapped.
    pub response: Option<Data>,
}

/// Encodes a map put request.
pub fn encode_request(
    name: &str,
    key: &Data,
    value: &Data,
    thread_id: i64,
    ttl: i64,
) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_THREAD_ID_OFFSET, thread_id);
    encode_long(&mut initial.content, REQUEST_TTL_OFFSET, ttl);
    message.add(initial);
    string::encode(&mut message, name);
    data::encode(&mut message, key);
    data::encode(&mut message, value);
    message
}

/// Decodes a map put request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let thread_id = decode_long(&initial.content, REQUEST_THREAD_ID_OFFSET)?;
    let ttl = decode_long(&initial.content, REQUEST_TTL_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        key: data::decode(&mut iterator)?,
        value: data::decode(&mut iterator)?,
        thread_id,
        ttl,
    })
}

/// Encodes a map put response.
pub fn encode_response(response: Option<&Data>) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE_INITIAL_FRAME_SIZE));
    nullable::encode_nullable(&mut message, response, data::encode);
    message
}

/// Decodes a map put response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (mut iterator, _) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: nullable::decode_nullable(&mut iterator, data::decode)?,
    })
}
