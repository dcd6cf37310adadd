//! Reads the value mapped to a key.

use hazelcast_protocol::codec::fixed_size::{decode_long, encode_long};
use hazelcast_protocol::codec::{data, nullable, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x010200;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x010201;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.Get";

const REQUEST: FixedLayout<1> = FixedLayout::request([LONG_SIZE_IN_BYTES]);
const REQUEST_THREAD_ID_OFFSET: usize = REQUEST.offset(0);

/// Parameters of a map get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
    /// Serialized key.
    pub key: Data,
    /// Id of the calling thread.
    pub thread_id: i64,
}

/// Result of a map get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Mapped value, absent if the key is not mapped.
    pub response: Option<Data>,
}

/// Encodes a map get request.
pub fn encode_request(name: &str, key: &Data, thread_id: i64) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_THREAD_ID_OFFSET, thread_id);
    message.add(initial);
    string::encode(&mut message, name);
    data::encode(&mut message, key);
    message
}

/// Decodes a map get request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let thread_id = decode_long(&initial.content, REQUEST_THREAD_ID_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        key: data::decode(&mut iterator)?,
        thread_id,
    })
}

/// Encodes a map get response.
pub fn encode_response(response: Option<&Data>) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE_INITIAL_FRAME_SIZE));
    nullable::encode_nullable(&mut message, response, data::encode);
    message
}

/// Decodes a map get response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (mut iterator, _) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: nullable::decode_nullable(&mut iterator, data::decode)?,
    })
}
