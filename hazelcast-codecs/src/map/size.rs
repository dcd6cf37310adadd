//! Counts the entries of a map.

use hazelcast_protocol::codec::fixed_size::{decode_int, encode_int};
use hazelcast_protocol::codec::string;
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x012A00;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x012A01;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.Size";

const RESPONSE: FixedLayout<1> = FixedLayout::response([INT_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of a map size query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
}

/// Result of a map size query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Number of entries.
    pub response: i32,
}

/// Encodes a map size request.
pub fn encode_request(name: &str) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    message.add(util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST_INITIAL_FRAME_SIZE));
    string::encode(&mut message, name);
    message
}

/// Decodes a map size request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, _) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
    })
}

/// Encodes a map size response.
pub fn encode_response(response: i32) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_int(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes a map size response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_int(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}
