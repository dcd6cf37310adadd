//! Number of elements in a queue.

use hazelcast_protocol::codec::fixed_size::{decode_int, encode_int};
use hazelcast_protocol::codec::string;
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x030300;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x030301;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Queue.Size";

const REQUEST: FixedLayout<0> = FixedLayout::request([]);
const RESPONSE: FixedLayout<1> = FixedLayout::response([INT_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of a size query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Queue name.
    pub name: String,
}

/// Result of a size query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Number of elements.
    pub response: i32,
}

/// Encodes a size request.
pub fn encode_request(name: &str) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    message.add(util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size()));
    string::encode(&mut message, name);
    message
}

/// Decodes a size request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, _) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
    })
}

/// Encodes a size response.
pub fn encode_response(response: i32) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_int(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes a size response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_int(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}
