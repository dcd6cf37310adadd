//! Inserts an element at the tail of a queue.

use hazelcast_protocol::codec::fixed_size::{decode_bool, decode_long, encode_bool, encode_long};
use hazelcast_protocol::codec::{data, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x030100;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x030101;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Queue.Offer";

const REQUEST: FixedLayout<1> = FixedLayout::request([LONG_SIZE_IN_BYTES]);
const REQUEST_TIMEOUT_MILLIS_OFFSET: usize = REQUEST.offset(0);
const RESPONSE: FixedLayout<1> = FixedLayout::response([BOOLEAN_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Queue name.
    pub name: String,
    /// Serialized element.
    pub value: Data,
    /// How long to wait for space, in milliseconds.
    pub timeout_millis: i64,
}

/// Result of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Whether the element was added.
    pub response: bool,
}

/// Encodes an offer request.
pub fn encode_request(name: &str, value: &Data, timeout_millis: i64) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_TIMEOUT_MILLIS_OFFSET, timeout_millis);
    message.add(initial);
    string::encode(&mut message, name);
    data::encode(&mut message, value);
    message
}

/// Decodes an offer request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let timeout_millis = decode_long(&initial.content, REQUEST_TIMEOUT_MILLIS_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        value: data::decode(&mut iterator)?,
        timeout_millis,
    })
}

/// Encodes an offer response.
pub fn encode_response(response: bool) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_bool(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes an offer response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_bool(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}
