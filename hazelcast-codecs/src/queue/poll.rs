//! Removes the head of a queue, waiting up to a timeout.

use hazelcast_protocol::codec::fixed_size::{decode_long, encode_long};
use hazelcast_protocol::codec::{data, nullable, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x030500;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x030501;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Queue.Poll";

const REQUEST: FixedLayout<1> = FixedLayout::request([LONG_SIZE_IN_BYTES]);
const REQUEST_TIMEOUT_MILLIS_OFFSET: usize = REQUEST.offset(0);
const RESPONSE: FixedLayout<0> = FixedLayout::response([]);

/// Parameters of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Queue name.
    pub name: String,
    /// How long to wait for an element, in milliseconds.
    pub timeout_millis: i64,
}

/// Result of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParameters {
    /// The removed head, or `None` if the queue stayed empty.
    pub response: Option<Data>,
}

/// Encodes a poll request.
pub fn encode_request(name: &str, timeout_millis: i64) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_TIMEOUT_MILLIS_OFFSET, timeout_millis);
    message.add(initial);
    string::encode(&mut message, name);
    message
}

/// Decodes a poll request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let timeout_millis = decode_long(&initial.content, REQUEST_TIMEOUT_MILLIS_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        timeout_millis,
    })
}

/// Encodes a poll response.
pub fn encode_response(response: Option<&Data>) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size()));
    nullable::encode_nullable(&mut message, response, data::encode);
    message
}

/// Decodes a poll response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (mut iterator, _) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: nullable::decode_nullable(&mut iterator, data::decode)?,
    })
}
