//! Atomically adds a delta and returns the new value.

use hazelcast_protocol::codec::custom::{CustomCodec, RaftGroupId};
use hazelcast_protocol::codec::fixed_size::{decode_long, encode_long};
use hazelcast_protocol::codec::string;
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x090300;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x090301;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "AtomicLong.AddAndGet";

const REQUEST: FixedLayout<1> = FixedLayout::request([LONG_SIZE_IN_BYTES]);
const REQUEST_DELTA_OFFSET: usize = REQUEST.offset(0);
const RESPONSE: FixedLayout<1> = FixedLayout::response([LONG_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of an add-and-get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Raft group owning the atomic long.
    pub group_id: RaftGroupId,
    /// Atomic long name.
    pub name: String,
    /// Amount to add.
    pub delta: i64,
}

/// Result of an add-and-get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Value after the addition.
    pub response: i64,
}

/// Encodes an add-and-get request.
pub fn encode_request(group_id: &RaftGroupId, name: &str, delta: i64) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_DELTA_OFFSET, delta);
    message.add(initial);
    RaftGroupId::encode(&mut message, group_id);
    string::encode(&mut message, name);
    message
}

/// Decodes an add-and-get request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let delta = decode_long(&initial.content, REQUEST_DELTA_OFFSET)?;
    Ok(RequestParameters {
        group_id: RaftGroupId::decode(&mut iterator)?,
        name: string::decode(&mut iterator)?,
        delta,
    })
}

/// Encodes an add-and-get response.
pub fn encode_response(response: i64) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_long(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes an add-and-get response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_long(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}
