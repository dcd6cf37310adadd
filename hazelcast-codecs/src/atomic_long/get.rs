//! Reads the current value.

use hazelcast_protocol::codec::custom::{CustomCodec, RaftGroupId};
use hazelcast_protocol::codec::fixed_size::{decode_long, encode_long};
use hazelcast_protocol::codec::string;
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x090500;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x090501;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "AtomicLong.Get";

const REQUEST: FixedLayout<0> = FixedLayout::request([]);
const RESPONSE: FixedLayout<1> = FixedLayout::response([LONG_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Raft group owning the atomic long.
    pub group_id: RaftGroupId,
    /// Atomic long name.
    pub name: String,
}

/// Result of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Current value.
    pub response: i64,
}

/// Encodes a read request.
pub fn encode_request(group_id: &RaftGroupId, name: &str) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    message.add(util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size()));
    RaftGroupId::encode(&mut message, group_id);
    string::encode(&mut message, name);
    message
}

/// Decodes a read request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, _) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        group_id: RaftGroupId::decode(&mut iterator)?,
        name: string::decode(&mut iterator)?,
    })
}

/// Encodes a read response.
pub fn encode_response(response: i64) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_long(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes a read response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_long(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}
