//! Reads the counter value.

use uuid::Uuid;

use hazelcast_protocol::codec::custom::{Address, CustomCodec};
use hazelcast_protocol::codec::{entry_list, string};
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use super::CounterResponse;
use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x1D0100;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x1D0101;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "PNCounter.Get";

const REQUEST: FixedLayout<0> = FixedLayout::request([]);

/// Parameters of a counter read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Counter name.
    pub name: String,
    /// Vector clock observed so far.
    pub replica_timestamps: Vec<(Uuid, i64)>,
    /// Replica to read from, or `None` to let the member pick.
    pub target_replica: Option<Address>,
}

/// Result of a counter read.
pub type ResponseParameters = CounterResponse;

/// Encodes a counter read.
pub fn encode_request(
    name: &str,
    replica_timestamps: &[(Uuid, i64)],
    target_replica: Option<&Address>,
) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    message.add(util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size()));
    string::encode(&mut message, name);
    entry_list::encode_fixed(&mut message, replica_timestamps);
    Address::encode_nullable(&mut message, target_replica);
    message
}

/// Decodes a counter read.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, _) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        replica_timestamps: entry_list::decode_fixed(&mut iterator)?,
        target_replica: Address::decode_nullable(&mut iterator)?,
    })
}

/// Encodes a counter read response.
pub fn encode_response(response: &ResponseParameters) -> ClientMessage {
    super::encode_response(RESPONSE_MESSAGE_TYPE, response)
}

/// Decodes a counter read response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    super::decode_response(message, RESPONSE_MESSAGE_TYPE)
}
