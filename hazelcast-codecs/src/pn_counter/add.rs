//! Adds a delta to the counter.

use uuid::Uuid;

use hazelcast_protocol::codec::custom::{Address, CustomCodec};
use hazelcast_protocol::codec::fixed_size::{decode_bool, decode_long, encode_bool, encode_long};
use hazelcast_protocol::codec::{entry_list, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use super::CounterResponse;
use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x1D0200;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x1D0201;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "PNCounter.Add";

const REQUEST: FixedLayout<2> = FixedLayout::request([LONG_SIZE_IN_BYTES, BOOLEAN_SIZE_IN_BYTES]);
const REQUEST_DELTA_OFFSET: usize = REQUEST.offset(0);
const REQUEST_GET_BEFORE_UPDATE_OFFSET: usize = REQUEST.offset(1);

/// Parameters of a counter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Counter name.
    pub name: String,
    /// Amount to add; negative to subtract.
    pub delta: i64,
    /// Whether the response holds the value before the update.
    pub get_before_update: bool,
    /// Vector clock observed so far.
    pub replica_timestamps: Vec<(Uuid, i64)>,
    /// Replica to update, or `None` to let the member pick.
    pub target_replica: Option<Address>,
}

/// Result of a counter update.
pub type ResponseParameters = CounterResponse;

/// Encodes a counter update.
pub fn encode_request(
    name: &str,
    delta: i64,
    get_before_update: bool,
    replica_timestamps: &[(Uuid, i64)],
    target_replica: Option<&Address>,
) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_DELTA_OFFSET, delta);
    encode_bool(&mut initial.content, REQUEST_GET_BEFORE_UPDATE_OFFSET, get_before_update);
    message.add(initial);
    string::encode(&mut message, name);
    entry_list::encode_fixed(&mut message, replica_timestamps);
    Address::encode_nullable(&mut message, target_replica);
    message
}

/// Decodes a counter update.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let delta = decode_long(&initial.content, REQUEST_DELTA_OFFSET)?;
    let get_before_update = decode_bool(&initial.content, REQUEST_GET_BEFORE_UPDATE_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        delta,
        get_before_update,
        replica_timestamps: entry_list::decode_fixed(&mut iterator)?,
        target_replica: Address::decode_nullable(&mut iterator)?,
    })
}

/// Encodes a counter update response.
pub fn encode_response(response: &ResponseParameters) -> ClientMessage {
    super::encode_response(RESPONSE_MESSAGE_TYPE, response)
}

/// Decodes a counter update response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    super::decode_response(message, RESPONSE_MESSAGE_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_field_offsets() {
        let message = encode_request("q", -5, true, &[], None);
        let content = &message.frames()[0].content;
        assert_eq!(content.len(), REQUEST_INITIAL_FRAME_SIZE + 9);
        assert_eq!(content[16..24], (-5i64).to_le_bytes());
        assert_eq!(content[24], 1);
    }

    #[test]
    fn test_empty_clock_and_absent_target() {
        let message = encode_request("q", -5, true, &[], None);
        // initial, name, empty keys, empty values, null address
        assert_eq!(message.frame_count(), 5);
        assert!(message.frames()[4].is_null_frame());

        let params = decode_request(&message).unwrap();
        assert!(params.replica_timestamps.is_empty());
        assert_eq!(params.target_replica, None);
    }

    #[test]
    fn test_response_round_trip() {
        let response = CounterResponse {
            value: -5,
            replica_timestamps: vec![(Uuid::from_u128(1), 3), (Uuid::from_u128(2), 8)],
            replica_count: 2,
        };
        let message = encode_response(&response);
        assert_eq!(decode_response(&message).unwrap(), response);
        assert!(crate::pn_counter::get::decode_response(&message).is_err());
    }
}
