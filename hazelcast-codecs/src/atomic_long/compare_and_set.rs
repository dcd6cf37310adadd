//! Atomically replaces the value if it equals an expected one.

use hazelcast_protocol::codec::custom::{CustomCodec, RaftGroupId};
use hazelcast_protocol::codec::fixed_size::{decode_bool, decode_long, encode_bool, encode_long};
use hazelcast_protocol::codec::string;
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x090400;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x090401;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "AtomicLong.CompareAndSet";

const REQUEST: FixedLayout<2> = FixedLayout::request([LONG_SIZE_IN_BYTES, LONG_SIZE_IN_BYTES]);
const REQUEST_EXPECTED_OFFSET: usize = REQUEST.offset(0);
const REQUEST_UPDATED_OFFSET: usize = REQUEST.offset(1);
const RESPONSE: FixedLayout<1> = FixedLayout::response([BOOLEAN_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of a compare-and-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Raft group owning the atomic long.
    pub group_id: RaftGroupId,
    /// Atomic long name.
    pub name: String,
    /// Value the atomic long must hold.
    pub expected: i64,
    /// Replacement value.
    pub updated: i64,
}

/// Result of a compare-and-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Whether the value was replaced.
    pub response: bool,
}

/// Encodes a compare-and-set request.
pub fn encode_request(
    group_id: &RaftGroupId,
    name: &str,
    expected: i64,
    updated: i64,
) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_EXPECTED_OFFSET, expected);
    encode_long(&mut initial.content, REQUEST_UPDATED_OFFSET, updated);
    message.add(initial);
    RaftGroupId::encode(&mut message, group_id);
    string::encode(&mut message, name);
    message
}

/// Decodes a compare-and-set request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let expected = decode_long(&initial.content, REQUEST_EXPECTED_OFFSET)?;
    let updated = decode_long(&initial.content, REQUEST_UPDATED_OFFSET)?;
    Ok(RequestParameters {
        group_id: RaftGroupId::decode(&mut iterator)?,
        name: string::decode(&mut iterator)?,
        expected,
        updated,
    })
}

/// Encodes a compare-and-set response.
pub fn encode_response(response: bool) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_bool(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes a compare-and-set response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_bool(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_precedes_updated() {
        let group = RaftGroupId {
            name: "g".to_string(),
            seed: 0,
            id: 1,
        };
        let message = encode_request(&group, "c", 1, 2);
        let content = &message.frames()[0].content;
        assert_eq!(content[16..24], 1i64.to_le_bytes());
        assert_eq!(content[24..32], 2i64.to_le_bytes());

        let params = decode_request(&message).unwrap();
        assert_eq!((params.expected, params.updated), (1, 2));
        assert_eq!(params.group_id, group);
    }

    #[test]
    fn test_response_round_trip() {
        assert!(!decode_response(&encode_response(false)).unwrap().response);
    }
}
