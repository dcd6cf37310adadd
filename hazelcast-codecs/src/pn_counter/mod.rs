//! CRDT positive-negative counter operations.
//!
//! Requests carry the replica timestamps the client has observed, a vector
//! clock that gives the session monotonic reads. Responses return the
//! updated clock.

pub mod add;
pub mod get;

use uuid::Uuid;

use hazelcast_protocol::codec::entry_list;
use hazelcast_protocol::codec::fixed_size::{decode_int, decode_long, encode_int, encode_long};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use crate::util;

const RESPONSE: FixedLayout<2> = FixedLayout::response([LONG_SIZE_IN_BYTES, INT_SIZE_IN_BYTES]);
const RESPONSE_VALUE_OFFSET: usize = RESPONSE.offset(0);
const RESPONSE_REPLICA_COUNT_OFFSET: usize = RESPONSE.offset(1);

/// Counter value and vector clock returned by every counter operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterResponse {
    /// Counter value.
    pub value: i64,
    /// Last observed timestamp per replica.
    pub replica_timestamps: Vec<(Uuid, i64)>,
    /// Number of replicas the counter is configured with.
    pub replica_count: i32,
}

fn encode_response(message_type: i32, response: &CounterResponse) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(message_type, RESPONSE.frame_size());
    encode_long(&mut initial.content, RESPONSE_VALUE_OFFSET, response.value);
    encode_int(&mut initial.content, RESPONSE_REPLICA_COUNT_OFFSET, response.replica_count);
    message.add(initial);
    entry_list::encode_fixed(&mut message, &response.replica_timestamps);
    message
}

fn decode_response(message: &ClientMessage, message_type: i32) -> Result<CounterResponse> {
    let (mut iterator, initial) = util::open(message, message_type)?;
    let value = decode_long(&initial.content, RESPONSE_VALUE_OFFSET)?;
    let replica_count = decode_int(&initial.content, RESPONSE_REPLICA_COUNT_OFFSET)?;
    Ok(CounterResponse {
        value,
        replica_timestamps: entry_list::decode_fixed(&mut iterator)?,
        replica_count,
    })
}
