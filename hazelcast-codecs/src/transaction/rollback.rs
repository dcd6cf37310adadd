//! Rolls a transaction back.

use uuid::Uuid;

use hazelcast_protocol::codec::fixed_size::{decode_long, decode_uuid, encode_long, encode_uuid};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, ProtocolError, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x150300;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x150301;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Transaction.Rollback";

const REQUEST: FixedLayout<2> = FixedLayout::request([UUID_SIZE_IN_BYTES, LONG_SIZE_IN_BYTES]);
const REQUEST_TRANSACTION_ID_OFFSET: usize = REQUEST.offset(0);
const REQUEST_THREAD_ID_OFFSET: usize = REQUEST.offset(1);
const RESPONSE: FixedLayout<0> = FixedLayout::response([]);

/// Parameters of a rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestParameters {
    /// Transaction id returned by create.
    pub transaction_id: Uuid,
    /// Id of the thread owning the transaction.
    pub thread_id: i64,
}

/// Encodes a rollback request.
pub fn encode_request(transaction_id: Uuid, thread_id: i64) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_uuid(&mut initial.content, REQUEST_TRANSACTION_ID_OFFSET, Some(transaction_id));
    encode_long(&mut initial.content, REQUEST_THREAD_ID_OFFSET, thread_id);
    message.add(initial);
    message
}

/// Decodes a rollback request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (_, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        transaction_id: decode_uuid(&initial.content, REQUEST_TRANSACTION_ID_OFFSET)?
            .ok_or(ProtocolError::UnexpectedNull("transaction id"))?,
        thread_id: decode_long(&initial.content, REQUEST_THREAD_ID_OFFSET)?,
    })
}

/// Encodes the empty rollback acknowledgement.
pub fn encode_response() -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size()));
    message
}

/// Checks a rollback acknowledgement.
pub fn decode_response(message: &ClientMessage) -> Result<()> {
    util::open(message, RESPONSE_MESSAGE_TYPE).map(|_| ())
}
