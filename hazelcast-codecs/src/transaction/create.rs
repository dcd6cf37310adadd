//! Starts a transaction.

use uuid::Uuid;

use hazelcast_protocol::codec::fixed_size::{
    decode_int, decode_long, decode_uuid, encode_int, encode_long, encode_uuid,
};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, ProtocolError, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x150200;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x150201;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Transaction.Create";

const REQUEST: FixedLayout<4> = FixedLayout::request([
    LONG_SIZE_IN_BYTES,
    INT_SIZE_IN_BYTES,
    INT_SIZE_IN_BYTES,
    LONG_SIZE_IN_BYTES,
]);
const REQUEST_TIMEOUT_OFFSET: usize = REQUEST.offset(0);
const REQUEST_DURABILITY_OFFSET: usize = REQUEST.offset(1);
const REQUEST_TRANSACTION_TYPE_OFFSET: usize = REQUEST.offset(2);
const REQUEST_THREAD_ID_OFFSET: usize = REQUEST.offset(3);
const RESPONSE: FixedLayout<1> = FixedLayout::response([UUID_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of a transaction start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestParameters {
    /// Timeout in milliseconds.
    pub timeout: i64,
    /// Number of transaction log backups.
    pub durability: i32,
    /// [`TWO_PHASE`](super::TWO_PHASE) or [`ONE_PHASE`](super::ONE_PHASE).
    pub transaction_type: i32,
    /// Id of the thread owning the transaction.
    pub thread_id: i64,
}

/// Result of a transaction start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Transaction id.
    pub response: Uuid,
}

/// Encodes a transaction start.
pub fn encode_request(
    timeout: i64,
    durability: i32,
    transaction_type: i32,
    thread_id: i64,
) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_long(&mut initial.content, REQUEST_TIMEOUT_OFFSET, timeout);
    encode_int(&mut initial.content, REQUEST_DURABILITY_OFFSET, durability);
    encode_int(&mut initial.content, REQUEST_TRANSACTION_TYPE_OFFSET, transaction_type);
    encode_long(&mut initial.content, REQUEST_THREAD_ID_OFFSET, thread_id);
    message.add(initial);
    message
}

/// Decodes a transaction start.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (_, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let content = &initial.content;
    Ok(RequestParameters {
        timeout: decode_long(content, REQUEST_TIMEOUT_OFFSET)?,
        durability: decode_int(content, REQUEST_DURABILITY_OFFSET)?,
        transaction_type: decode_int(content, REQUEST_TRANSACTION_TYPE_OFFSET)?,
        thread_id: decode_long(content, REQUEST_THREAD_ID_OFFSET)?,
    })
}

/// Encodes the new transaction id.
pub fn encode_response(response: Uuid) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_uuid(&mut initial.content, RESPONSE_RESPONSE_OFFSET, Some(response));
    message.add(initial);
    message
}

/// Decodes the new transaction id.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_uuid(&initial.content, RESPONSE_RESPONSE_OFFSET)?
            .ok_or(ProtocolError::UnexpectedNull("transaction id"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{DEFAULT_DURABILITY, TWO_PHASE};

    #[test]
    fn test_single_frame_request() {
        let message = encode_request(120_000, DEFAULT_DURABILITY, TWO_PHASE, 1);
        assert_eq!(message.frame_count(), 1);
        assert_eq!(message.frames()[0].content.len(), REQUEST_INITIAL_FRAME_SIZE + 24);

        let params = decode_request(&message).unwrap();
        assert_eq!(
            params,
            RequestParameters {
                timeout: 120_000,
                durability: 1,
                transaction_type: 1,
                thread_id: 1,
            }
        );
    }

    #[test]
    fn test_null_transaction_id_fails() {
        let mut message = encode_response(Uuid::nil());
        let content = &mut message.frames_mut()[0].content;
        content[RESPONSE_RESPONSE_OFFSET] = 1;
        assert!(matches!(
            decode_response(&message),
            Err(ProtocolError::UnexpectedNull(_))
        ));
    }
}
