//! Keys of a map as seen by a transaction.

use uuid::Uuid;

use hazelcast_protocol::codec::fixed_size::{decode_long, decode_uuid, encode_long, encode_uuid};
use hazelcast_protocol::codec::{data, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, ProtocolError, Result};

use super::LIST_ENCODING;
use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x0E0E00;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x0E0E01;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "TransactionalMap.KeySet";

const REQUEST: FixedLayout<2> = FixedLayout::request([UUID_SIZE_IN_BYTES, LONG_SIZE_IN_BYTES]);
const REQUEST_TXN_ID_OFFSET: usize = REQUEST.offset(0);
const REQUEST_THREAD_ID_OFFSET: usize = REQUEST.offset(1);
const RESPONSE: FixedLayout<0> = FixedLayout::response([]);

/// Parameters of a transactional key set query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
    /// Transaction id.
    pub txn_id: Uuid,
    /// Id of the thread owning the transaction.
    pub thread_id: i64,
}

/// Result of a transactional key set query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Serialized keys.
    pub response: Vec<Data>,
}

/// Encodes a key set query.
pub fn encode_request(name: &str, txn_id: Uuid, thread_id: i64) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_uuid(&mut initial.content, REQUEST_TXN_ID_OFFSET, Some(txn_id));
    encode_long(&mut initial.content, REQUEST_THREAD_ID_OFFSET, thread_id);
    message.add(initial);
    string::encode(&mut message, name);
    message
}

/// Decodes a key set query.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let txn_id = decode_uuid(&initial.content, REQUEST_TXN_ID_OFFSET)?
        .ok_or(ProtocolError::UnexpectedNull("transaction id"))?;
    let thread_id = decode_long(&initial.content, REQUEST_THREAD_ID_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        txn_id,
        thread_id,
    })
}

/// Encodes the key set.
pub fn encode_response(response: &[Data]) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size()));
    LIST_ENCODING.encode(&mut message, response, data::encode);
    message
}

/// Decodes the key set.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (mut iterator, _) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: LIST_ENCODING.decode(&mut iterator, data::decode)?,
    })
}
