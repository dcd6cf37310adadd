//! Removes a map entry listener.

use uuid::Uuid;

use hazelcast_protocol::codec::fixed_size::{decode_bool, decode_uuid, encode_bool, encode_uuid};
use hazelcast_protocol::codec::string;
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, ProtocolError, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x011A00;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x011A01;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.RemoveEntryListener";

const REQUEST: FixedLayout<1> = FixedLayout::request([UUID_SIZE_IN_BYTES]);
const REQUEST_REGISTRATION_ID_OFFSET: usize = REQUEST.offset(0);
const RESPONSE: FixedLayout<1> = FixedLayout::response([BOOLEAN_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

/// Parameters of a listener removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
    /// Id returned when the listener was added.
    pub registration_id: Uuid,
}

/// Result of a listener removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Whether a registration was removed.
    pub response: bool,
}

/// Encodes a listener removal.
pub fn encode_request(name: &str, registration_id: Uuid) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_uuid(&mut initial.content, REQUEST_REGISTRATION_ID_OFFSET, Some(registration_id));
    message.add(initial);
    string::encode(&mut message, name);
    message
}

/// Decodes a listener removal.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let registration_id = decode_uuid(&initial.content, REQUEST_REGISTRATION_ID_OFFSET)?
        .ok_or(ProtocolError::UnexpectedNull("registration id"))?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        registration_id,
    })
}

/// Encodes a listener removal response.
pub fn encode_response(response: bool) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_bool(&mut initial.content, RESPONSE_RESPONSE_OFFSET, response);
    message.add(initial);
    message
}

/// Decodes a listener removal response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_bool(&initial.content, RESPONSE_RESPONSE_OFFSET)?,
    })
}
