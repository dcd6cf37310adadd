//! Copies a batch of entries into a map.

use hazelcast_protocol::codec::fixed_size::{decode_bool, encode_bool};
use hazelcast_protocol::codec::{data, entry_list, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x012C00;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x012C01;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.PutAll";

const REQUEST: FixedLayout<1> = FixedLayout::request([BOOLEAN_SIZE_IN_BYTES]);
const REQUEST_TRIGGER_MAP_LOADER_OFFSET: usize = REQUEST.offset(0);

/// Parameters of a map put-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
    /// Serialized entries, in iteration order.
    pub entries: Vec<(Data, Data)>,
    /// Whether a configured map loader runs for the written keys.
    pub trigger_map_loader: bool,
}

/// Encodes a map put-all request.
pub fn encode_request(
    name: &str,
    entries: &[(Data, Data)],
    trigger_map_loader: bool,
) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_bool(
        &mut initial.content,
        REQUEST_TRIGGER_MAP_LOADER_OFFSET,
        trigger_map_loader,
    );
    message.add(initial);
    string::encode(&mut message, name);
    entry_list::encode(&mut message, entries, data::encode, data::encode);
    message
}

/// Decodes a map put-all request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let trigger_map_loader = decode_bool(&initial.content, REQUEST_TRIGGER_MAP_LOADER_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        entries: entry_list::decode(&mut iterator, data::decode, data::decode)?,
        trigger_map_loader,
    })
}

/// Encodes the empty put-all response.
pub fn encode_response() -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE_INITIAL_FRAME_SIZE));
    message
}

/// Checks a put-all response.
pub fn decode_response(message: &ClientMessage) -> Result<()> {
    util::open(message, RESPONSE_MESSAGE_TYPE).map(|_| ())
}
