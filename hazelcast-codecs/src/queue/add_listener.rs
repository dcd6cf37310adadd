//! Subscription to item events of a queue.

use std::fmt;

use tracing::warn;
use uuid::Uuid;

use hazelcast_protocol::codec::fixed_size::{
    decode_bool, decode_int, decode_uuid, encode_bool, encode_int, encode_uuid,
};
use hazelcast_protocol::codec::{data, nullable, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, ProtocolError, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x031100;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x031101;
/// Item event message type.
pub const EVENT_ITEM_MESSAGE_TYPE: i32 = 0x031102;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Queue.AddListener";

/// Event type of an added item.
pub const ITEM_ADDED: i32 = 1;
/// Event type of a removed item.
pub const ITEM_REMOVED: i32 = 2;

const REQUEST: FixedLayout<2> =
    FixedLayout::request([BOOLEAN_SIZE_IN_BYTES, BOOLEAN_SIZE_IN_BYTES]);
const REQUEST_INCLUDE_VALUE_OFFSET: usize = REQUEST.offset(0);
const REQUEST_LOCAL_ONLY_OFFSET: usize = REQUEST.offset(1);
const RESPONSE: FixedLayout<1> = FixedLayout::response([UUID_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);
const EVENT_ITEM: FixedLayout<2> = FixedLayout::event([UUID_SIZE_IN_BYTES, INT_SIZE_IN_BYTES]);
const EVENT_ITEM_UUID_OFFSET: usize = EVENT_ITEM.offset(0);
const EVENT_ITEM_EVENT_TYPE_OFFSET: usize = EVENT_ITEM.offset(1);

/// Parameters of an item listener registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Queue name.
    pub name: String,
    /// Whether events carry the item.
    pub include_value: bool,
    /// Whether only items owned by the connected member are reported.
    pub local_only: bool,
}

/// Result of an item listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Registration id.
    pub response: Uuid,
}

/// An item was added to or removed from the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEvent {
    /// The item, when values are included.
    pub item: Option<Data>,
    /// Member that produced the event.
    pub uuid: Uuid,
    /// [`ITEM_ADDED`] or [`ITEM_REMOVED`].
    pub event_type: i32,
}

/// Events pushed to a queue item listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An item changed.
    Item(ItemEvent),
}

/// Encodes an item listener registration.
pub fn encode_request(name: &str, include_value: bool, local_only: bool) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_bool(&mut initial.content, REQUEST_INCLUDE_VALUE_OFFSET, include_value);
    encode_bool(&mut initial.content, REQUEST_LOCAL_ONLY_OFFSET, local_only);
    message.add(initial);
    string::encode(&mut message, name);
    message
}

/// Decodes an item listener registration.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        include_value: decode_bool(&initial.content, REQUEST_INCLUDE_VALUE_OFFSET)?,
        local_only: decode_bool(&initial.content, REQUEST_LOCAL_ONLY_OFFSET)?,
        name: string::decode(&mut iterator)?,
    })
}

/// Encodes the registration id.
pub fn encode_response(response: Uuid) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_uuid(&mut initial.content, RESPONSE_RESPONSE_OFFSET, Some(response));
    message.add(initial);
    message
}

/// Decodes the registration id.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (_, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: decode_uuid(&initial.content, RESPONSE_RESPONSE_OFFSET)?
            .ok_or(ProtocolError::UnexpectedNull("registration id"))?,
    })
}

/// Encodes an item event.
pub fn encode_item_event(item: Option<&Data>, uuid: Uuid, event_type: i32) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::event_frame(EVENT_ITEM_MESSAGE_TYPE, EVENT_ITEM.frame_size());
    encode_uuid(&mut initial.content, EVENT_ITEM_UUID_OFFSET, Some(uuid));
    encode_int(&mut initial.content, EVENT_ITEM_EVENT_TYPE_OFFSET, event_type);
    message.add(initial);
    nullable::encode_nullable(&mut message, item, data::encode);
    message
}

/// Decodes an event pushed to this listener.
///
/// Unknown event types are logged and yield `Ok(None)`.
pub fn decode_event(message: &ClientMessage) -> Result<Option<Event>> {
    let message_type = util::event_message_type(
        message,
        EVENT_ITEM_MESSAGE_TYPE,
        [REQUEST_MESSAGE_TYPE, RESPONSE_MESSAGE_TYPE],
    )?;
    match message_type {
        EVENT_ITEM_MESSAGE_TYPE => {
            let (mut iterator, initial) = util::open_event(message)?;
            let uuid = decode_uuid(&initial.content, EVENT_ITEM_UUID_OFFSET)?
                .ok_or(ProtocolError::UnexpectedNull("event member uuid"))?;
            let event_type = decode_int(&initial.content, EVENT_ITEM_EVENT_TYPE_OFFSET)?;
            Ok(Some(Event::Item(ItemEvent {
                item: nullable::decode_nullable(&mut iterator, data::decode)?,
                uuid,
                event_type,
            })))
        }
        message_type => {
            warn!(?message_type, operation = OPERATION_NAME, "ignoring unknown event type");
            Ok(None)
        }
    }
}

type Callback = Box<dyn Fn(ItemEvent) + Send + Sync>;

/// Routes item events to closures.
pub struct EventHandler {
    on_item: Option<Callback>,
}

impl EventHandler {
    /// Creates a handler invoking `f` for every item event.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(ItemEvent) + Send + Sync + 'static,
    {
        Self {
            on_item: Some(Box::new(f)),
        }
    }

    /// Creates a handler that decodes events and discards them.
    pub fn ignoring() -> Self {
        Self { on_item: None }
    }

    /// Decodes `message` and invokes the callback.
    pub fn handle(&self, message: &ClientMessage) -> Result<()> {
        if let Some(Event::Item(event)) = decode_event(message)? {
            if let Some(f) = &self.on_item {
                f(event);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("on_item", &self.on_item.is_some())
            .finish()
    }
}
