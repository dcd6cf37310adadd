//! Subscription to the messages published on a topic.

use std::fmt;

use tracing::warn;
use uuid::Uuid;

use hazelcast_protocol::codec::fixed_size::{
    decode_bool, decode_long, decode_uuid, encode_bool, encode_long, encode_uuid,
};
use hazelcast_protocol::codec::{data, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, ProtocolError, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x040200;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x040201;
/// Topic message event type.
pub const EVENT_TOPIC_MESSAGE_TYPE: i32 = 0x040202;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Topic.AddMessageListener";

const REQUEST: FixedLayout<1> = FixedLayout::request([BOOLEAN_SIZE_IN_BYTES]);
const REQUEST_LOCAL_ONLY_OFFSET: usize = REQUEST.offset(0);
const RESPONSE: FixedLayout<1> = FixedLayout::response([UUID_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);
const EVENT_TOPIC: FixedLayout<2> = FixedLayout::event([LONG_SIZE_IN_BYTES, UUID_SIZE_IN_BYTES]);
const EVENT_TOPIC_PUBLISH_TIME_OFFSET: usize = EVENT_TOPIC.offset(0);
const EVENT_TOPIC_UUID_OFFSET: usize = EVENT_TOPIC.offset(1);

/// Parameters of a message listener registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Topic name.
    pub name: String,
    /// Whether only messages published through the connected member are
    /// reported.
    pub local_only: bool,
}

/// Result of a message listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Registration id.
    pub response: Uuid,
}

/// A message published on the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEvent {
    /// Serialized message.
    pub item: Data,
    /// Publish time in milliseconds since the epoch.
    pub publish_time: i64,
    /// Member the message was published through.
    pub uuid: Uuid,
}

/// Events pushed to a topic message listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A message was published.
    Topic(TopicEvent),
}

/// Encodes a message listener registration.
pub fn encode_request(name: &str, local_only: bool) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_bool(&mut initial.content, REQUEST_LOCAL_ONLY_OFFSET, local_only);
    message.add(initial);
    string::encode(&mut message, name);
    message
}

/// Decodes a message listener registration.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let local_only = decode_bool(&initial.content, REQUEST_LOCAL_ONLY_OFFSET)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        local_only,
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

/// Encodes a topic message event.
pub fn encode_topic_event(event: &TopicEvent) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::event_frame(EVENT_TOPIC_MESSAGE_TYPE, EVENT_TOPIC.frame_size());
    encode_long(&mut initial.content, EVENT_TOPIC_PUBLISH_TIME_OFFSET, event.publish_time);
    encode_uuid(&mut initial.content, EVENT_TOPIC_UUID_OFFSET, Some(event.uuid));
    message.add(initial);
    data::encode(&mut message, &event.item);
    message
}

/// Decodes an event pushed to this listener.
///
/// Unknown event types are logged and yield `Ok(None)`.
pub fn decode_event(message: &ClientMessage) -> Result<Option<Event>> {
    let message_type = util::event_message_type(
        message,
        EVENT_TOPIC_MESSAGE_TYPE,
        [REQUEST_MESSAGE_TYPE, RESPONSE_MESSAGE_TYPE],
    )?;
    match message_type {
        EVENT_TOPIC_MESSAGE_TYPE => {
            let (mut iterator, initial) = util::open_event(message)?;
            let publish_time = decode_long(&initial.content, EVENT_TOPIC_PUBLISH_TIME_OFFSET)?;
            let uuid = decode_uuid(&initial.content, EVENT_TOPIC_UUID_OFFSET)?
                .ok_or(ProtocolError::UnexpectedNull("publishing member uuid"))?;
            Ok(Some(Event::Topic(TopicEvent {
                item: data::decode(&mut iterator)?,
                publish_time,
                uuid,
            })))
        }
        message_type => {
            warn!(?message_type, operation = OPERATION_NAME, "ignoring unknown event type");
            Ok(None)
        }
    }
}

type Callback = Box<dyn Fn(TopicEvent) + Send + Sync>;

/// Routes topic messages to a closure.
pub struct EventHandler {
    on_message: Callback,
}

impl EventHandler {
    /// Creates a handler invoking `f` for every published message.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(TopicEvent) + Send + Sync + 'static,
    {
        Self {
            on_message: Box::new(f),
        }
    }

    /// Decodes `message` and invokes the callback.
    pub fn handle(&self, message: &ClientMessage) -> Result<()> {
        if let Some(Event::Topic(event)) = decode_event(message)? {
            (self.on_message)(event);
        }
        Ok(())
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler").finish_non_exhaustive()
    }
}
