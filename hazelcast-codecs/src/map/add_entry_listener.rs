//! Subscription to entry events of a whole map.

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
pub const REQUEST_MESSAGE_TYPE: i32 = 0x011900;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x011901;
/// Entry event message type.
pub const EVENT_ENTRY_MESSAGE_TYPE: i32 = 0x011902;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.AddEntryListener";

const REQUEST: FixedLayout<3> = FixedLayout::request([
    BOOLEAN_SIZE_IN_BYTES,
    INT_SIZE_IN_BYTES,
    BOOLEAN_SIZE_IN_BYTES,
]);
const REQUEST_INCLUDE_VALUE_OFFSET: usize = REQUEST.offset(0);
const REQUEST_LISTENER_FLAGS_OFFSET: usize = REQUEST.offset(1);
const REQUEST_LOCAL_ONLY_OFFSET: usize = REQUEST.offset(2);

const RESPONSE: FixedLayout<1> = FixedLayout::response([UUID_SIZE_IN_BYTES]);
const RESPONSE_RESPONSE_OFFSET: usize = RESPONSE.offset(0);

const EVENT_ENTRY: FixedLayout<3> =
    FixedLayout::event([INT_SIZE_IN_BYTES, UUID_SIZE_IN_BYTES, INT_SIZE_IN_BYTES]);
const EVENT_ENTRY_EVENT_TYPE_OFFSET: usize = EVENT_ENTRY.offset(0);
const EVENT_ENTRY_UUID_OFFSET: usize = EVENT_ENTRY.offset(1);
const EVENT_ENTRY_AFFECTED_ENTRIES_OFFSET: usize = EVENT_ENTRY.offset(2);

/// Kinds of entry events, as bits of the listener flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EntryEventType {
    /// Entry was added.
    Added = 1,
    /// Entry was removed.
    Removed = 1 << 1,
    /// Entry value was replaced.
    Updated = 1 << 2,
    /// Entry was evicted.
    Evicted = 1 << 3,
    /// Entry expired.
    Expired = 1 << 4,
    /// All entries were evicted.
    EvictAll = 1 << 5,
    /// All entries were cleared.
    ClearAll = 1 << 6,
    /// Entry was merged after a split brain.
    Merged = 1 << 7,
    /// Near cache entry was invalidated.
    Invalidation = 1 << 8,
    /// Entry was loaded by a map loader.
    Loaded = 1 << 9,
}

impl EntryEventType {
    /// Returns the event type for its wire value.
    pub fn from_value(value: i32) -> Option<Self> {
        Some(match value {
            1 => Self::Added,
            2 => Self::Removed,
            4 => Self::Updated,
            8 => Self::Evicted,
            16 => Self::Expired,
            32 => Self::EvictAll,
            64 => Self::ClearAll,
            128 => Self::Merged,
            256 => Self::Invalidation,
            512 => Self::Loaded,
            _ => return None,
        })
    }

    /// Returns the wire value.
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Parameters of an entry listener registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
    /// Whether events carry values.
    pub include_value: bool,
    /// Bitwise OR of [`EntryEventType`] values to subscribe to.
    pub listener_flags: i32,
    /// Whether only entries owned by the connected member are reported.
    pub local_only: bool,
}

/// Result of an entry listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Registration id, used to remove the listener.
    pub response: Uuid,
}

/// An entry event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEvent {
    /// Serialized key.
    pub key: Option<Data>,
    /// New value, when values are included.
    pub value: Option<Data>,
    /// Previous value, when values are included.
    pub old_value: Option<Data>,
    /// Value merged in after a split brain.
    pub merging_value: Option<Data>,
    /// Raw event type; see [`EntryEvent::kind`].
    pub event_type: i32,
    /// Member that produced the event.
    pub uuid: Uuid,
    /// Entries affected by map-wide events.
    pub number_of_affected_entries: i32,
}

impl EntryEvent {
    /// Returns the decoded event type, or `None` for types newer than this
    /// codec.
    pub fn kind(&self) -> Option<EntryEventType> {
        EntryEventType::from_value(self.event_type)
    }
}

/// Events pushed to a map entry listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An entry changed.
    Entry(EntryEvent),
}

/// Encodes an entry listener registration.
pub fn encode_request(
    name: &str,
    include_value: bool,
    listener_flags: i32,
    local_only: bool,
) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_bool(&mut initial.content, REQUEST_INCLUDE_VALUE_OFFSET, include_value);
    encode_int(&mut initial.content, REQUEST_LISTENER_FLAGS_OFFSET, listener_flags);
    encode_bool(&mut initial.content, REQUEST_LOCAL_ONLY_OFFSET, local_only);
    message.add(initial);
    string::encode(&mut message, name);
    message
}

/// Decodes an entry listener registration.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let content = &initial.content;
    Ok(RequestParameters {
        include_value: decode_bool(content, REQUEST_INCLUDE_VALUE_OFFSET)?,
        listener_flags: decode_int(content, REQUEST_LISTENER_FLAGS_OFFSET)?,
        local_only: decode_bool(content, REQUEST_LOCAL_ONLY_OFFSET)?,
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

/// Encodes an entry event.
pub fn encode_entry_event(event: &EntryEvent) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::event_frame(EVENT_ENTRY_MESSAGE_TYPE, EVENT_ENTRY.frame_size());
    encode_int(&mut initial.content, EVENT_ENTRY_EVENT_TYPE_OFFSET, event.event_type);
    encode_uuid(&mut initial.content, EVENT_ENTRY_UUID_OFFSET, Some(event.uuid));
    encode_int(
        &mut initial.content,
        EVENT_ENTRY_AFFECTED_ENTRIES_OFFSET,
        event.number_of_affected_entries,
    );
    message.add(initial);
    nullable::encode_nullable(&mut message, event.key.as_ref(), data::encode);
    nullable::encode_nullable(&mut message, event.value.as_ref(), data::encode);
    nullable::encode_nullable(&mut message, event.old_value.as_ref(), data::encode);
    nullable::encode_nullable(&mut message, event.merging_value.as_ref(), data::encode);
    message
}

fn decode_entry_event(message: &ClientMessage) -> Result<EntryEvent> {
    let (mut iterator, initial) = util::open_event(message)?;
    let content = &initial.content;
    Ok(EntryEvent {
        event_type: decode_int(content, EVENT_ENTRY_EVENT_TYPE_OFFSET)?,
        uuid: decode_uuid(content, EVENT_ENTRY_UUID_OFFSET)?
            .ok_or(ProtocolError::UnexpectedNull("event member uuid"))?,
        number_of_affected_entries: decode_int(content, EVENT_ENTRY_AFFECTED_ENTRIES_OFFSET)?,
        key: nullable::decode_nullable(&mut iterator, data::decode)?,
        value: nullable::decode_nullable(&mut iterator, data::decode)?,
        old_value: nullable::decode_nullable(&mut iterator, data::decode)?,
        merging_value: nullable::decode_nullable(&mut iterator, data::decode)?,
    })
}

/// Decodes an event pushed to this listener.
///
/// Returns `Ok(None)` and logs a warning for unknown event types. An
/// exception response or this operation's own request or response type is
/// an error.
pub fn decode_event(message: &ClientMessage) -> Result<Option<Event>> {
    let message_type = util::event_message_type(
        message,
        EVENT_ENTRY_MESSAGE_TYPE,
        [REQUEST_MESSAGE_TYPE, RESPONSE_MESSAGE_TYPE],
    )?;
    match message_type {
        EVENT_ENTRY_MESSAGE_TYPE => {
            decode_entry_event(message).map(|event| Some(Event::Entry(event)))
        }
        message_type => {
            warn!(?message_type, operation = OPERATION_NAME, "ignoring unknown event type");
            Ok(None)
        }
    }
}

type Callback = Box<dyn Fn(EntryEvent) + Send + Sync>;

/// Routes entry events to closures by event kind.
///
/// A kind-specific callback takes precedence; events without one go to the
/// [`on_entry`](EventHandlerBuilder::on_entry) fallback, if set.
pub struct EventHandler {
    on_added: Option<Callback>,
    on_removed: Option<Callback>,
    on_updated: Option<Callback>,
    on_evicted: Option<Callback>,
    on_expired: Option<Callback>,
    on_entry: Option<Callback>,
}

impl EventHandler {
    /// Creates a new builder with no callbacks.
    pub fn builder() -> EventHandlerBuilder {
        EventHandlerBuilder::default()
    }

    /// Decodes `message` and invokes the matching callback.
    pub fn handle(&self, message: &ClientMessage) -> Result<()> {
        let Some(Event::Entry(event)) = decode_event(message)? else {
            return Ok(());
        };
        let specific = match event.kind() {
            Some(EntryEventType::Added) => self.on_added.as_ref(),
            Some(EntryEventType::Removed) => self.on_removed.as_ref(),
            Some(EntryEventType::Updated) => self.on_updated.as_ref(),
            Some(EntryEventType::Evicted) => self.on_evicted.as_ref(),
            Some(EntryEventType::Expired) => self.on_expired.as_ref(),
            _ => None,
        };
        if let Some(f) = specific.or(self.on_entry.as_ref()) {
            f(event);
        }
        Ok(())
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("on_added", &self.on_added.is_some())
            .field("on_removed", &self.on_removed.is_some())
            .field("on_updated", &self.on_updated.is_some())
            .field("on_evicted", &self.on_evicted.is_some())
            .field("on_expired", &self.on_expired.is_some())
            .field("on_entry", &self.on_entry.is_some())
            .finish()
    }
}

/// Builder for [`EventHandler`].
#[derive(Default)]
pub struct EventHandlerBuilder {
    on_added: Option<Callback>,
    on_removed: Option<Callback>,
    on_updated: Option<Callback>,
    on_evicted: Option<Callback>,
    on_expired: Option<Callback>,
    on_entry: Option<Callback>,
}

impl EventHandlerBuilder {
    /// Sets the handler for entry added events.
    pub fn on_added<F>(mut self, f: F) -> Self
    where
        F: Fn(EntryEvent) + Send + Sync + 'static,
    {
        self.on_added = Some(Box::new(f));
        self
    }

    /// Sets the handler for entry removed events.
    pub fn on_removed<F>(mut self, f: F) -> Self
    where
        F: Fn(EntryEvent) + Send + Sync + 'static,
    {
        self.on_removed = Some(Box::new(f));
        self
    }

    /// Sets the handler for entry updated events.
    pub fn on_updated<F>(mut self, f: F) -> Self
    where
        F: Fn(EntryEvent) + Send + Sync + 'static,
    {
        self.on_updated = Some(Box::new(f));
        self
    }

    /// Sets the handler for entry evicted events.
    pub fn on_evicted<F>(mut self, f: F) -> Self
    where
        F: Fn(EntryEvent) + Send + Sync + 'static,
    {
        self.on_evicted = Some(Box::new(f));
        self
    }

    /// Sets the handler for entry expired events.
    pub fn on_expired<F>(mut self, f: F) -> Self
    where
        F: Fn(EntryEvent) + Send + Sync + 'static,
    {
        self.on_expired = Some(Box::new(f));
        self
    }

    /// Sets the fallback for events without a kind-specific handler.
    pub fn on_entry<F>(mut self, f: F) -> Self
    where
        F: Fn(EntryEvent) + Send + Sync + 'static,
    {
        self.on_entry = Some(Box::new(f));
        self
    }

    /// Builds the [`EventHandler`].
    pub fn build(self) -> EventHandler {
        EventHandler {
            on_added: self.on_added,
            on_removed: self.on_removed,
            on_updated: self.on_updated,
            on_evicted: self.on_evicted,
            on_expired: self.on_expired,
            on_entry: self.on_entry,
        }
    }
}

impl fmt::Debug for EventHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlerBuilder").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn event(kind: EntryEventType) -> EntryEvent {
        EntryEvent {
            key: Some(Data::from(vec![1])),
            value: Some(Data::from(vec![2])),
            old_value: None,
            merging_value: None,
            event_type: kind.value(),
            uuid: Uuid::new_v4(),
            number_of_affected_entries: 1,
        }
    }

    #[test]
    fn test_request_round_trip() {
        let flags = EntryEventType::Added.value() | EntryEventType::Removed.value();
        let params = decode_request(&encode_request("m", true, flags, false)).unwrap();
        assert_eq!(
            params,
            RequestParameters {
                name: "m".to_string(),
                include_value: true,
                listener_flags: 3,
                local_only: false,
            }
        );
    }

    #[test]
    fn test_registration_id() {
        let id = Uuid::new_v4();
        assert_eq!(decode_response(&encode_response(id)).unwrap().response, id);
    }

    #[test]
    fn test_entry_event_round_trip() {
        let original = event(EntryEventType::Updated);
        let message = encode_entry_event(&original);
        assert!(message.is_event());
        assert_eq!(message.frame_count(), 5);
        assert_eq!(decode_event(&message).unwrap(), Some(Event::Entry(original)));
    }

    #[test]
    fn test_unknown_kind_goes_to_fallback() {
        let mut raw = event(EntryEventType::Added);
        raw.event_type = 1 << 12;
        assert_eq!(raw.kind(), None);

        let fallback = Arc::new(AtomicUsize::new(0));
        let added = Arc::new(AtomicUsize::new(0));
        let (f, a) = (Arc::clone(&fallback), Arc::clone(&added));
        let handler = EventHandler::builder()
            .on_added(move |_| {
                a.fetch_add(1, Ordering::SeqCst);
            })
            .on_entry(move |_| {
                f.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        handler.handle(&encode_entry_event(&raw)).unwrap();
        handler.handle(&encode_entry_event(&event(EntryEventType::Added))).unwrap();
        handler.handle(&encode_entry_event(&event(EntryEventType::Merged))).unwrap();
        assert_eq!(added.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_event_type_values() {
        for value in [1, 2, 4, 8, 16, 32, 64, 128, 256, 512] {
            assert_eq!(EntryEventType::from_value(value).map(EntryEventType::value), Some(value));
        }
        assert_eq!(EntryEventType::from_value(3), None);
    }
}
