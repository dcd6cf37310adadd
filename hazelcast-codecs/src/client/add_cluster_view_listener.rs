//! Subscription to member list and partition table updates.

use std::fmt;

use tracing::warn;
use uuid::Uuid;

use hazelcast_protocol::codec::custom::MemberInfo;
use hazelcast_protocol::codec::fixed_size::{decode_int, encode_int};
use hazelcast_protocol::codec::{entry_list, list, CustomCodec};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x000300;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x000301;
/// Members view event message type.
pub const EVENT_MEMBERS_VIEW_MESSAGE_TYPE: i32 = 0x000302;
/// Partitions view event message type.
pub const EVENT_PARTITIONS_VIEW_MESSAGE_TYPE: i32 = 0x000303;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Client.AddClusterViewListener";

const EVENT_VERSION: FixedLayout<1> = FixedLayout::event([INT_SIZE_IN_BYTES]);
const EVENT_VERSION_OFFSET: usize = EVENT_VERSION.offset(0);

/// The current member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersViewEvent {
    /// Member list version.
    pub version: i32,
    /// Members in join order.
    pub member_infos: Vec<MemberInfo>,
}

/// The current partition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionsViewEvent {
    /// Partition table version.
    pub version: i32,
    /// Partition ids owned by each member.
    pub partitions: Vec<(Uuid, Vec<i32>)>,
}

/// Events pushed to a cluster view listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Member list changed.
    MembersView(MembersViewEvent),
    /// Partition table changed.
    PartitionsView(PartitionsViewEvent),
}

/// Encodes a cluster view listener registration.
pub fn encode_request() -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    message.add(util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST_INITIAL_FRAME_SIZE));
    message
}

/// Checks a registration request; it carries no parameters.
pub fn decode_request(message: &ClientMessage) -> Result<()> {
    util::open(message, REQUEST_MESSAGE_TYPE).map(|_| ())
}

/// Encodes the registration acknowledgement.
pub fn encode_response() -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE_INITIAL_FRAME_SIZE));
    message
}

/// Checks the registration acknowledgement.
pub fn decode_response(message: &ClientMessage) -> Result<()> {
    util::open(message, RESPONSE_MESSAGE_TYPE).map(|_| ())
}

/// Encodes a members view event.
pub fn encode_members_view_event(event: &MembersViewEvent) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::event_frame(EVENT_MEMBERS_VIEW_MESSAGE_TYPE, EVENT_VERSION.frame_size());
    encode_int(&mut initial.content, EVENT_VERSION_OFFSET, event.version);
    message.add(initial);
    list::encode(&mut message, &event.member_infos, MemberInfo::encode);
    message
}

/// Encodes a partitions view event.
pub fn encode_partitions_view_event(event: &PartitionsViewEvent) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial =
        util::event_frame(EVENT_PARTITIONS_VIEW_MESSAGE_TYPE, EVENT_VERSION.frame_size());
    encode_int(&mut initial.content, EVENT_VERSION_OFFSET, event.version);
    message.add(initial);
    entry_list::encode_uuid_int_list(&mut message, &event.partitions);
    message
}

/// Decodes an event pushed to this listener.
///
/// Returns `Ok(None)` and logs a warning for event types this codec does not
/// know, so members running a newer protocol cannot break the connection.
/// Messages that are not events at all still fail: an exception response is
/// [`ProtocolError::Remote`] and the registration's own request or response
/// type is [`ProtocolError::UnexpectedMessageType`].
pub fn decode_event(message: &ClientMessage) -> Result<Option<Event>> {
    let message_type = util::event_message_type(
        message,
        EVENT_MEMBERS_VIEW_MESSAGE_TYPE,
        [REQUEST_MESSAGE_TYPE, RESPONSE_MESSAGE_TYPE],
    )?;
    match message_type {
        EVENT_MEMBERS_VIEW_MESSAGE_TYPE => {
            let (mut iterator, initial) = util::open_event(message)?;
            Ok(Some(Event::MembersView(MembersViewEvent {
                version: decode_int(&initial.content, EVENT_VERSION_OFFSET)?,
                member_infos: list::decode(&mut iterator, MemberInfo::decode)?,
            })))
        }
        EVENT_PARTITIONS_VIEW_MESSAGE_TYPE => {
            let (mut iterator, initial) = util::open_event(message)?;
            Ok(Some(Event::PartitionsView(PartitionsViewEvent {
                version: decode_int(&initial.content, EVENT_VERSION_OFFSET)?,
                partitions: entry_list::decode_uuid_int_list(&mut iterator)?,
            })))
        }
        message_type => {
            warn!(?message_type, operation = OPERATION_NAME, "ignoring unknown event type");
            Ok(None)
        }
    }
}

type Callback<E> = Box<dyn Fn(E) + Send + Sync>;

/// Routes cluster view events to closures.
///
/// Use [`EventHandler::builder`] to create a new instance.
pub struct EventHandler {
    on_members_view: Option<Callback<MembersViewEvent>>,
    on_partitions_view: Option<Callback<PartitionsViewEvent>>,
}

impl EventHandler {
    /// Creates a new builder with no callbacks.
    pub fn builder() -> EventHandlerBuilder {
        EventHandlerBuilder::default()
    }

    /// Decodes `message` and invokes the matching callback.
    ///
    /// Unknown event types are logged and ignored. Events without a
    /// registered callback are dropped.
    pub fn handle(&self, message: &ClientMessage) -> Result<()> {
        match decode_event(message)? {
            Some(Event::MembersView(event)) => {
                if let Some(f) = &self.on_members_view {
                    f(event);
                }
            }
            Some(Event::PartitionsView(event)) => {
                if let Some(f) = &self.on_partitions_view {
                    f(event);
                }
            }
            None => {}
        }
        Ok(())
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("on_members_view", &self.on_members_view.is_some())
            .field("on_partitions_view", &self.on_partitions_view.is_some())
            .finish()
    }
}

/// Builder for [`EventHandler`].
#[derive(Default)]
pub struct EventHandlerBuilder {
    on_members_view: Option<Callback<MembersViewEvent>>,
    on_partitions_view: Option<Callback<PartitionsViewEvent>>,
}

impl EventHandlerBuilder {
    /// Sets the callback for member list changes.
    pub fn on_members_view<F>(mut self, f: F) -> Self
    where
        F: Fn(MembersViewEvent) + Send + Sync + 'static,
    {
        self.on_members_view = Some(Box::new(f));
        self
    }

    /// Sets the callback for partition table changes.
    pub fn on_partitions_view<F>(mut self, f: F) -> Self
    where
        F: Fn(PartitionsViewEvent) + Send + Sync + 'static,
    {
        self.on_partitions_view = Some(Box::new(f));
        self
    }

    /// Builds the [`EventHandler`].
    pub fn build(self) -> EventHandler {
        EventHandler {
            on_members_view: self.on_members_view,
            on_partitions_view: self.on_partitions_view,
        }
    }
}

impl fmt::Debug for EventHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlerBuilder").finish()
    }
}
