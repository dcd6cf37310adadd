//! Hazelcast Open Binary Protocol implementation.
//!
//! This module provides the message model shared by every codec: frames,
//! multi-frame client messages, the forward-only frame cursor, fixed-field
//! layouts and the stream codec that moves messages over a connection.

mod client_message;
mod codec;
pub mod constants;
mod fragment;
mod frame;
mod iterator;
mod layout;

pub use client_message::ClientMessage;
pub use codec::ClientMessageCodec;
pub use constants::*;
pub use fragment::{split_into_fragments, FragmentAssembler};
pub use frame::Frame;
pub use iterator::ForwardFrameIterator;
pub use layout::FixedLayout;
