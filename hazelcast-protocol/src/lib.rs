//! Wire-level building blocks of the Hazelcast Open Binary Client Protocol.
//!
//! Messages are sequences of [`Frame`]s grouped into a [`ClientMessage`].
//! The [`codec`] module holds the field codecs every operation is built
//! from; [`protocol::ClientMessageCodec`] moves whole messages over a byte
//! stream.

#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod protocol;

pub use codec::Data;
pub use config::{CodecConfig, CodecConfigBuilder, ConfigError};
pub use error::{ProtocolError, Result};
pub use protocol::{ClientMessage, ForwardFrameIterator, Frame};
