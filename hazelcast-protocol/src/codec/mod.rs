//! Building-block codecs shared by every operation codec.
//!
//! Fixed-size codecs write into a frame at an offset; every other codec
//! appends whole frames to a [`ClientMessage`](crate::protocol::ClientMessage)
//! and reads them back through a
//! [`ForwardFrameIterator`](crate::protocol::ForwardFrameIterator).

pub mod byte_array;
pub mod custom;
pub mod data;
pub mod entry_list;
pub mod fixed_list;
pub mod fixed_size;
pub mod list;
pub mod nullable;
pub mod string;

pub use custom::CustomCodec;
pub use data::Data;
pub use fixed_size::FixedSizeCodec;
pub use list::ListEncoding;
pub use nullable::NullEncoding;
