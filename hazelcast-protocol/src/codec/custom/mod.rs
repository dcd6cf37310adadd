//! Codecs for composite types that travel as nested data structures.
//!
//! A custom type is a begin frame, an initial frame holding its fixed-size
//! fields at offset 0, one frame group per variable-length field, and an end
//! frame. Decoders read the fields they know and then skip to the matching
//! end frame, so members running a newer protocol may append fields.

pub mod address;
pub mod error_holder;
pub mod member_info;
pub mod raft_group_id;

pub use address::Address;
pub use error_holder::{ErrorHolder, StackTraceElement};
pub use member_info::{MemberInfo, MemberVersion};
pub use raft_group_id::RaftGroupId;

use crate::error::Result;
use crate::protocol::constants::DEFAULT_FLAGS;
use crate::protocol::{ClientMessage, FixedLayout, ForwardFrameIterator, Frame};

/// A type encoded as a nested data structure.
pub trait CustomCodec: Sized {
    /// Appends `value`, including its begin and end frames.
    fn encode(message: &mut ClientMessage, value: &Self);

    /// Reads a value, consuming everything up to and including its end frame.
    fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Self>;

    /// Appends `value`, or a null frame when absent.
    fn encode_nullable(message: &mut ClientMessage, value: Option<&Self>) {
        match value {
            Some(value) => Self::encode(message, value),
            None => message.add(Frame::new_null_frame()),
        }
    }

    /// Reads a value, or `None` for a null frame.
    fn decode_nullable(iterator: &mut ForwardFrameIterator<'_>) -> Result<Option<Self>> {
        if iterator.skip_null_frame() {
            Ok(None)
        } else {
            Self::decode(iterator).map(Some)
        }
    }
}

/// Opens a custom type: appends the begin frame and returns a zeroed initial
/// frame sized for `layout`, to be filled and then added by the caller.
pub(crate) fn begin_structure<const N: usize>(
    message: &mut ClientMessage,
    layout: &FixedLayout<N>,
) -> Frame {
    message.add(Frame::new_begin_frame());
    Frame::zeroed(layout.frame_size(), DEFAULT_FLAGS)
}

/// Consumes the begin frame and returns the initial frame of a custom type.
pub(crate) fn open_structure<'a>(iterator: &mut ForwardFrameIterator<'a>) -> Result<&'a Frame> {
    iterator.expect_begin_frame()?;
    iterator.expect_next("custom type initial frame")
}
