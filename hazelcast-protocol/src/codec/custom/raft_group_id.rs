//! Identifier of a CP subsystem Raft group.

use super::{begin_structure, open_structure, CustomCodec};
use crate::codec::fixed_size::{decode_long, encode_long};
use crate::codec::string;
use crate::error::Result;
use crate::protocol::constants::LONG_SIZE_IN_BYTES;
use crate::protocol::{ClientMessage, FixedLayout, ForwardFrameIterator, Frame};

const LAYOUT: FixedLayout<2> = FixedLayout::custom([LONG_SIZE_IN_BYTES, LONG_SIZE_IN_BYTES]);
const SEED_OFFSET: usize = LAYOUT.offset(0);
const ID_OFFSET: usize = LAYOUT.offset(1);

/// Identifies the Raft group owning a CP data structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RaftGroupId {
    /// Group name, `default` unless configured otherwise.
    pub name: String,
    /// Seed of the group's incarnation.
    pub seed: i64,
    /// Group id.
    pub id: i64,
}

impl CustomCodec for RaftGroupId {
    fn encode(message: &mut ClientMessage, value: &Self) {
        let mut initial = begin_structure(message, &LAYOUT);
        encode_long(&mut initial.content, SEED_OFFSET, value.seed);
        encode_long(&mut initial.content, ID_OFFSET, value.id);
        message.add(initial);
        string::encode(message, &value.name);
        message.add(Frame::new_end_frame());
    }

    fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Self> {
        let initial = open_structure(iterator)?;
        let seed = decode_long(&initial.content, SEED_OFFSET)?;
        let id = decode_long(&initial.content, ID_OFFSET)?;
        let name = string::decode(iterator)?;
        iterator.fast_forward_to_end_frame()?;
        Ok(Self { name, seed, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raft_group_id() {
        let group = RaftGroupId {
            name: "default".to_string(),
            seed: 3,
            id: -7,
        };
        let mut msg = ClientMessage::create_for_encode();
        RaftGroupId::encode(&mut msg, &group);

        assert_eq!(msg.frames()[1].content.len(), 16);
        assert_eq!(RaftGroupId::decode(&mut msg.frame_iterator()).unwrap(), group);
    }

    #[test]
    fn test_short_initial_frame_fails() {
        let msg = ClientMessage::from_frames(vec![
            Frame::new_begin_frame(),
            Frame::from_slice(&[0; 8]),
            Frame::from_slice(b"default"),
            Frame::new_end_frame(),
        ]);
        assert!(RaftGroupId::decode(&mut msg.frame_iterator()).is_err());
    }
}
