//! Cluster member descriptions carried by membership events.

use std::fmt;

use uuid::Uuid;

use super::{begin_structure, open_structure, Address, CustomCodec};
use crate::codec::entry_list;
use crate::codec::fixed_size::{
    decode_bool, decode_byte, decode_uuid, encode_bool, encode_byte, encode_uuid,
};
use crate::codec::string;
use crate::error::{ProtocolError, Result};
use crate::protocol::constants::{BOOLEAN_SIZE_IN_BYTES, BYTE_SIZE_IN_BYTES, UUID_SIZE_IN_BYTES};
use crate::protocol::{ClientMessage, FixedLayout, ForwardFrameIterator, Frame};

const VERSION_LAYOUT: FixedLayout<3> =
    FixedLayout::custom([BYTE_SIZE_IN_BYTES, BYTE_SIZE_IN_BYTES, BYTE_SIZE_IN_BYTES]);
const MAJOR_OFFSET: usize = VERSION_LAYOUT.offset(0);
const MINOR_OFFSET: usize = VERSION_LAYOUT.offset(1);
const PATCH_OFFSET: usize = VERSION_LAYOUT.offset(2);

const MEMBER_LAYOUT: FixedLayout<2> =
    FixedLayout::custom([UUID_SIZE_IN_BYTES, BOOLEAN_SIZE_IN_BYTES]);
const UUID_OFFSET: usize = MEMBER_LAYOUT.offset(0);
const LITE_MEMBER_OFFSET: usize = MEMBER_LAYOUT.offset(1);

/// Codebase version of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MemberVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Patch version.
    pub patch: u8,
}

impl fmt::Display for MemberVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl CustomCodec for MemberVersion {
    fn encode(message: &mut ClientMessage, value: &Self) {
        let mut initial = begin_structure(message, &VERSION_LAYOUT);
        encode_byte(&mut initial.content, MAJOR_OFFSET, value.major);
        encode_byte(&mut initial.content, MINOR_OFFSET, value.minor);
        encode_byte(&mut initial.content, PATCH_OFFSET, value.patch);
        message.add(initial);
        message.add(Frame::new_end_frame());
    }

    fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Self> {
        let initial = open_structure(iterator)?;
        let version = Self {
            major: decode_byte(&initial.content, MAJOR_OFFSET)?,
            minor: decode_byte(&initial.content, MINOR_OFFSET)?,
            patch: decode_byte(&initial.content, PATCH_OFFSET)?,
        };
        iterator.fast_forward_to_end_frame()?;
        Ok(version)
    }
}

/// A member as announced in cluster views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Address clients connect to.
    pub address: Address,
    /// Member UUID.
    pub uuid: Uuid,
    /// User-defined member attributes, in member order.
    pub attributes: Vec<(String, String)>,
    /// Whether the member holds no partitions.
    pub lite_member: bool,
    /// Codebase version.
    pub version: MemberVersion,
}

impl CustomCodec for MemberInfo {
    fn encode(message: &mut ClientMessage, value: &Self) {
        let mut initial = begin_structure(message, &MEMBER_LAYOUT);
        encode_uuid(&mut initial.content, UUID_OFFSET, Some(value.uuid));
        encode_bool(&mut initial.content, LITE_MEMBER_OFFSET, value.lite_member);
        message.add(initial);

        Address::encode(message, &value.address);
        entry_list::encode(
            message,
            &value.attributes,
            |m, k| string::encode(m, k),
            |m, v| string::encode(m, v),
        );
        MemberVersion::encode(message, &value.version);
        message.add(Frame::new_end_frame());
    }

    fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Self> {
        let initial = open_structure(iterator)?;
        let uuid = decode_uuid(&initial.content, UUID_OFFSET)?
            .ok_or(ProtocolError::UnexpectedNull("member uuid"))?;
        let lite_member = decode_bool(&initial.content, LITE_MEMBER_OFFSET)?;

        let address = Address::decode(iterator)?;
        let attributes = entry_list::decode(iterator, string::decode, string::decode)?;
        let version = MemberVersion::decode(iterator)?;
        iterator.fast_forward_to_end_frame()?;

        Ok(Self {
            address,
            uuid,
            attributes,
            lite_member,
            version,
        })
    }
}
