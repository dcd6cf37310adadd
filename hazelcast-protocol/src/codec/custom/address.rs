//! Network address of a cluster member.

use std::fmt;

use super::{begin_structure, open_structure, CustomCodec};
use crate::codec::fixed_size::{decode_int, encode_int};
use crate::codec::string;
use crate::error::Result;
use crate::protocol::constants::INT_SIZE_IN_BYTES;
use crate::protocol::{ClientMessage, FixedLayout, ForwardFrameIterator, Frame};

const LAYOUT: FixedLayout<1> = FixedLayout::custom([INT_SIZE_IN_BYTES]);
const PORT_OFFSET: usize = LAYOUT.offset(0);

/// Host and port of a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    /// Host name or IP literal.
    pub host: String,
    /// TCP port.
    pub port: i32,
}

impl Address {
    /// Creates an address.
    pub fn new(host: impl Into<String>, port: i32) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl CustomCodec for Address {
    fn encode(message: &mut ClientMessage, value: &Self) {
        let mut initial = begin_structure(message, &LAYOUT);
        encode_int(&mut initial.content, PORT_OFFSET, value.port);
        message.add(initial);
        string::encode(message, &value.host);
        message.add(Frame::new_end_frame());
    }

    fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Self> {
        let initial = open_structure(iterator)?;
        let port = decode_int(&initial.content, PORT_OFFSET)?;
        let host = string::decode(iterator)?;
        iterator.fast_forward_to_end_frame()?;
        Ok(Self { host, port })
    }
}
