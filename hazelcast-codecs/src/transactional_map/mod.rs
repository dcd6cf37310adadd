//! Transactional map operations.
//!
//! These operations predate the null-frame and structural-list conventions:
//! optional values are preceded by an is-null flag frame and lists by a count
//! frame. See [`NullEncoding::PresenceFlag`] and [`ListEncoding::Counted`].
//!
//! [`NullEncoding::PresenceFlag`]: hazelcast_protocol::codec::NullEncoding::PresenceFlag
//! [`ListEncoding::Counted`]: hazelcast_protocol::codec::ListEncoding::Counted

pub mod get;
pub mod key_set;
pub mod put;

use hazelcast_protocol::codec::{ListEncoding, NullEncoding};

const NULL_ENCODING: NullEncoding = NullEncoding::PresenceFlag;
const LIST_ENCODING: ListEncoding = ListEncoding::Counted;
