//! Per-operation codecs of the Hazelcast client protocol.
//!
//! Every operation module follows the same shape:
//!
//! - `REQUEST_MESSAGE_TYPE` and `RESPONSE_MESSAGE_TYPE` constants, plus one
//!   `EVENT_*_MESSAGE_TYPE` constant per event for listener operations
//! - `RequestParameters` and `ResponseParameters` plain data holders
//! - `encode_request`, `decode_request`, `encode_response` and
//!   `decode_response` free functions
//! - for listener operations, an `encode_*_event` function per event, a
//!   closed `Event` enum, `decode_event`, and a closure-based `EventHandler`
//!
//! Codecs are pure functions over [`ClientMessage`](hazelcast_protocol::ClientMessage);
//! they never assign correlation ids or touch a connection.
//!
//! ```
//! use hazelcast_codecs::map::get;
//! use hazelcast_protocol::Data;
//!
//! let request = get::encode_request("orders", &Data::from(vec![1, 2, 3]), 7);
//! assert_eq!(request.message_type(), Some(get::REQUEST_MESSAGE_TYPE));
//! assert!(request.is_retryable());
//!
//! let decoded = get::decode_request(&request).unwrap();
//! assert_eq!(decoded.name, "orders");
//! assert_eq!(decoded.thread_id, 7);
//! ```

#![warn(missing_docs)]

pub mod atomic_long;
pub mod client;
pub mod map;
pub mod pn_counter;
pub mod queue;
pub mod topic;
pub mod transaction;
pub mod transactional_map;

mod util;
