//! Reliable publish/subscribe topic operations.

pub mod add_message_listener;
pub mod publish;
