//! Distributed map operations.

pub mod add_entry_listener;
pub mod contains_key;
pub mod entry_set;
pub mod get;
pub mod put;
pub mod put_all;
pub mod remove;
pub mod remove_entry_listener;
pub mod size;
