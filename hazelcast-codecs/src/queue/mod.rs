//! Distributed queue operations.

pub mod add_listener;
pub mod offer;
pub mod poll;
pub mod size;
