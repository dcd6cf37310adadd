//! CP subsystem atomic long operations.
//!
//! Every request names the Raft group that owns the atomic long, so the
//! invocation layer can route it to the group leader.

pub mod add_and_get;
pub mod compare_and_set;
pub mod get;
