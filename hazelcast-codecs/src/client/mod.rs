//! Connection-level client operations.

pub mod add_cluster_view_listener;
pub mod authentication;
