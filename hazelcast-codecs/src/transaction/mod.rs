//! Transaction lifecycle operations.
//!
//! A transaction is bound to the member that created it; commit and rollback
//! must go to the same connection.

pub mod commit;
pub mod create;
pub mod rollback;

/// Durability of a transaction log: the number of backups kept of it.
pub const DEFAULT_DURABILITY: i32 = 1;
/// Two-phase commit transaction type.
pub const TWO_PHASE: i32 = 1;
/// One-phase commit transaction type.
pub const ONE_PHASE: i32 = 2;
