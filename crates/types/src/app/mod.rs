// Path: crates/types/src/app/mod.rs
//! Core application-level data structures for the Meridian kernel.

/// Validator records and registry policy bounds.
pub mod authority;
/// The typed event log emitted by transactions and end-block hooks.
pub mod events;
/// Account and chain identifiers.
pub mod identity;
/// Multisig call records and the closed set of privileged payloads.
pub mod multisig;
/// Read-only queries and their answers.
pub mod query;
/// Transactions, blocks, receipts, and chain status.
pub mod transaction;
/// Protocol upgrade plans.
pub mod upgrade;

pub use authority::*;
pub use events::*;
pub use identity::*;
pub use multisig::*;
pub use query::*;
pub use transaction::*;
pub use upgrade::*;
