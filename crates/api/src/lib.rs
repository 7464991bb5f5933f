// Path: crates/api/src/lib.rs

//! # Meridian Kernel API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Meridian Kernel API
//!
//! Core traits and interfaces for the Meridian kernel: the key-value state
//! contract, the transaction context, and the service lifecycle hooks.
//!
//! Every trait here is synchronous. Governance state is only ever touched from the
//! single thread applying a block, and a `&mut dyn StateAccess` is the only way to
//! write it.

/// Re-exports all core error types from the central `meridian-types` crate.
pub mod error;
/// Defines traits for services that hook into the block processing lifecycle.
pub mod lifecycle;
/// Traits for pluggable blockchain services.
pub mod services;
/// Core traits for state access, including `StateAccess` and `StateOverlay`.
pub mod state;
/// Defines the `TransactionModel` trait and the `TxContext`.
pub mod transaction;

/// Re-export of the types crate, used by exported macros.
pub use meridian_types as types;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::error::{
        ChainError, CoreError, ErrorCode, StateError, TransactionError,
    };
    pub use crate::lifecycle::OnEndBlock;
    pub use crate::services::access::ServiceDirectory;
    pub use crate::services::BlockchainService;
    pub use crate::state::{StateAccess, StateAccessExt, StateOverlay};
    pub use crate::transaction::context::TxContext;
    pub use crate::transaction::TransactionModel;
}
