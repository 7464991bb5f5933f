// Path: crates/tx/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! The transaction model of the Meridian kernel.
//!
//! [`UnifiedTransactionModel`] turns an ordered [`ChainTransaction`] into service
//! calls. It is also the authorization boundary: privileged operations sent as
//! plain transactions are refused here and only ever run through an approved
//! multisig call.
//!
//! [`ChainTransaction`]: meridian_types::app::ChainTransaction

pub mod system;
pub mod unified;

pub use unified::UnifiedTransactionModel;
