// Path: crates/execution/src/lib.rs
//! # Meridian Kernel Execution Crate Lints
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
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]
//! # Meridian Kernel Execution
//!
//! The [`ExecutionMachine`] applies finalized blocks to the committed key space:
//! one copy-on-write overlay per transaction, end-block hooks in service-id order,
//! and a single atomic commit per block. It also answers read-only queries.

pub mod app;
pub mod util;

pub use crate::app::{BlockOutcome, ExecutionMachine, GenesisState};
