// Path: crates/test_utils/src/lib.rs
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

//! # Meridian Kernel Test Utilities
//!
//! Assertion macros, governance fixtures, and temporary fixture files shared by
//! the integration tests of the Meridian crates.

pub mod assertions;
pub mod fixtures;
