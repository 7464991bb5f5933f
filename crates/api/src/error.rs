// Path: crates/api/src/error.rs
//! Re-exports all core error types from the central `meridian-types` crate.

pub use meridian_types::error::*;
