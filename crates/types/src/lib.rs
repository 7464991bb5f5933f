// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Meridian Kernel Types
//!
//! This crate is the foundational library for the Meridian kernel, containing all core
//! data structures, error types, and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `meridian-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a stable, canonical definition for shared
//! types like `Call`, `ChainTransaction`, `AccountId`, and the error enums.

/// The maximum size in bytes of a call's unique identifier.
pub const MAX_UNIQUE_ID_BYTES: usize = 256;

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::CoreError> = std::result::Result<T, E>;

/// Core application-level data structures like `Call`, `ChainTransaction`, and `AccountId`.
pub mod app;
/// The canonical, deterministic binary codec for consensus-critical state.
pub mod codec;
/// Shared configuration structures (e.g., `NodeConfig`, `GenesisConfig`).
pub mod config;
/// A unified set of all error types used across the kernel.
pub mod error;
/// Constants and builders for well-known state keys.
pub mod keys;
/// Configuration structures for the built-in services.
pub mod service_configs;
