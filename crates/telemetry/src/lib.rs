// Path: crates/telemetry/src/lib.rs
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

//! # Meridian Telemetry
//!
//! Structured logging initialization and abstract metrics sinks for the
//! Meridian kernel. Instrumented code talks to the sinks through the
//! accessor functions; a backend is plugged in once at startup.

/// The initialization routine for global structured logging.
pub mod init;
/// The concrete implementation of metrics sinks using the `prometheus` crate.
pub mod prometheus;
/// Abstract traits (`*MetricsSink`) that define the contract for metrics reporting.
pub mod sinks;

pub use sinks::{error_metrics, governance_metrics};
