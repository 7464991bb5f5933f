// Path: crates/types/src/service_configs/mod.rs
//! Configuration structures for the built-in services.

use serde::{Deserialize, Serialize};

/// Configuration parameters for the multisig voting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigParams {
    /// The number of blocks a call may stay pending. A call submitted at height `h`
    /// is rejected by the end-block sweep of the first block above `h + interval_to_execute`.
    #[serde(default = "default_interval_to_execute")]
    pub interval_to_execute: u64,
}

fn default_interval_to_execute() -> u64 {
    17_280 // ~24 hours at 5s blocks
}

impl Default for MultisigParams {
    fn default() -> Self {
        Self {
            interval_to_execute: default_interval_to_execute(),
        }
    }
}

bitflags::bitflags! {
    /// A bitmask representing the lifecycle hooks a service exposes.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[serde(transparent)]
    pub struct Capabilities: u32 {
        /// Implements the OnEndBlock trait and its `on_end_block` hook.
        const ON_END_BLOCK = 0b0001;
    }
}
