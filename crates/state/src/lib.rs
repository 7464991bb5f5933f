// Path: crates/state/src/lib.rs
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

//! # Meridian State
//!
//! The committed key space of a node. Blocks are executed against overlays and
//! only their final write set is applied here, in a single `batch_apply`.

mod memory;

pub use memory::InMemoryState;
