// Path: crates/tx/src/system/mod.rs
//! Checks every transaction must pass before its payload is dispatched.

pub mod validation;
