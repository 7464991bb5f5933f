// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for all consensus-critical state.
//!
//! This module provides thin wrappers around `parity-scale-codec` (SCALE). Every record
//! the governance engine persists (validators, calls, balances, upgrade plans) goes
//! through these two functions, so all nodes agree on the exact bytes in state.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into a deterministic, canonical byte representation using SCALE codec.
///
/// This function should be used for all data that is written to consensus-critical state.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from a canonical byte representation using SCALE codec.
///
/// Trailing bytes are rejected, so a value only decodes if it was written by
/// [`to_bytes_canonical`] for the same type.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
