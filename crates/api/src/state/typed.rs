// Path: crates/api/src/state/typed.rs
//! Typed reads and writes over `StateAccess` using the canonical codec.

use crate::state::StateAccess;
use meridian_types::codec;
use meridian_types::error::StateError;
use parity_scale_codec::{Decode, Encode};

/// Canonical-codec helpers available on every `StateAccess`, including `dyn StateAccess`.
pub trait StateAccessExt: StateAccess {
    /// Reads and decodes the value at `key`.
    fn get_decoded<T: Decode>(&self, key: &[u8]) -> Result<Option<T>, StateError> {
        match self.get(key)? {
            Some(bytes) => codec::from_bytes_canonical(&bytes)
                .map(Some)
                .map_err(StateError::Decode),
            None => Ok(None),
        }
    }

    /// Encodes `value` and writes it at `key`.
    fn insert_encoded<T: Encode>(&mut self, key: &[u8], value: &T) -> Result<(), StateError> {
        let bytes = codec::to_bytes_canonical(value).map_err(StateError::InvalidValue)?;
        self.insert(key, &bytes)
    }

    /// True if a value is stored at `key`.
    fn contains(&self, key: &[u8]) -> Result<bool, StateError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: StateAccess + ?Sized> StateAccessExt for S {}
