// Path: crates/api/src/state/accessor.rs
//! Defines the `StateAccess` trait for key-value storage operations.

use crate::state::StateScanIter;
use meridian_types::error::StateError;

/// A dyn-safe trait that provides a complete interface for key-value storage operations,
/// including single-item, batch, and scanning methods.
///
/// Services and transaction models only ever see `&mut dyn StateAccess`, so the same
/// code runs against the committed store, a block overlay, or a transaction overlay.
pub trait StateAccess: Send + Sync {
    /// Gets a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Inserts a key-value pair.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Deletes a key-value pair.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Gets multiple values by keys in a single batch operation.
    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError> {
        keys.iter().map(|k| self.get(k)).collect()
    }

    /// Atomically applies a batch of inserts/updates and deletes.
    /// This is the method used to commit transactional changes.
    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError>;

    /// Scans for all key-value pairs starting with the given prefix, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError>;
}

// Blanket implementation to allow `StateAccess` to be used behind a `Box` trait object.
impl<T: StateAccess + ?Sized> StateAccess for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get(key)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        (**self).insert(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        (**self).delete(key)
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError> {
        (**self).batch_get(keys)
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        (**self).batch_apply(inserts, deletes)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        (**self).prefix_scan(prefix)
    }
}
