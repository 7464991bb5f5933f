// Path: crates/state/src/memory.rs
//! An ordered, in-memory implementation of `StateAccess`.

use meridian_api::state::{StateAccess, StateScanIter};
use meridian_types::error::StateError;
use std::collections::BTreeMap;
use std::ops::Bound::{Included, Unbounded};
use std::sync::Arc;

/// The committed state of a node, held in a `BTreeMap` so that scans are ordered
/// and iteration is identical on every node.
#[derive(Debug, Clone, Default)]
pub struct InMemoryState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryState {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StateAccess for InMemoryState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.data.remove(key);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in deletes {
            self.data.remove(key);
        }
        for (key, value) in inserts {
            self.data.insert(key.clone(), value.clone());
        }
        log::trace!(
            "[State] applied batch: {} inserts, {} deletes",
            inserts.len(),
            deletes.len()
        );
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let owned = prefix.to_vec();
        let iter = self
            .data
            .range::<[u8], _>((Included(prefix), Unbounded))
            .take_while(move |(k, _)| k.starts_with(&owned))
            .map(|(k, v)| Ok((Arc::from(k.as_slice()), Arc::from(v.as_slice()))));
        Ok(Box::new(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_scan_is_ordered_and_bounded() {
        let mut state = InMemoryState::new();
        state.insert(b"b::2", b"2").unwrap();
        state.insert(b"b::1", b"1").unwrap();
        state.insert(b"a::1", b"x").unwrap();
        state.insert(b"c::1", b"x").unwrap();

        let keys: Vec<Vec<u8>> = state
            .prefix_scan(b"b::")
            .unwrap()
            .map(|r| r.unwrap().0.to_vec())
            .collect();
        assert_eq!(keys, vec![b"b::1".to_vec(), b"b::2".to_vec()]);
    }

    #[test]
    fn batch_apply_deletes_then_inserts() {
        let mut state = InMemoryState::new();
        state.insert(b"k", b"old").unwrap();
        state.insert(b"gone", b"x").unwrap();

        state
            .batch_apply(
                &[(b"k".to_vec(), b"new".to_vec())],
                &[b"gone".to_vec(), b"k".to_vec()],
            )
            .unwrap();

        assert_eq!(state.get(b"k").unwrap(), Some(b"new".to_vec()));
        assert_eq!(state.get(b"gone").unwrap(), None);
        assert_eq!(state.len(), 1);
    }
}
