// Path: crates/api/src/state/overlay.rs

//! A copy-on-write state overlay.
//!
//! Overlays stack: the executor opens one per block over the committed store and
//! one per transaction over the block overlay. A transaction's writes reach the block
//! only if it succeeds; a failed transaction's overlay is simply dropped.

use crate::state::{StateAccess, StateKVPair, StateScanIter};
use meridian_types::error::StateError;
use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::{Fuse, Peekable};
use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::Arc;

/// A batch of key-value pairs to be inserted or updated in the state.
pub type StateInserts = Vec<(Vec<u8>, Vec<u8>)>;

/// A batch of keys to be deleted from the state.
pub type StateDeletes = Vec<Vec<u8>>;

/// A complete set of state changes (inserts/updates and deletes).
pub type StateChangeSet = (StateInserts, StateDeletes);

/// The smallest key strictly greater than every key starting with `prefix`.
/// Returns `None` if the prefix is empty or all `0xFF`.
fn next_prefix(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut ub = prefix.to_vec();
    while let Some(last) = ub.pop() {
        if last != 0xFF {
            ub.push(last + 1);
            return Some(ub);
        }
    }
    None
}

/// Merges a base scan with the overlay's pending writes. Writes shadow base entries
/// with the same key; a pending delete hides the base entry.
struct MergingIterator<'a> {
    base: Peekable<Fuse<StateScanIter<'a>>>,
    writes: Peekable<btree_map::Range<'a, Vec<u8>, Option<Vec<u8>>>>,
}

impl<'a> MergingIterator<'a> {
    fn take_write(&mut self) -> Option<Result<StateKVPair, StateError>> {
        let (key, value) = self.writes.next()?;
        value
            .as_ref()
            .map(|v| Ok((Arc::from(key.as_slice()), Arc::from(v.as_slice()))))
    }
}

impl<'a> Iterator for MergingIterator<'a> {
    type Item = Result<StateKVPair, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let order = {
                let base_key = match self.base.peek() {
                    Some(Err(_)) => return self.base.next(),
                    Some(Ok((k, _))) => Some(k.as_ref()),
                    None => None,
                };
                let write_key = self.writes.peek().map(|(k, _)| k.as_slice());
                match (base_key, write_key) {
                    (Some(bk), Some(wk)) => bk.cmp(wk),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => return None,
                }
            };

            if order == Ordering::Less {
                return self.base.next();
            }
            if order == Ordering::Equal {
                self.base.next();
            }
            if let Some(item) = self.take_write() {
                return Some(item);
            }
        }
    }
}

/// An in-memory, copy-on-write overlay for any `StateAccess`.
///
/// Reads check the local write set first and fall through to `base`.
/// Writes never touch `base`; use [`StateOverlay::into_ordered_batch`] to extract them.
#[derive(Clone)]
pub struct StateOverlay<'a> {
    base: &'a dyn StateAccess,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> StateOverlay<'a> {
    /// Creates a new, empty overlay on top of a base state accessor.
    pub fn new(base: &'a dyn StateAccess) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// True if nothing has been written through this overlay.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Consumes the overlay and returns its writes in ascending key order.
    pub fn into_ordered_batch(self) -> StateChangeSet {
        let mut inserts = Vec::new();
        let mut deletes = Vec::new();

        for (key, value_opt) in self.writes {
            match value_opt {
                Some(value) => inserts.push((key, value)),
                None => deletes.push(key),
            }
        }
        (inserts, deletes)
    }
}

impl<'a> StateAccess for StateOverlay<'a> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.writes.get(key) {
            // A cached `None` is a pending delete.
            Some(value_opt) => Ok(value_opt.clone()),
            None => self.base.get(key),
        }
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in deletes {
            self.delete(key)?;
        }
        for (key, value) in inserts {
            self.insert(key, value)?;
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let base = self.base.prefix_scan(prefix)?.fuse().peekable();

        let start = Included(prefix.to_vec());
        let end = match next_prefix(prefix) {
            Some(ub) => Excluded(ub),
            None => Unbounded,
        };
        let writes = self.writes.range((start, end)).peekable();

        Ok(Box::new(MergingIterator { base, writes }))
    }
}
