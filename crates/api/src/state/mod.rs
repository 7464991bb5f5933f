// Path: crates/api/src/state/mod.rs
//! Core traits for state access.

use meridian_types::error::StateError;
use std::sync::Arc;

/// A key in the state store.
pub type StateKey = Arc<[u8]>;
/// A value in the state store.
pub type StateVal = Arc<[u8]>;
/// A key-value pair yielded by a scan.
pub type StateKVPair = (StateKey, StateVal);
/// A boxed iterator over the key-value pairs matching a prefix, in ascending key order.
pub type StateScanIter<'a> = Box<dyn Iterator<Item = Result<StateKVPair, StateError>> + Send + 'a>;

mod accessor;
mod overlay;
mod typed;

pub use accessor::*;
pub use overlay::*;
pub use typed::*;
