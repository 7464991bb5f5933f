// Path: crates/services/src/multisig/ledger.rs
//! Durable storage of call records.
//!
//! Layout under the `multisig::` prefix:
//!
//! * `last_id` holds the last assigned call id (0 before the first call).
//! * `call::{id}` holds the `Call` record.
//! * `pending::{id}` is present exactly while the call is pending.
//! * `unique::{unique_id}` maps a unique id to its call id and is never removed,
//!   which keeps unique ids reserved even after a call is dropped.

use meridian_api::state::{StateAccess, StateAccessExt};
use meridian_types::app::{Call, CallId};
use meridian_types::codec;
use meridian_types::error::StateError;
use meridian_types::keys::{
    call_key, pending_call_key, unique_id_key, MULTISIG_LAST_CALL_ID_KEY, MULTISIG_PENDING_PREFIX,
};

/// Stateless accessors for the call ledger.
pub struct CallLedger;

impl CallLedger {
    /// The last assigned call id, or 0 if no call was ever submitted.
    pub fn last_id<S: StateAccess + ?Sized>(state: &S) -> Result<CallId, StateError> {
        Ok(state
            .get_decoded::<CallId>(MULTISIG_LAST_CALL_ID_KEY)?
            .unwrap_or(0))
    }

    /// Reserves and returns the next call id.
    pub fn next_id(state: &mut dyn StateAccess) -> Result<CallId, StateError> {
        let id = Self::last_id(&*state)?
            .checked_add(1)
            .ok_or_else(|| StateError::InvalidValue("call id space exhausted".into()))?;
        state.insert_encoded(MULTISIG_LAST_CALL_ID_KEY, &id)?;
        Ok(id)
    }

    /// Loads a call by id.
    pub fn get<S: StateAccess + ?Sized>(state: &S, id: CallId) -> Result<Option<Call>, StateError> {
        state.get_decoded(&call_key(id))
    }

    /// Resolves a unique id to a call id. Resolves even if the call was later dropped.
    pub fn id_for_unique<S: StateAccess + ?Sized>(
        state: &S,
        unique_id: &str,
    ) -> Result<Option<CallId>, StateError> {
        state.get_decoded(&unique_id_key(unique_id))
    }

    /// Persists a newly submitted call together with its indexes.
    pub fn insert_new(state: &mut dyn StateAccess, call: &Call) -> Result<(), StateError> {
        state.insert_encoded(&unique_id_key(&call.unique_id), &call.id)?;
        Self::update(state, call)
    }

    /// Persists a changed call, keeping the pending index in sync with its status.
    pub fn update(state: &mut dyn StateAccess, call: &Call) -> Result<(), StateError> {
        state.insert_encoded(&call_key(call.id), call)?;
        if call.is_pending() {
            state.insert_encoded(&pending_call_key(call.id), &call.id)
        } else {
            state.delete(&pending_call_key(call.id))
        }
    }

    /// Deletes a call and its pending entry. The unique id stays reserved.
    pub fn remove(state: &mut dyn StateAccess, id: CallId) -> Result<(), StateError> {
        state.delete(&call_key(id))?;
        state.delete(&pending_call_key(id))
    }

    /// Ids of all pending calls in ascending order.
    pub fn pending_ids<S: StateAccess + ?Sized>(state: &S) -> Result<Vec<CallId>, StateError> {
        let mut ids = Vec::new();
        for item in state.prefix_scan(MULTISIG_PENDING_PREFIX)? {
            let (_, value) = item?;
            ids.push(codec::from_bytes_canonical(&value).map_err(StateError::Decode)?);
        }
        Ok(ids)
    }

    /// All pending calls in ascending id order.
    pub fn pending<S: StateAccess + ?Sized>(state: &S) -> Result<Vec<Call>, StateError> {
        let mut calls = Vec::new();
        for id in Self::pending_ids(state)? {
            let call = Self::get(state, id)?.ok_or_else(|| {
                StateError::InvalidValue(format!("pending index references missing call {id}"))
            })?;
            calls.push(call);
        }
        Ok(calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::account;
    use meridian_state::InMemoryState;
    use meridian_types::app::CallPayload;

    fn new_call(state: &mut InMemoryState, uid: &str) -> Call {
        let id = CallLedger::next_id(state).unwrap();
        let call = Call::new(id, uid.into(), CallPayload::CancelUpgrade, account(1), 1);
        CallLedger::insert_new(state, &call).unwrap();
        call
    }

    #[test]
    fn ids_are_monotonic_from_one() {
        let mut state = InMemoryState::new();
        assert_eq!(CallLedger::last_id(&state).unwrap(), 0);
        assert_eq!(new_call(&mut state, "a").id, 1);
        assert_eq!(new_call(&mut state, "b").id, 2);
        assert_eq!(CallLedger::last_id(&state).unwrap(), 2);
    }

    #[test]
    fn pending_index_follows_status() {
        let mut state = InMemoryState::new();
        let a = new_call(&mut state, "a");
        let mut b = new_call(&mut state, "b");
        assert_eq!(CallLedger::pending_ids(&state).unwrap(), vec![a.id, b.id]);

        b.approved = true;
        CallLedger::update(&mut state, &b).unwrap();
        assert_eq!(CallLedger::pending_ids(&state).unwrap(), vec![a.id]);
        // Approved calls stay fetchable.
        assert!(CallLedger::get(&state, b.id).unwrap().unwrap().approved);
    }

    #[test]
    fn removed_call_keeps_unique_id_reserved() {
        let mut state = InMemoryState::new();
        let a = new_call(&mut state, "a");
        CallLedger::remove(&mut state, a.id).unwrap();

        assert!(CallLedger::get(&state, a.id).unwrap().is_none());
        assert!(CallLedger::pending(&state).unwrap().is_empty());
        assert_eq!(CallLedger::id_for_unique(&state, "a").unwrap(), Some(a.id));
    }
}
