// Path: crates/services/src/authority/mod.rs
//! The Proof-of-Authority validator registry.
//!
//! The registry owns the validator set and its size bounds. It knows nothing about
//! voting; the multisig engine reads it to authorize voters and compute quorum.

use crate::multisig::payload_mismatch;
use meridian_api::impl_service_base;
use meridian_api::state::{StateAccess, StateAccessExt};
use meridian_api::transaction::context::TxContext;
use meridian_types::app::{
    quorum_for, AccountId, AuthorityParams, CallKind, CallPayload, KernelEvent, Validator,
};
use meridian_types::codec;
use meridian_types::error::{AuthorityError, StateError, TransactionError};
use meridian_types::keys::{validator_key, AUTHORITY_PARAMS_KEY, AUTHORITY_VALIDATOR_PREFIX};

/// The validator registry service. Stateless; all data lives under the `poa::` prefix.
#[derive(Default, Debug, Clone, Copy)]
pub struct AuthorityRegistry;

impl_service_base!(AuthorityRegistry, "authority");

impl AuthorityRegistry {
    /// All validators, ordered by address.
    pub fn validators<S: StateAccess + ?Sized>(
        &self,
        state: &S,
    ) -> Result<Vec<Validator>, StateError> {
        let mut out = Vec::new();
        for item in state.prefix_scan(AUTHORITY_VALIDATOR_PREFIX)? {
            let (_, value) = item?;
            out.push(codec::from_bytes_canonical(&value).map_err(StateError::Decode)?);
        }
        Ok(out)
    }

    /// The current size of the validator set.
    pub fn validator_amount<S: StateAccess + ?Sized>(&self, state: &S) -> Result<usize, StateError> {
        let mut count = 0usize;
        for item in state.prefix_scan(AUTHORITY_VALIDATOR_PREFIX)? {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// The validator registered at `address`, if any.
    pub fn validator<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        address: &AccountId,
    ) -> Result<Option<Validator>, StateError> {
        state.get_decoded(&validator_key(address))
    }

    /// True if `address` is in the current validator set.
    pub fn is_validator<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        address: &AccountId,
    ) -> Result<bool, StateError> {
        state.contains(&validator_key(address))
    }

    /// The current set bounds. A chain without stored bounds uses the defaults.
    pub fn params<S: StateAccess + ?Sized>(&self, state: &S) -> Result<AuthorityParams, StateError> {
        Ok(state
            .get_decoded::<AuthorityParams>(AUTHORITY_PARAMS_KEY)?
            .unwrap_or_default())
    }

    /// The minimum size of the validator set.
    pub fn min_validators<S: StateAccess + ?Sized>(&self, state: &S) -> Result<u32, StateError> {
        Ok(self.params(state)?.min_validators)
    }

    /// The maximum size of the validator set.
    pub fn max_validators<S: StateAccess + ?Sized>(&self, state: &S) -> Result<u32, StateError> {
        Ok(self.params(state)?.max_validators)
    }

    /// Votes required to approve a call, computed from the set as it is now.
    ///
    /// Quorum is never snapshotted: if a call changes the set, every later
    /// evaluation on every other pending call uses the new size.
    pub fn quorum<S: StateAccess + ?Sized>(&self, state: &S) -> Result<usize, StateError> {
        Ok(quorum_for(self.validator_amount(state)?))
    }

    /// Adds `validator`, enforcing uniqueness and the upper bound.
    pub fn add_validator(
        &self,
        state: &mut dyn StateAccess,
        validator: Validator,
    ) -> Result<(), TransactionError> {
        let key = validator_key(&validator.address);
        if state.contains(&key)? {
            return Err(AuthorityError::ValidatorExists(validator.address).into());
        }
        let params = self.params(&*state)?;
        let size = self.validator_amount(&*state)?;
        if !params.admits(size + 1) {
            return Err(AuthorityError::MaxValidatorsReached(params.max_validators).into());
        }
        state.insert_encoded(&key, &validator)?;
        log::info!(
            "[Authority] Added validator {} (set size {})",
            validator.address,
            size + 1
        );
        Ok(())
    }

    /// Removes the validator at `address`, enforcing the lower bound.
    pub fn remove_validator(
        &self,
        state: &mut dyn StateAccess,
        address: &AccountId,
    ) -> Result<(), TransactionError> {
        let key = validator_key(address);
        if !state.contains(&key)? {
            return Err(AuthorityError::ValidatorDoesntExist(*address).into());
        }
        let params = self.params(&*state)?;
        let size = self.validator_amount(&*state)?;
        if !params.admits(size.saturating_sub(1)) {
            return Err(AuthorityError::MinValidatorsReached(params.min_validators).into());
        }
        state.delete(&key)?;
        log::info!(
            "[Authority] Removed validator {} (set size {})",
            address,
            size - 1
        );
        Ok(())
    }

    /// Swaps `old` for `new` in one step. The set size is unchanged, so no bounds apply.
    pub fn replace_validator(
        &self,
        state: &mut dyn StateAccess,
        old: &AccountId,
        new: Validator,
    ) -> Result<(), TransactionError> {
        let old_key = validator_key(old);
        if !state.contains(&old_key)? {
            return Err(AuthorityError::ValidatorDoesntExist(*old).into());
        }
        let new_key = validator_key(&new.address);
        if state.contains(&new_key)? {
            return Err(AuthorityError::ValidatorExists(new.address).into());
        }
        state.delete(&old_key)?;
        state.insert_encoded(&new_key, &new)?;
        log::info!("[Authority] Replaced validator {} with {}", old, new.address);
        Ok(())
    }

    /// Replaces the set bounds. The new bounds must be well formed and must admit
    /// the current set.
    pub fn set_params(
        &self,
        state: &mut dyn StateAccess,
        params: AuthorityParams,
    ) -> Result<(), TransactionError> {
        if !params.is_well_formed() {
            return Err(AuthorityError::InvalidParams(format!(
                "min {} / max {} must satisfy 1 <= min <= max",
                params.min_validators, params.max_validators
            ))
            .into());
        }
        let size = self.validator_amount(&*state)?;
        if !params.admits(size) {
            return Err(AuthorityError::InvalidParams(format!(
                "current set of {} validators is outside [{}, {}]",
                size, params.min_validators, params.max_validators
            ))
            .into());
        }
        state.insert_encoded(AUTHORITY_PARAMS_KEY, &params)?;
        Ok(())
    }

    /// Writes the genesis authority set, checking uniqueness and bounds.
    pub fn init_genesis(
        &self,
        state: &mut dyn StateAccess,
        validators: &[Validator],
        params: AuthorityParams,
    ) -> Result<(), TransactionError> {
        if !params.is_well_formed() {
            return Err(AuthorityError::InvalidParams(format!(
                "min {} / max {} must satisfy 1 <= min <= max",
                params.min_validators, params.max_validators
            ))
            .into());
        }
        for v in validators {
            let key = validator_key(&v.address);
            if state.contains(&key)? {
                return Err(AuthorityError::ValidatorExists(v.address).into());
            }
            state.insert_encoded(&key, v)?;
        }
        self.set_params(state, params)
    }
}

// --- Dispatch handlers ---

/// Executes an approved `AddValidator` call.
pub fn handle_add_validator(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    let CallPayload::AddValidator { validator } = payload else {
        return Err(payload_mismatch(CallKind::AddValidator, payload));
    };
    ctx.service::<AuthorityRegistry>()?
        .add_validator(state, validator.clone())?;
    Ok(vec![KernelEvent::ValidatorAdded {
        address: validator.address,
    }])
}

/// Executes an approved `RemoveValidator` call.
pub fn handle_remove_validator(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    let CallPayload::RemoveValidator { address } = payload else {
        return Err(payload_mismatch(CallKind::RemoveValidator, payload));
    };
    ctx.service::<AuthorityRegistry>()?
        .remove_validator(state, address)?;
    Ok(vec![KernelEvent::ValidatorRemoved { address: *address }])
}

/// Executes an approved `ReplaceValidator` call.
pub fn handle_replace_validator(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    let CallPayload::ReplaceValidator { old, new } = payload else {
        return Err(payload_mismatch(CallKind::ReplaceValidator, payload));
    };
    ctx.service::<AuthorityRegistry>()?
        .replace_validator(state, old, new.clone())?;
    Ok(vec![KernelEvent::ValidatorReplaced {
        old: *old,
        new: new.address,
    }])
}

/// Executes an approved `UpdateAuthorityParams` call.
pub fn handle_update_params(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    let CallPayload::UpdateAuthorityParams { params } = payload else {
        return Err(payload_mismatch(CallKind::UpdateAuthorityParams, payload));
    };
    ctx.service::<AuthorityRegistry>()?.set_params(state, *params)?;
    Ok(vec![KernelEvent::AuthorityParamsUpdated { params: *params }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{account, validator};
    use meridian_state::InMemoryState;

    fn seeded(n: u8, min: u32, max: u32) -> InMemoryState {
        let mut state = InMemoryState::new();
        let set: Vec<Validator> = (1..=n).map(validator).collect();
        AuthorityRegistry
            .init_genesis(
                &mut state,
                &set,
                AuthorityParams {
                    min_validators: min,
                    max_validators: max,
                },
            )
            .unwrap();
        state
    }

    #[test]
    fn quorum_tracks_live_set() {
        let mut state = seeded(7, 1, 10);
        let reg = AuthorityRegistry;
        assert_eq!(reg.quorum(&state).unwrap(), 4);

        reg.add_validator(&mut state, validator(8)).unwrap();
        reg.add_validator(&mut state, validator(9)).unwrap();
        assert_eq!(reg.validator_amount(&state).unwrap(), 9);
        assert_eq!(reg.quorum(&state).unwrap(), 5);
    }

    #[test]
    fn add_respects_max_bound_exactly() {
        let mut state = seeded(4, 1, 5);
        let reg = AuthorityRegistry;
        reg.add_validator(&mut state, validator(5)).unwrap();

        let err = reg.add_validator(&mut state, validator(6)).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Authority(AuthorityError::MaxValidatorsReached(5))
        ));
    }

    #[test]
    fn remove_respects_min_bound_exactly() {
        let mut state = seeded(4, 3, 10);
        let reg = AuthorityRegistry;
        reg.remove_validator(&mut state, &account(4)).unwrap();

        let err = reg.remove_validator(&mut state, &account(3)).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Authority(AuthorityError::MinValidatorsReached(3))
        ));
        assert_eq!(reg.validator_amount(&state).unwrap(), 3);
    }

    #[test]
    fn duplicate_and_missing_validators() {
        let mut state = seeded(3, 1, 10);
        let reg = AuthorityRegistry;

        let err = reg.add_validator(&mut state, validator(2)).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Authority(AuthorityError::ValidatorExists(_))
        ));

        let err = reg.remove_validator(&mut state, &account(9)).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Authority(AuthorityError::ValidatorDoesntExist(_))
        ));
    }

    #[test]
    fn replace_swaps_without_bounds_check() {
        // The set is at both bounds; replace must still work.
        let mut state = seeded(3, 3, 3);
        let reg = AuthorityRegistry;
        reg.replace_validator(&mut state, &account(1), validator(7))
            .unwrap();

        assert!(!reg.is_validator(&state, &account(1)).unwrap());
        assert!(reg.is_validator(&state, &account(7)).unwrap());
        assert_eq!(reg.validator_amount(&state).unwrap(), 3);

        let err = reg
            .replace_validator(&mut state, &account(2), validator(3))
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Authority(AuthorityError::ValidatorExists(_))
        ));
        let err = reg
            .replace_validator(&mut state, &account(1), validator(8))
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Authority(AuthorityError::ValidatorDoesntExist(_))
        ));
    }

    #[test]
    fn params_must_admit_current_set() {
        let mut state = seeded(5, 1, 10);
        let reg = AuthorityRegistry;

        let too_small = AuthorityParams {
            min_validators: 1,
            max_validators: 4,
        };
        assert!(reg.set_params(&mut state, too_small).is_err());

        let inverted = AuthorityParams {
            min_validators: 6,
            max_validators: 2,
        };
        assert!(reg.set_params(&mut state, inverted).is_err());

        let ok = AuthorityParams {
            min_validators: 5,
            max_validators: 5,
        };
        reg.set_params(&mut state, ok).unwrap();
        assert_eq!(reg.min_validators(&state).unwrap(), 5);
        assert_eq!(reg.max_validators(&state).unwrap(), 5);
    }

    #[test]
    fn validators_are_listed_by_address() {
        let state = seeded(3, 1, 10);
        let addrs: Vec<AccountId> = AuthorityRegistry
            .validators(&state)
            .unwrap()
            .into_iter()
            .map(|v| v.address)
            .collect();
        assert_eq!(addrs, vec![account(1), account(2), account(3)]);
        assert_eq!(
            AuthorityRegistry
                .validator(&state, &account(2))
                .unwrap()
                .unwrap()
                .attestation,
            "0x02"
        );
    }
}
