// Path: crates/services/src/testing.rs
//! Shared fixtures for the service unit tests.

use crate::authority::AuthorityRegistry;
use meridian_api::services::access::ServiceDirectory;
use meridian_api::transaction::context::TxContext;
use meridian_state::InMemoryState;
use meridian_types::app::{AccountId, AuthorityParams, ChainId, Validator};
use meridian_types::service_configs::MultisigParams;

pub(crate) fn account(n: u8) -> AccountId {
    AccountId([n; 32])
}

pub(crate) fn validator(n: u8) -> Validator {
    Validator {
        address: account(n),
        attestation: format!("0x{:02x}", n),
    }
}

pub(crate) fn directory(interval_to_execute: u64) -> ServiceDirectory {
    crate::standard_services(MultisigParams {
        interval_to_execute,
    })
    .unwrap()
}

pub(crate) fn context(dir: &ServiceDirectory, height: u64, signer: u8) -> TxContext<'_> {
    TxContext {
        block_height: height,
        chain_id: ChainId(1),
        signer_account_id: account(signer),
        services: dir,
        is_internal: false,
    }
}

/// A state holding validators `1..=n` with bounds `[1, max]`.
pub(crate) fn seeded_state(n: u8, max: u32) -> InMemoryState {
    let mut state = InMemoryState::new();
    let set: Vec<Validator> = (1..=n).map(validator).collect();
    AuthorityRegistry
        .init_genesis(
            &mut state,
            &set,
            AuthorityParams {
                min_validators: 1,
                max_validators: max,
            },
        )
        .unwrap();
    state
}
