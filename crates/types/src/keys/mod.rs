// Path: crates/types/src/keys/mod.rs
//! Defines constants for well-known state keys.
//!
//! These constants provide a single source of truth for the keys used to store
//! kernel data in the state store. Numeric ids are encoded big-endian inside keys
//! so that a prefix scan yields records in ascending id order.

use crate::app::{AccountId, CallId};

/// The state key for the persisted chain status.
pub const STATUS_KEY: &[u8] = b"chain::status";

/// The state key prefix for validator records, keyed by address.
pub const AUTHORITY_VALIDATOR_PREFIX: &[u8] = b"poa::validator::";
/// The state key for the authority set bounds.
pub const AUTHORITY_PARAMS_KEY: &[u8] = b"poa::params";

/// The state key for the last assigned call id.
pub const MULTISIG_LAST_CALL_ID_KEY: &[u8] = b"multisig::last_id";
/// The state key prefix for call records, keyed by id.
pub const MULTISIG_CALL_PREFIX: &[u8] = b"multisig::call::";
/// The state key prefix for the pending-call index, keyed by id.
pub const MULTISIG_PENDING_PREFIX: &[u8] = b"multisig::pending::";
/// The state key prefix mapping unique ids to call ids.
pub const MULTISIG_UNIQUE_ID_PREFIX: &[u8] = b"multisig::unique::";

/// The state key prefix for account balances.
pub const BANK_BALANCE_PREFIX: &[u8] = b"bank::balance::";
/// The state key prefix for total supply per denomination.
pub const BANK_SUPPLY_PREFIX: &[u8] = b"bank::supply::";

/// The state key for the scheduled upgrade plan.
pub const UPGRADE_PLAN_KEY: &[u8] = b"upgrade::plan";
/// The state key prefix recording the height at which each named upgrade applied.
pub const UPGRADE_DONE_PREFIX: &[u8] = b"upgrade::done::";

/// The key of a validator record.
pub fn validator_key(address: &AccountId) -> Vec<u8> {
    [AUTHORITY_VALIDATOR_PREFIX, address.as_ref()].concat()
}

/// The key of a call record.
pub fn call_key(id: CallId) -> Vec<u8> {
    [MULTISIG_CALL_PREFIX, &id.to_be_bytes()].concat()
}

/// The key of a call's entry in the pending index.
pub fn pending_call_key(id: CallId) -> Vec<u8> {
    [MULTISIG_PENDING_PREFIX, &id.to_be_bytes()].concat()
}

/// The key mapping a unique id to its call id.
pub fn unique_id_key(unique_id: &str) -> Vec<u8> {
    [MULTISIG_UNIQUE_ID_PREFIX, unique_id.as_bytes()].concat()
}

/// The key of an account's balance in `denom`.
pub fn balance_key(denom: &str, account: &AccountId) -> Vec<u8> {
    [BANK_BALANCE_PREFIX, denom.as_bytes(), b"::", account.as_ref()].concat()
}

/// The key of the total supply of `denom`.
pub fn supply_key(denom: &str) -> Vec<u8> {
    [BANK_SUPPLY_PREFIX, denom.as_bytes()].concat()
}

/// The key recording when the upgrade `name` applied.
pub fn upgrade_done_key(name: &str) -> Vec<u8> {
    [UPGRADE_DONE_PREFIX, name.as_bytes()].concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_keys_sort_by_id() {
        let mut keys = vec![call_key(256), call_key(1), call_key(2)];
        keys.sort();
        assert_eq!(keys, vec![call_key(1), call_key(2), call_key(256)]);
    }

    #[test]
    fn pending_and_call_prefixes_do_not_overlap() {
        assert!(!pending_call_key(1).starts_with(MULTISIG_CALL_PREFIX));
        assert!(!call_key(1).starts_with(MULTISIG_PENDING_PREFIX));
    }
}
