// Path: crates/types/src/app/authority.rs
//! Validator records and the policy bounds of the Proof-of-Authority registry.

use crate::app::AccountId;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A member of the authority set.
///
/// Identity is the `address`; the `attestation` is an opaque external identity
/// (for example an address on a bridged chain) carried for off-chain components.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Validator {
    /// The account that votes on multisig calls.
    pub address: AccountId,
    /// The validator's external attestation identity.
    pub attestation: String,
}

/// Bounds on the size of the validator set. Only changeable through an approved call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct AuthorityParams {
    /// The registry never shrinks below this many validators.
    pub min_validators: u32,
    /// The registry never grows beyond this many validators.
    pub max_validators: u32,
}

impl Default for AuthorityParams {
    fn default() -> Self {
        Self {
            min_validators: 1,
            max_validators: 100,
        }
    }
}

impl AuthorityParams {
    /// Returns true if the bounds are usable: at least one validator and `min <= max`.
    pub fn is_well_formed(&self) -> bool {
        self.min_validators >= 1 && self.min_validators <= self.max_validators
    }

    /// Returns true if a set of `size` validators satisfies these bounds.
    pub fn admits(&self, size: usize) -> bool {
        let size = size as u64;
        size >= u64::from(self.min_validators) && size <= u64::from(self.max_validators)
    }
}

/// The number of votes needed to approve a call when `validators` are registered:
/// a strict majority, `floor(n / 2) + 1`.
pub fn quorum_for(validators: usize) -> usize {
    validators / 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quorum_is_strict_majority() {
        assert_eq!(quorum_for(1), 1);
        assert_eq!(quorum_for(2), 2);
        assert_eq!(quorum_for(7), 4);
        assert_eq!(quorum_for(8), 5);
        assert_eq!(quorum_for(9), 5);
    }

    #[test]
    fn params_bounds() {
        let p = AuthorityParams {
            min_validators: 3,
            max_validators: 5,
        };
        assert!(p.is_well_formed());
        assert!(!p.admits(2));
        assert!(p.admits(3));
        assert!(p.admits(5));
        assert!(!p.admits(6));

        let zero = AuthorityParams {
            min_validators: 0,
            max_validators: 5,
        };
        assert!(!zero.is_well_formed());
    }
}
