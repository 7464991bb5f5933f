// Path: crates/types/src/app/multisig.rs
//! Multisig call records and the closed set of privileged payloads they carry.

use crate::app::{AccountId, AuthorityParams, UpgradePlan, Validator};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The numeric identifier of a call. Assigned in submission order and never reused.
pub type CallId = u64;

/// A privileged operation. These payloads can only take effect by being approved
/// through a multisig call; submitting one directly as a transaction is refused.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[serde(rename_all = "snake_case")]
pub enum CallPayload {
    /// Adds a validator to the authority set.
    AddValidator {
        /// The validator to add.
        validator: Validator,
    },
    /// Removes a validator from the authority set.
    RemoveValidator {
        /// The address of the validator to remove.
        address: AccountId,
    },
    /// Swaps one validator for another without changing the set size.
    ReplaceValidator {
        /// The address being replaced.
        old: AccountId,
        /// The incoming validator.
        new: Validator,
    },
    /// Changes the min/max bounds of the authority set.
    UpdateAuthorityParams {
        /// The new bounds.
        params: AuthorityParams,
    },
    /// Mints new currency into an account.
    IssueCurrency {
        /// The denomination to mint.
        denom: String,
        /// The amount to mint.
        amount: u128,
        /// The account credited.
        recipient: AccountId,
    },
    /// Burns currency held by an account.
    DestroyCurrency {
        /// The denomination to burn.
        denom: String,
        /// The amount to burn.
        amount: u128,
        /// The account debited.
        holder: AccountId,
    },
    /// Schedules a protocol upgrade at a future height.
    ScheduleUpgrade {
        /// The upgrade to schedule.
        plan: UpgradePlan,
    },
    /// Cancels the currently scheduled protocol upgrade.
    CancelUpgrade,
}

/// The discriminant of a [`CallPayload`], used as the key of the dispatch table.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode,
)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// See [`CallPayload::AddValidator`].
    AddValidator,
    /// See [`CallPayload::RemoveValidator`].
    RemoveValidator,
    /// See [`CallPayload::ReplaceValidator`].
    ReplaceValidator,
    /// See [`CallPayload::UpdateAuthorityParams`].
    UpdateAuthorityParams,
    /// See [`CallPayload::IssueCurrency`].
    IssueCurrency,
    /// See [`CallPayload::DestroyCurrency`].
    DestroyCurrency,
    /// See [`CallPayload::ScheduleUpgrade`].
    ScheduleUpgrade,
    /// See [`CallPayload::CancelUpgrade`].
    CancelUpgrade,
}

impl CallKind {
    /// Every payload kind. A dispatch table must route each one.
    pub const ALL: [CallKind; 8] = [
        CallKind::AddValidator,
        CallKind::RemoveValidator,
        CallKind::ReplaceValidator,
        CallKind::UpdateAuthorityParams,
        CallKind::IssueCurrency,
        CallKind::DestroyCurrency,
        CallKind::ScheduleUpgrade,
        CallKind::CancelUpgrade,
    ];

    /// A stable name for logs and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddValidator => "add_validator",
            Self::RemoveValidator => "remove_validator",
            Self::ReplaceValidator => "replace_validator",
            Self::UpdateAuthorityParams => "update_authority_params",
            Self::IssueCurrency => "issue_currency",
            Self::DestroyCurrency => "destroy_currency",
            Self::ScheduleUpgrade => "schedule_upgrade",
            Self::CancelUpgrade => "cancel_upgrade",
        }
    }
}

impl core::fmt::Display for CallKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CallPayload {
    /// Returns the kind tag of this payload.
    pub fn kind(&self) -> CallKind {
        match self {
            Self::AddValidator { .. } => CallKind::AddValidator,
            Self::RemoveValidator { .. } => CallKind::RemoveValidator,
            Self::ReplaceValidator { .. } => CallKind::ReplaceValidator,
            Self::UpdateAuthorityParams { .. } => CallKind::UpdateAuthorityParams,
            Self::IssueCurrency { .. } => CallKind::IssueCurrency,
            Self::DestroyCurrency { .. } => CallKind::DestroyCurrency,
            Self::ScheduleUpgrade { .. } => CallKind::ScheduleUpgrade,
            Self::CancelUpgrade => CallKind::CancelUpgrade,
        }
    }
}

/// A proposed privileged operation and its voting record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Call {
    /// Monotonic numeric identifier.
    pub id: CallId,
    /// Caller-supplied key, unique across every call ever submitted.
    pub unique_id: String,
    /// The operation to perform once approved.
    pub payload: CallPayload,
    /// The validator that submitted the call.
    pub creator: AccountId,
    /// The block height at which the call was submitted.
    pub submitted_height: u64,
    /// Voters in the order their votes were cast. Never contains duplicates.
    pub votes: Vec<AccountId>,
    /// Set once quorum was reached. Never cleared.
    pub approved: bool,
    /// Set once the call expired without quorum. Never cleared.
    pub rejected: bool,
    /// Set once the payload was dispatched.
    pub executed: bool,
    /// Set if the dispatched handler returned an error.
    pub failed: bool,
    /// The handler's error message when `failed` is set.
    pub execution_error: Option<String>,
}

impl Call {
    /// Creates a fresh pending call carrying the creator's vote.
    pub fn new(
        id: CallId,
        unique_id: String,
        payload: CallPayload,
        creator: AccountId,
        submitted_height: u64,
    ) -> Self {
        Self {
            id,
            unique_id,
            payload,
            creator,
            submitted_height,
            votes: vec![creator],
            approved: false,
            rejected: false,
            executed: false,
            failed: false,
            execution_error: None,
        }
    }

    /// True while the call is still collecting votes.
    pub fn is_pending(&self) -> bool {
        !self.approved && !self.rejected
    }

    /// True if `voter` has a vote recorded on this call.
    pub fn has_vote(&self, voter: &AccountId) -> bool {
        self.votes.contains(voter)
    }

    /// True if the call has been pending for longer than `interval` blocks at `height`.
    pub fn is_expired_at(&self, height: u64, interval: u64) -> bool {
        height.saturating_sub(self.submitted_height) > interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_call(submitted_height: u64) -> Call {
        Call::new(
            1,
            "u".into(),
            CallPayload::CancelUpgrade,
            AccountId([1; 32]),
            submitted_height,
        )
    }

    #[test]
    fn new_call_carries_creator_vote() {
        let call = sample_call(3);
        assert_eq!(call.votes, vec![AccountId([1; 32])]);
        assert!(call.is_pending());
        assert!(call.has_vote(&AccountId([1; 32])));
        assert!(!call.has_vote(&AccountId([2; 32])));
    }

    #[test]
    fn expiry_is_strictly_after_interval() {
        let call = sample_call(10);
        assert!(!call.is_expired_at(15, 5));
        assert!(call.is_expired_at(16, 5));
    }

    #[test]
    fn every_kind_is_listed_once() {
        let mut kinds = CallKind::ALL.to_vec();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), CallKind::ALL.len());
    }
}
