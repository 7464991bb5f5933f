// Path: crates/types/src/app/events.rs
//! The typed event log emitted by transactions and end-block hooks.

use crate::app::{AccountId, AuthorityParams, CallId, CallKind};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// An observable state change. Events are collected into transaction receipts and
/// the end-block section of a block outcome.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[serde(rename_all = "snake_case")]
pub enum KernelEvent {
    /// A call was submitted and received its creator's vote.
    CallSubmitted {
        /// The new call's id.
        call_id: CallId,
        /// The caller-supplied unique id.
        unique_id: String,
        /// The payload kind.
        kind: CallKind,
        /// The submitting validator.
        creator: AccountId,
    },
    /// A validator added a vote to a call.
    CallConfirmed {
        /// The call voted on.
        call_id: CallId,
        /// The voter.
        voter: AccountId,
    },
    /// A validator withdrew its vote.
    CallRevoked {
        /// The call.
        call_id: CallId,
        /// The voter whose vote was withdrawn.
        voter: AccountId,
    },
    /// The last vote on a call was withdrawn and the call was deleted.
    CallDropped {
        /// The deleted call.
        call_id: CallId,
    },
    /// A call reached quorum.
    CallApproved {
        /// The approved call.
        call_id: CallId,
        /// Number of votes at approval.
        votes: u32,
        /// The quorum that was met.
        quorum: u32,
    },
    /// An approved call's payload was dispatched.
    CallExecuted {
        /// The executed call.
        call_id: CallId,
        /// The handler's error, if it failed.
        error: Option<String>,
    },
    /// A pending call expired without quorum.
    CallRejected {
        /// The rejected call.
        call_id: CallId,
    },
    /// A validator joined the authority set.
    ValidatorAdded {
        /// The new validator.
        address: AccountId,
    },
    /// A validator left the authority set.
    ValidatorRemoved {
        /// The removed validator.
        address: AccountId,
    },
    /// A validator was swapped for another.
    ValidatorReplaced {
        /// The outgoing validator.
        old: AccountId,
        /// The incoming validator.
        new: AccountId,
    },
    /// The authority set bounds changed.
    AuthorityParamsUpdated {
        /// The new bounds.
        params: AuthorityParams,
    },
    /// Currency was minted.
    CurrencyIssued {
        /// Denomination.
        denom: String,
        /// Amount minted.
        amount: u128,
        /// Account credited.
        recipient: AccountId,
    },
    /// Currency was burned.
    CurrencyDestroyed {
        /// Denomination.
        denom: String,
        /// Amount burned.
        amount: u128,
        /// Account debited.
        holder: AccountId,
    },
    /// Currency moved between accounts.
    CurrencyTransferred {
        /// Denomination.
        denom: String,
        /// Amount moved.
        amount: u128,
        /// Sender.
        from: AccountId,
        /// Receiver.
        to: AccountId,
    },
    /// A protocol upgrade was scheduled.
    UpgradeScheduled {
        /// Plan name.
        name: String,
        /// Activation height.
        height: u64,
    },
    /// The scheduled protocol upgrade was cancelled.
    UpgradeCancelled {
        /// Plan name.
        name: String,
    },
    /// A protocol upgrade activated.
    UpgradeApplied {
        /// Plan name.
        name: String,
        /// Activation height.
        height: u64,
    },
}
