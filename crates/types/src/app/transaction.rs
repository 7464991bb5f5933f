// Path: crates/types/src/app/transaction.rs
//! Transactions, blocks, receipts, and chain status.

use crate::app::{AccountId, CallId, CallPayload, ChainId, KernelEvent};
use crate::error::ErrorResponse;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The header identifying who sent a transaction and for which chain.
///
/// Signature verification and ordering happen before a transaction reaches the
/// kernel; by the time it is applied the header is trusted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct SignHeader {
    /// The sending account.
    pub account_id: AccountId,
    /// The ID of the target chain to prevent cross-chain replays.
    pub chain_id: ChainId,
}

/// The operations an ordinary transaction can request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[serde(rename_all = "snake_case")]
pub enum TxPayload {
    /// Proposes a privileged operation for multisig approval.
    SubmitCall {
        /// The operation to approve.
        payload: CallPayload,
        /// Caller-chosen key, unique across all calls.
        unique_id: String,
    },
    /// Adds the sender's vote to a pending call.
    ConfirmCall {
        /// The call to vote on.
        call_id: CallId,
    },
    /// Withdraws the sender's vote from a pending call.
    RevokeConfirm {
        /// The call to withdraw from.
        call_id: CallId,
    },
    /// Moves currency from the sender to another account.
    Transfer {
        /// Receiver.
        to: AccountId,
        /// Denomination.
        denom: String,
        /// Amount.
        amount: u128,
    },
    /// A privileged operation sent directly. Always refused; privileged operations
    /// only take effect through an approved call.
    Privileged(CallPayload),
}

/// A transaction as ordered into a block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ChainTransaction {
    /// Sender and target chain.
    pub header: SignHeader,
    /// The requested operation.
    pub payload: TxPayload,
}

impl ChainTransaction {
    /// Builds a transaction from `sender` on `chain_id`.
    pub fn new(sender: AccountId, chain_id: ChainId, payload: TxPayload) -> Self {
        Self {
            header: SignHeader {
                account_id: sender,
                chain_id,
            },
            payload,
        }
    }
}

/// The header of a finalized block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct BlockHeader {
    /// The block height.
    pub height: u64,
    /// The chain this block belongs to.
    pub chain_id: ChainId,
}

/// A finalized, ordered block of transactions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Block<T> {
    /// The block header.
    pub header: BlockHeader,
    /// The ordered transactions.
    pub transactions: Vec<T>,
}

/// The persisted progress of the chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct ChainStatus {
    /// The height of the last committed block; zero before the first block.
    pub height: u64,
    /// The number of successfully applied transactions since genesis.
    pub total_transactions: u64,
}

/// The outcome of one transaction within a block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Position of the transaction in the block.
    pub index: u32,
    /// Events emitted. Empty when the transaction failed.
    pub events: Vec<KernelEvent>,
    /// The failure, if the transaction was rolled back.
    pub error: Option<ErrorResponse>,
}

impl TxReceipt {
    /// True if the transaction was applied.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
