// Path: crates/types/src/error/mod.rs
//! Core error types for the Meridian kernel.
//!
//! Every error that can fail a transaction carries two stable identifiers: a string
//! code from [`ErrorCode`] used in logs and metrics, and a numeric `(codespace, code)`
//! pair from [`Codespace`] that transports hand to clients through [`ErrorResponse`].

use crate::app::{AccountId, CallId};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// A trait for assigning a stable `(codespace, numeric code)` pair to an error.
///
/// Numeric codes start at 2 within each codespace; 0 means success and 1 is
/// reserved for internal errors.
pub trait Codespace {
    /// The module namespace the code belongs to.
    fn codespace(&self) -> &'static str;
    /// The numeric code, unique within the codespace.
    fn abci_code(&self) -> u32;
}

/// The codespace for kernel-internal errors that are not owned by a service.
pub const KERNEL_CODESPACE: &str = "kernel";
/// The codespace of the multisig voting engine.
pub const MULTISIG_CODESPACE: &str = "multisig";
/// The codespace of the authority registry.
pub const AUTHORITY_CODESPACE: &str = "poa";
/// The codespace of the bank.
pub const BANK_CODESPACE: &str = "bank";
/// The codespace of the upgrade service.
pub const UPGRADE_CODESPACE: &str = "upgrade";

/// The transport-neutral shape of an error returned to a client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ErrorResponse {
    /// The module namespace of `code`.
    pub codespace: String,
    /// The numeric code within `codespace`.
    pub code: u32,
    /// A human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// Builds a response from any error with a registered codespace.
    pub fn from_error<E: Codespace + core::fmt::Display>(err: &E) -> Self {
        Self {
            codespace: err.codespace().to_string(),
            code: err.abci_code(),
            message: err.to_string(),
        }
    }
}

/// Errors related to the state store.
#[derive(Error, Debug)]
pub enum StateError {
    /// The requested key was not found in the state.
    #[error("Key not found in state")]
    KeyNotFound,
    /// Applying a state change failed.
    #[error("Apply failed: {0}")]
    Apply(String),
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// The provided value was invalid.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// An error occurred during state deserialization.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound => "STATE_KEY_NOT_FOUND",
            Self::Apply(_) => "STATE_APPLY_FAILED",
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
            Self::Decode(_) => "STATE_DECODE_ERROR",
        }
    }
}

/// Errors raised by the multisig voting engine and the authorization guard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultisigError {
    /// A privileged operation was sent as an ordinary transaction.
    #[error("operation can only be executed through an approved multisig call")]
    OnlyMultisig,
    /// The sender is not in the current authority set.
    #[error("account {0} is not a validator")]
    NotValidator(AccountId),
    /// The unique id was used by an earlier call.
    #[error("call with unique id '{0}' already exists")]
    CallUniqueIdExists(String),
    /// No call with this numeric id exists.
    #[error("call {0} does not exist")]
    WrongCallId(CallId),
    /// No call with this unique id exists.
    #[error("no call found for unique id '{0}'")]
    NotFoundUniqueId(String),
    /// The sender already voted on this call.
    #[error("account {voter} already confirmed call {call_id}")]
    VoteAlreadyConfirmed {
        /// The call.
        call_id: CallId,
        /// The voter.
        voter: AccountId,
    },
    /// The sender has no vote on this call to revoke.
    #[error("account {voter} has not confirmed call {call_id}")]
    VoteNotApproved {
        /// The call.
        call_id: CallId,
        /// The would-be revoker.
        voter: AccountId,
    },
    /// The call already reached quorum.
    #[error("call {0} is already approved")]
    VoteAlreadyApproved(CallId),
    /// The call expired without reaching quorum.
    #[error("call {0} is already rejected")]
    VoteAlreadyRejected(CallId),
    /// The unique id is empty or too long.
    #[error("invalid unique id: {0}")]
    InvalidUniqueId(String),
}

impl ErrorCode for MultisigError {
    fn code(&self) -> &'static str {
        match self {
            Self::OnlyMultisig => "MULTISIG_ONLY_MULTISIG",
            Self::NotValidator(_) => "MULTISIG_NOT_VALIDATOR",
            Self::CallUniqueIdExists(_) => "MULTISIG_UNIQUE_ID_EXISTS",
            Self::WrongCallId(_) => "MULTISIG_WRONG_CALL_ID",
            Self::NotFoundUniqueId(_) => "MULTISIG_UNIQUE_ID_NOT_FOUND",
            Self::VoteAlreadyConfirmed { .. } => "MULTISIG_VOTE_ALREADY_CONFIRMED",
            Self::VoteNotApproved { .. } => "MULTISIG_VOTE_NOT_APPROVED",
            Self::VoteAlreadyApproved(_) => "MULTISIG_VOTE_ALREADY_APPROVED",
            Self::VoteAlreadyRejected(_) => "MULTISIG_VOTE_ALREADY_REJECTED",
            Self::InvalidUniqueId(_) => "MULTISIG_INVALID_UNIQUE_ID",
        }
    }
}

impl Codespace for MultisigError {
    fn codespace(&self) -> &'static str {
        MULTISIG_CODESPACE
    }

    fn abci_code(&self) -> u32 {
        match self {
            Self::OnlyMultisig => 2,
            Self::NotValidator(_) => 3,
            Self::CallUniqueIdExists(_) => 4,
            Self::WrongCallId(_) => 5,
            Self::NotFoundUniqueId(_) => 6,
            Self::VoteAlreadyConfirmed { .. } => 7,
            Self::VoteNotApproved { .. } => 8,
            Self::VoteAlreadyApproved(_) => 9,
            Self::VoteAlreadyRejected(_) => 10,
            Self::InvalidUniqueId(_) => 11,
        }
    }
}

/// Errors raised by the authority registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// The validator is already registered.
    #[error("validator {0} already exists")]
    ValidatorExists(AccountId),
    /// The validator is not registered.
    #[error("validator {0} does not exist")]
    ValidatorDoesntExist(AccountId),
    /// Removing a validator would drop below the minimum.
    #[error("minimum number of validators ({0}) reached")]
    MinValidatorsReached(u32),
    /// Adding a validator would exceed the maximum.
    #[error("maximum number of validators ({0}) reached")]
    MaxValidatorsReached(u32),
    /// The proposed bounds are malformed or exclude the current set.
    #[error("invalid authority params: {0}")]
    InvalidParams(String),
}

impl ErrorCode for AuthorityError {
    fn code(&self) -> &'static str {
        match self {
            Self::ValidatorExists(_) => "POA_VALIDATOR_EXISTS",
            Self::ValidatorDoesntExist(_) => "POA_VALIDATOR_DOESNT_EXIST",
            Self::MinValidatorsReached(_) => "POA_MIN_VALIDATORS_REACHED",
            Self::MaxValidatorsReached(_) => "POA_MAX_VALIDATORS_REACHED",
            Self::InvalidParams(_) => "POA_INVALID_PARAMS",
        }
    }
}

impl Codespace for AuthorityError {
    fn codespace(&self) -> &'static str {
        AUTHORITY_CODESPACE
    }

    fn abci_code(&self) -> u32 {
        match self {
            Self::ValidatorExists(_) => 2,
            Self::ValidatorDoesntExist(_) => 3,
            Self::MinValidatorsReached(_) => 4,
            Self::MaxValidatorsReached(_) => 5,
            Self::InvalidParams(_) => 6,
        }
    }
}

/// Errors related to protocol upgrades.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpgradeError {
    /// The upgrade plan is invalid.
    #[error("Invalid upgrade: {0}")]
    InvalidUpgrade(String),
    /// There is no scheduled upgrade to act on.
    #[error("No upgrade is scheduled")]
    NoScheduledUpgrade,
    /// A plan with this name was already applied.
    #[error("Upgrade '{0}' was already applied")]
    AlreadyApplied(String),
}

impl ErrorCode for UpgradeError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidUpgrade(_) => "UPGRADE_INVALID",
            Self::NoScheduledUpgrade => "UPGRADE_NONE_SCHEDULED",
            Self::AlreadyApplied(_) => "UPGRADE_ALREADY_APPLIED",
        }
    }
}

impl Codespace for UpgradeError {
    fn codespace(&self) -> &'static str {
        UPGRADE_CODESPACE
    }

    fn abci_code(&self) -> u32 {
        match self {
            Self::InvalidUpgrade(_) => 2,
            Self::NoScheduledUpgrade => 3,
            Self::AlreadyApplied(_) => 4,
        }
    }
}

/// Errors that can occur during transaction processing.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// An error during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error during deserialization.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// The transaction is invalid for a reason not covered by another variant.
    #[error("Invalid transaction: {0}")]
    Invalid(String),
    /// The transaction targets a different chain.
    #[error("Chain id mismatch. Expected: {expected}, Got: {got}")]
    ChainIdMismatch {
        /// The chain applying the transaction.
        expected: u32,
        /// The chain named in the header.
        got: u32,
    },
    /// An error from the multisig voting engine.
    #[error("Multisig error: {0}")]
    Multisig(#[from] MultisigError),
    /// An error from the authority registry.
    #[error("Authority error: {0}")]
    Authority(#[from] AuthorityError),
    /// An error from the upgrade service.
    #[error("Upgrade error: {0}")]
    Upgrade(#[from] UpgradeError),
    /// An error from the state store.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// The account has insufficient funds.
    #[error("Insufficient funds")]
    InsufficientFunds,
    /// An arithmetic operation on a balance resulted in an overflow.
    #[error("Balance overflow")]
    BalanceOverflow,
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "TX_SERIALIZATION_ERROR",
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
            Self::Invalid(_) => "TX_INVALID",
            Self::ChainIdMismatch { .. } => "TX_CHAIN_ID_MISMATCH",
            Self::Multisig(e) => e.code(),
            Self::Authority(e) => e.code(),
            Self::Upgrade(e) => e.code(),
            Self::State(e) => e.code(),
            Self::InsufficientFunds => "TX_INSUFFICIENT_FUNDS",
            Self::BalanceOverflow => "TX_BALANCE_OVERFLOW",
        }
    }
}

impl Codespace for TransactionError {
    fn codespace(&self) -> &'static str {
        match self {
            Self::Multisig(e) => e.codespace(),
            Self::Authority(e) => e.codespace(),
            Self::Upgrade(e) => e.codespace(),
            Self::InsufficientFunds | Self::BalanceOverflow => BANK_CODESPACE,
            _ => KERNEL_CODESPACE,
        }
    }

    fn abci_code(&self) -> u32 {
        match self {
            Self::Multisig(e) => e.abci_code(),
            Self::Authority(e) => e.abci_code(),
            Self::Upgrade(e) => e.abci_code(),
            Self::InsufficientFunds => 2,
            Self::BalanceOverflow => 3,
            Self::State(_) => 1,
            Self::Serialization(_) => 2,
            Self::Deserialization(_) => 3,
            Self::Invalid(_) => 4,
            Self::ChainIdMismatch { .. } => 5,
        }
    }
}

impl From<String> for TransactionError {
    fn from(e: String) -> Self {
        TransactionError::Invalid(e)
    }
}

impl From<parity_scale_codec::Error> for TransactionError {
    fn from(e: parity_scale_codec::Error) -> Self {
        TransactionError::Deserialization(e.to_string())
    }
}

/// Errors related to block processing.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The block's height is incorrect.
    #[error("Invalid block height. Expected {expected}, got {got}")]
    InvalidHeight {
        /// The expected block height.
        expected: u64,
        /// The height of the received block.
        got: u64,
    },
    /// The block belongs to another chain.
    #[error("Invalid chain id. Expected {expected}, got {got}")]
    InvalidChainId {
        /// The chain applying the block.
        expected: u32,
        /// The chain named in the block header.
        got: u32,
    },
}

impl ErrorCode for BlockError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidHeight { .. } => "BLOCK_INVALID_HEIGHT",
            Self::InvalidChainId { .. } => "BLOCK_INVALID_CHAIN_ID",
        }
    }
}

/// Errors that abort a whole block or the chain's initialization.
#[derive(Debug, Error)]
pub enum ChainError {
    /// An error occurred while processing a block.
    #[error("Block processing error: {0}")]
    Block(#[from] BlockError),
    /// A transaction-level error escaped into block processing (end-block hooks).
    #[error("Transaction processing error: {0}")]
    Transaction(String),
    /// An error occurred in the state store.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// Genesis state is inconsistent.
    #[error("Genesis error: {0}")]
    Genesis(String),
}

impl ErrorCode for ChainError {
    fn code(&self) -> &'static str {
        match self {
            Self::Block(e) => e.code(),
            Self::Transaction(_) => "CHAIN_TRANSACTION_ERROR",
            Self::State(e) => e.code(),
            Self::Genesis(_) => "CHAIN_GENESIS_ERROR",
        }
    }
}

impl From<TransactionError> for ChainError {
    fn from(err: TransactionError) -> Self {
        ChainError::Transaction(err.to_string())
    }
}

/// General-purpose errors for kernel wiring.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required service is not registered.
    #[error("Service not found: {0}")]
    ServiceNotFound(String),
    /// A dispatch table is incomplete or registers a kind twice.
    #[error("Invalid dispatch table: {0}")]
    InvalidRouter(String),
    /// A custom error with a descriptive message.
    #[error("Custom error: {0}")]
    Custom(String),
}

impl ErrorCode for CoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::ServiceNotFound(_) => "CORE_SERVICE_NOT_FOUND",
            Self::InvalidRouter(_) => "CORE_INVALID_ROUTER",
            Self::Custom(_) => "CORE_CUSTOM_ERROR",
        }
    }
}

impl From<String> for CoreError {
    fn from(s: String) -> Self {
        CoreError::Custom(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_errors_keep_their_codespace() {
        let err = TransactionError::from(MultisigError::OnlyMultisig);
        assert_eq!(err.codespace(), "multisig");
        assert_eq!(err.abci_code(), 2);
        assert_eq!(err.code(), "MULTISIG_ONLY_MULTISIG");

        let err = TransactionError::from(AuthorityError::MaxValidatorsReached(8));
        assert_eq!(err.codespace(), "poa");
        assert_eq!(err.abci_code(), 5);
    }

    #[test]
    fn error_response_carries_message() {
        let err = TransactionError::from(MultisigError::VoteAlreadyRejected(3));
        let resp = ErrorResponse::from_error(&err);
        assert_eq!(resp.codespace, "multisig");
        assert_eq!(resp.code, 10);
        assert!(resp.message.contains("call 3 is already rejected"));
    }

    #[test]
    fn multisig_codes_are_distinct() {
        let errs = [
            MultisigError::OnlyMultisig,
            MultisigError::NotValidator(AccountId::default()),
            MultisigError::CallUniqueIdExists(String::new()),
            MultisigError::WrongCallId(0),
            MultisigError::NotFoundUniqueId(String::new()),
            MultisigError::VoteAlreadyConfirmed {
                call_id: 0,
                voter: AccountId::default(),
            },
            MultisigError::VoteNotApproved {
                call_id: 0,
                voter: AccountId::default(),
            },
            MultisigError::VoteAlreadyApproved(0),
            MultisigError::VoteAlreadyRejected(0),
            MultisigError::InvalidUniqueId(String::new()),
        ];
        let mut codes: Vec<u32> = errs.iter().map(|e| e.abci_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }
}
