// Path: crates/api/src/transaction/context.rs
//! Defines the stable context for transaction execution.

use crate::services::access::ServiceDirectory;
use crate::services::BlockchainService;
use meridian_types::app::{AccountId, ChainId};
use meridian_types::error::TransactionError;
use std::sync::Arc;

/// Provides stable, read-only context to transaction models and services during execution.
#[derive(Clone)]
pub struct TxContext<'a> {
    /// The current block height being processed.
    pub block_height: u64,
    /// The unique identifier of the chain for replay protection.
    pub chain_id: ChainId,
    /// The `AccountId` of the entity that sent the current transaction.
    /// This is the authoritative source for permission checks within services.
    pub signer_account_id: AccountId,
    /// A read-only directory of available blockchain services.
    pub services: &'a ServiceDirectory,
    /// True when the chain itself is acting: an approved multisig call being
    /// dispatched, or an end-block hook. Always `false` for a user transaction.
    pub is_internal: bool,
}

impl<'a> TxContext<'a> {
    /// Returns a copy of this context marked as chain-initiated.
    pub fn as_internal(&self) -> Self {
        Self {
            is_internal: true,
            ..self.clone()
        }
    }

    /// Looks up a required service by concrete type.
    pub fn service<T: BlockchainService>(&self) -> Result<Arc<T>, TransactionError> {
        self.services.get::<T>().ok_or_else(|| {
            TransactionError::Invalid(format!(
                "required service '{}' is not registered",
                std::any::type_name::<T>()
            ))
        })
    }
}
