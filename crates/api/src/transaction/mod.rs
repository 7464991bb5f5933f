// Path: crates/api/src/transaction/mod.rs
//! Defines the core `TransactionModel` trait.

use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use meridian_types::app::KernelEvent;
use meridian_types::error::TransactionError;

/// Defines the stable context for transaction execution.
pub mod context;

/// Applies one ordered transaction to state.
///
/// Implementations write through `state` freely; the executor hands them a fresh
/// overlay and discards it if an error is returned, so a failed transaction leaves
/// no writes behind.
pub trait TransactionModel: Send + Sync {
    /// The transaction type this model understands.
    type Transaction;

    /// Validates and executes `tx`, returning the events it emitted.
    fn apply_payload(
        &self,
        state: &mut dyn StateAccess,
        tx: &Self::Transaction,
        ctx: &TxContext<'_>,
    ) -> Result<Vec<KernelEvent>, TransactionError>;
}
