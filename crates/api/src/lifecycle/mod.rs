// Path: crates/api/src/lifecycle/mod.rs
//! Defines traits for services that hook into the block processing lifecycle.

use crate::services::BlockchainService;
use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use meridian_types::app::KernelEvent;
use meridian_types::error::StateError;

/// A trait for services that need to perform actions at the end of a block.
pub trait OnEndBlock: BlockchainService {
    /// Called once after all transactions in a block have been processed.
    /// Returns the events the hook emitted.
    fn on_end_block(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
    ) -> Result<Vec<KernelEvent>, StateError>;
}
