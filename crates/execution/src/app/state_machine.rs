// Path: crates/execution/src/app/state_machine.rs
//! Block application: header checks, per-transaction overlays, end-block hooks and commit.

use super::{end_block, BlockOutcome, ExecutionMachine, GenesisState};
use crate::util::record_event_metrics;
use meridian_api::error::ErrorCode;
use meridian_api::state::{StateAccess, StateAccessExt, StateOverlay};
use meridian_api::transaction::context::TxContext;
use meridian_api::transaction::TransactionModel;
use meridian_services::multisig::CallLedger;
use meridian_telemetry::sinks::governance_metrics;
use meridian_types::app::{AccountId, Block, ChainStatus, ChainTransaction, KernelEvent, TxReceipt};
use meridian_types::error::{BlockError, ChainError, ErrorResponse};
use meridian_types::keys::STATUS_KEY;

impl<S: StateAccess> ExecutionMachine<S> {
    /// Applies one finalized block and commits it.
    ///
    /// The block must be the next height on this chain. A failing transaction is
    /// rolled back and reported in its receipt. Only a failure outside any
    /// transaction aborts the block, in which case nothing is committed.
    pub fn apply_block(
        &mut self,
        block: &Block<ChainTransaction>,
    ) -> Result<BlockOutcome, ChainError> {
        self.check_header(block)?;
        let height = block.header.height;
        let span = tracing::info_span!(target: "execution", "apply_block", height);
        let _enter = span.enter();

        let ctx = TxContext {
            block_height: height,
            chain_id: self.chain_id,
            signer_account_id: AccountId::default(),
            services: &self.services,
            is_internal: false,
        };

        let mut block_overlay = StateOverlay::new(&self.store);
        let mut receipts = Vec::with_capacity(block.transactions.len());
        for (index, tx) in block.transactions.iter().enumerate() {
            let index = u32::try_from(index)
                .map_err(|_| ChainError::Transaction("too many transactions in block".into()))?;
            receipts.push(self.process_transaction(&mut block_overlay, tx, index, &ctx)?);
        }

        let end_ctx = ctx.as_internal();
        let end_block_events =
            end_block::run_on_end_block_hooks(&self.services, &mut block_overlay, &end_ctx)?;

        let applied = receipts.iter().filter(|r| r.is_success()).count() as u64;
        let status = ChainStatus {
            height,
            total_transactions: self.status.total_transactions.saturating_add(applied),
        };
        block_overlay.insert_encoded(STATUS_KEY, &status)?;

        let (inserts, deletes) = block_overlay.into_ordered_batch();
        self.store.batch_apply(&inserts, &deletes)?;
        self.status = status;

        record_event_metrics(
            receipts
                .iter()
                .flat_map(|r| r.events.iter())
                .chain(end_block_events.iter()),
        );
        let metrics = governance_metrics();
        metrics.set_block_height(height);
        match CallLedger::pending_ids(&self.store) {
            Ok(ids) => metrics.set_pending_calls(ids.len() as u64),
            Err(e) => tracing::warn!(target: "execution", error = %e, "Could not count pending calls."),
        }

        tracing::info!(
            target: "execution",
            event = "block_committed",
            height,
            transactions = receipts.len(),
            applied,
            end_block_events = end_block_events.len(),
            writes = inserts.len(),
            deletes = deletes.len(),
        );

        Ok(BlockOutcome {
            height,
            receipts,
            end_block_events,
        })
    }

    fn check_header(&self, block: &Block<ChainTransaction>) -> Result<(), ChainError> {
        if self.genesis_state == GenesisState::Pending {
            return Err(ChainError::Genesis("genesis has not been initialized".into()));
        }
        if block.header.chain_id != self.chain_id {
            return Err(BlockError::InvalidChainId {
                expected: self.chain_id.0,
                got: block.header.chain_id.0,
            }
            .into());
        }
        let expected = self.status.height.saturating_add(1);
        if block.header.height != expected {
            return Err(BlockError::InvalidHeight {
                expected,
                got: block.header.height,
            }
            .into());
        }
        Ok(())
    }

    /// Runs one transaction in its own overlay and folds its writes into the
    /// block overlay if it succeeds.
    fn process_transaction(
        &self,
        block_overlay: &mut StateOverlay<'_>,
        tx: &ChainTransaction,
        index: u32,
        ctx: &TxContext<'_>,
    ) -> Result<TxReceipt, ChainError> {
        let mut tx_overlay = StateOverlay::new(&*block_overlay);
        let result = self
            .transaction_model
            .apply_payload(&mut tx_overlay, tx, ctx);

        match result {
            Ok(events) => {
                let (inserts, deletes) = tx_overlay.into_ordered_batch();
                block_overlay.batch_apply(&inserts, &deletes)?;
                Ok(TxReceipt {
                    index,
                    events,
                    error: None,
                })
            }
            Err(e) => {
                tracing::info!(
                    target: "execution",
                    index,
                    sender = %tx.header.account_id,
                    code = e.code(),
                    error = %e,
                    "Transaction failed; rolled back."
                );
                Ok(TxReceipt {
                    index,
                    events: Vec::<KernelEvent>::new(),
                    error: Some(ErrorResponse::from_error(&e)),
                })
            }
        }
    }
}
