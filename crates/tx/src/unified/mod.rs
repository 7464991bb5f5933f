// Path: crates/tx/src/unified/mod.rs
//! Routing of user transactions to the multisig and bank services.

use crate::system::validation::{validate_stateless, verify_chain_id};
use meridian_api::error::ErrorCode;
use meridian_api::state::StateAccess;
use meridian_api::transaction::context::TxContext;
use meridian_api::transaction::TransactionModel;
use meridian_services::bank::BankModule;
use meridian_services::multisig::MultisigModule;
use meridian_telemetry::sinks::error_metrics;
use meridian_types::app::{ChainTransaction, KernelEvent, TxPayload};
use meridian_types::error::{MultisigError, TransactionError};

/// The single transaction model of the kernel.
///
/// Every user transaction runs with `is_internal == false` and with the header's
/// account as signer, whatever context the caller passes in.
#[derive(Clone, Debug, Default)]
pub struct UnifiedTransactionModel;

impl UnifiedTransactionModel {
    pub fn new() -> Self {
        Self
    }

    fn dispatch(
        &self,
        state: &mut dyn StateAccess,
        tx: &ChainTransaction,
        ctx: &TxContext<'_>,
    ) -> Result<Vec<KernelEvent>, TransactionError> {
        verify_chain_id(tx, ctx.chain_id)?;
        validate_stateless(tx)?;

        match &tx.payload {
            TxPayload::SubmitCall { payload, unique_id } => {
                let multisig = ctx.service::<MultisigModule>()?;
                multisig.submit_call(state, ctx, payload.clone(), unique_id.clone())
            }
            TxPayload::ConfirmCall { call_id } => {
                let multisig = ctx.service::<MultisigModule>()?;
                multisig.confirm_call(state, ctx, *call_id)
            }
            TxPayload::RevokeConfirm { call_id } => {
                let multisig = ctx.service::<MultisigModule>()?;
                multisig.revoke_confirm(state, ctx, *call_id)
            }
            TxPayload::Transfer { to, denom, amount } => {
                let bank = ctx.service::<BankModule>()?;
                let from = ctx.signer_account_id;
                bank.transfer(state, &from, to, denom, *amount)?;
                Ok(vec![KernelEvent::CurrencyTransferred {
                    denom: denom.clone(),
                    amount: *amount,
                    from,
                    to: *to,
                }])
            }
            TxPayload::Privileged(payload) => {
                tracing::warn!(
                    target: "tx",
                    sender = %ctx.signer_account_id,
                    kind = %payload.kind(),
                    "privileged operation sent outside multisig"
                );
                Err(MultisigError::OnlyMultisig.into())
            }
        }
    }
}

impl TransactionModel for UnifiedTransactionModel {
    type Transaction = ChainTransaction;

    fn apply_payload(
        &self,
        state: &mut dyn StateAccess,
        tx: &Self::Transaction,
        ctx: &TxContext<'_>,
    ) -> Result<Vec<KernelEvent>, TransactionError> {
        let ctx = TxContext {
            signer_account_id: tx.header.account_id,
            is_internal: false,
            ..ctx.clone()
        };
        let result = self.dispatch(state, tx, &ctx);
        if let Err(e) = &result {
            error_metrics().inc_error("tx", e.code());
            tracing::debug!(
                target: "tx",
                sender = %ctx.signer_account_id,
                height = ctx.block_height,
                code = e.code(),
                error = %e,
                "transaction rejected"
            );
        }
        result
    }
}
