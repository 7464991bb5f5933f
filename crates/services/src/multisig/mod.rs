// Path: crates/services/src/multisig/mod.rs
//! The multisig voting engine.
//!
//! Validators submit privileged operations as calls and vote on them. A call is
//! approved the moment its vote count reaches the quorum of the current validator
//! set, and its payload is dispatched in the same step. Calls that stay pending for
//! longer than `interval_to_execute` blocks are rejected by the end-block sweep.
//!
//! Terminal states are final: an approved or rejected call never changes status
//! again. A handler failure is recorded on the call and does not undo approval.

mod ledger;
mod router;

pub use ledger::CallLedger;
pub use router::{payload_mismatch, CallHandler, DispatchRouter, RouterBuilder};

use crate::authority::AuthorityRegistry;
use meridian_api::lifecycle::OnEndBlock;
use meridian_api::services::BlockchainService;
use meridian_api::state::{StateAccess, StateOverlay};
use meridian_api::transaction::context::TxContext;
use meridian_types::app::{Call, CallId, CallPayload, KernelEvent};
use meridian_types::error::{MultisigError, StateError, TransactionError};
use meridian_types::service_configs::{Capabilities, MultisigParams};
use meridian_types::MAX_UNIQUE_ID_BYTES;
use std::any::Any;

/// The voting engine service.
#[derive(Debug)]
pub struct MultisigModule {
    params: MultisigParams,
    router: DispatchRouter,
}

impl MultisigModule {
    /// Creates the engine with its expiry policy and dispatch table.
    pub fn new(params: MultisigParams, router: DispatchRouter) -> Self {
        Self { params, router }
    }

    /// The engine's parameters.
    pub fn params(&self) -> &MultisigParams {
        &self.params
    }

    /// Submits a new call on behalf of `ctx.signer_account_id`, recording the
    /// creator's vote. If one vote already meets quorum the call executes at once.
    pub fn submit_call(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext<'_>,
        payload: CallPayload,
        unique_id: String,
    ) -> Result<Vec<KernelEvent>, TransactionError> {
        if unique_id.is_empty() || unique_id.len() > MAX_UNIQUE_ID_BYTES {
            return Err(MultisigError::InvalidUniqueId(format!(
                "length must be 1..={} bytes",
                MAX_UNIQUE_ID_BYTES
            ))
            .into());
        }
        let creator = ctx.signer_account_id;
        let registry = ctx.service::<AuthorityRegistry>()?;
        if !registry.is_validator(&*state, &creator)? {
            return Err(MultisigError::NotValidator(creator).into());
        }
        if CallLedger::id_for_unique(&*state, &unique_id)?.is_some() {
            return Err(MultisigError::CallUniqueIdExists(unique_id).into());
        }

        let id = CallLedger::next_id(state)?;
        let call = Call::new(id, unique_id, payload, creator, ctx.block_height);
        CallLedger::insert_new(state, &call)?;
        log::info!(
            "[Multisig] Call {} ('{}', {}) submitted by {} at height {}",
            id,
            call.unique_id,
            call.payload.kind(),
            creator,
            ctx.block_height
        );

        let mut events = vec![KernelEvent::CallSubmitted {
            call_id: id,
            unique_id: call.unique_id.clone(),
            kind: call.payload.kind(),
            creator,
        }];
        self.approve_if_quorum(state, ctx, &registry, call, &mut events)?;
        Ok(events)
    }

    /// Adds the sender's vote to a call and approves it if quorum is now met.
    pub fn confirm_call(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext<'_>,
        call_id: CallId,
    ) -> Result<Vec<KernelEvent>, TransactionError> {
        let voter = ctx.signer_account_id;
        let mut call =
            CallLedger::get(&*state, call_id)?.ok_or(MultisigError::WrongCallId(call_id))?;
        let registry = ctx.service::<AuthorityRegistry>()?;
        if !registry.is_validator(&*state, &voter)? {
            return Err(MultisigError::NotValidator(voter).into());
        }
        if call.has_vote(&voter) {
            return Err(MultisigError::VoteAlreadyConfirmed { call_id, voter }.into());
        }
        if call.rejected {
            return Err(MultisigError::VoteAlreadyRejected(call_id).into());
        }
        if call.approved {
            return Err(MultisigError::VoteAlreadyApproved(call_id).into());
        }

        call.votes.push(voter);
        log::debug!(
            "[Multisig] Call {} confirmed by {} ({} votes)",
            call_id,
            voter,
            call.votes.len()
        );
        let mut events = vec![KernelEvent::CallConfirmed { call_id, voter }];
        self.approve_if_quorum(state, ctx, &registry, call, &mut events)?;
        Ok(events)
    }

    /// Withdraws the sender's vote. Withdrawing the last vote deletes the call.
    pub fn revoke_confirm(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext<'_>,
        call_id: CallId,
    ) -> Result<Vec<KernelEvent>, TransactionError> {
        let voter = ctx.signer_account_id;
        let mut call =
            CallLedger::get(&*state, call_id)?.ok_or(MultisigError::WrongCallId(call_id))?;
        if !call.has_vote(&voter) {
            return Err(MultisigError::VoteNotApproved { call_id, voter }.into());
        }
        if call.rejected {
            return Err(MultisigError::VoteAlreadyRejected(call_id).into());
        }
        if call.approved {
            return Err(MultisigError::VoteAlreadyApproved(call_id).into());
        }

        call.votes.retain(|v| *v != voter);
        let mut events = vec![KernelEvent::CallRevoked { call_id, voter }];
        if call.votes.is_empty() {
            CallLedger::remove(state, call_id)?;
            log::info!("[Multisig] Call {} dropped: last vote revoked", call_id);
            events.push(KernelEvent::CallDropped { call_id });
        } else {
            CallLedger::update(state, &call)?;
        }
        Ok(events)
    }

    /// Fetches a call by numeric id.
    pub fn get_call<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        call_id: CallId,
    ) -> Result<Call, TransactionError> {
        CallLedger::get(state, call_id)?.ok_or_else(|| MultisigError::WrongCallId(call_id).into())
    }

    /// Fetches a call by its unique id.
    pub fn get_call_by_unique_id<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        unique_id: &str,
    ) -> Result<Call, TransactionError> {
        let not_found = || MultisigError::NotFoundUniqueId(unique_id.to_string());
        let id = CallLedger::id_for_unique(state, unique_id)?.ok_or_else(not_found)?;
        Ok(CallLedger::get(state, id)?.ok_or_else(not_found)?)
    }

    /// All pending calls in ascending id order.
    pub fn pending_calls<S: StateAccess + ?Sized>(
        &self,
        state: &S,
    ) -> Result<Vec<Call>, TransactionError> {
        Ok(CallLedger::pending(state)?)
    }

    /// The last assigned call id, or 0 if none was assigned.
    pub fn last_call_id<S: StateAccess + ?Sized>(&self, state: &S) -> Result<CallId, TransactionError> {
        Ok(CallLedger::last_id(state)?)
    }

    /// Approves and executes `call` if its votes meet the live quorum; otherwise
    /// just persists it.
    fn approve_if_quorum(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext<'_>,
        registry: &AuthorityRegistry,
        mut call: Call,
        events: &mut Vec<KernelEvent>,
    ) -> Result<(), TransactionError> {
        let quorum = registry.quorum(&*state)?;
        if call.votes.len() < quorum {
            CallLedger::update(state, &call)?;
            return Ok(());
        }

        call.approved = true;
        log::info!(
            "[Multisig] Call {} approved with {}/{} votes",
            call.id,
            call.votes.len(),
            quorum
        );
        events.push(KernelEvent::CallApproved {
            call_id: call.id,
            votes: u32::try_from(call.votes.len()).unwrap_or(u32::MAX),
            quorum: u32::try_from(quorum).unwrap_or(u32::MAX),
        });

        let outcome = self.execute(state, ctx, &call.payload);
        call.executed = true;
        let error = match outcome {
            Ok(handler_events) => {
                events.extend(handler_events);
                None
            }
            Err(e) => {
                log::warn!("[Multisig] Call {} execution failed: {}", call.id, e);
                call.failed = true;
                call.execution_error = Some(e.to_string());
                Some(e.to_string())
            }
        };
        events.push(KernelEvent::CallExecuted {
            call_id: call.id,
            error,
        });
        CallLedger::update(state, &call)?;
        Ok(())
    }

    /// Runs the handler in its own overlay so a failing handler leaves no partial writes.
    fn execute(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext<'_>,
        payload: &CallPayload,
    ) -> Result<Vec<KernelEvent>, TransactionError> {
        let internal = ctx.as_internal();
        let mut scratch = StateOverlay::new(&*state);
        let events = self.router.dispatch(&mut scratch, payload, &internal)?;
        let (inserts, deletes) = scratch.into_ordered_batch();
        state.batch_apply(&inserts, &deletes)?;
        Ok(events)
    }

    /// Rejects every pending call that has outlived `interval_to_execute` at `height`.
    pub fn reject_expired(
        &self,
        state: &mut dyn StateAccess,
        height: u64,
    ) -> Result<Vec<KernelEvent>, StateError> {
        let mut events = Vec::new();
        for id in CallLedger::pending_ids(&*state)? {
            let Some(mut call) = CallLedger::get(&*state, id)? else {
                continue;
            };
            if !call.is_expired_at(height, self.params.interval_to_execute) {
                continue;
            }
            call.rejected = true;
            CallLedger::update(state, &call)?;
            log::info!(
                "[Multisig] Call {} rejected at height {} (submitted at {}, {} votes)",
                id,
                height,
                call.submitted_height,
                call.votes.len()
            );
            events.push(KernelEvent::CallRejected { call_id: id });
        }
        Ok(events)
    }
}

impl BlockchainService for MultisigModule {
    fn id(&self) -> &str {
        "multisig"
    }

    fn state_schema(&self) -> &str {
        "v1"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ON_END_BLOCK
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_on_end_block(&self) -> Option<&dyn OnEndBlock> {
        Some(self)
    }
}

impl OnEndBlock for MultisigModule {
    fn on_end_block(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
    ) -> Result<Vec<KernelEvent>, StateError> {
        self.reject_expired(state, ctx.block_height)
    }
}

#[cfg(test)]
mod tests;
