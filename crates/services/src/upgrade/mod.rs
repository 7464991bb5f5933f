// Path: crates/services/src/upgrade/mod.rs
//! Protocol upgrade scheduling.
//!
//! At most one plan is scheduled at a time; scheduling a new plan replaces it.
//! The end-block hook activates the plan when the chain reaches its height and
//! records the activation height under the plan's name.

use crate::multisig::payload_mismatch;
use meridian_api::lifecycle::OnEndBlock;
use meridian_api::services::BlockchainService;
use meridian_api::state::{StateAccess, StateAccessExt};
use meridian_api::transaction::context::TxContext;
use meridian_types::app::{CallKind, CallPayload, KernelEvent, UpgradePlan};
use meridian_types::error::{StateError, TransactionError, UpgradeError};
use meridian_types::keys::{upgrade_done_key, UPGRADE_PLAN_KEY};
use meridian_types::service_configs::Capabilities;
use std::any::Any;

/// The upgrade service.
#[derive(Default, Debug, Clone, Copy)]
pub struct UpgradeModule;

impl UpgradeModule {
    /// The currently scheduled plan, if any.
    pub fn scheduled_plan<S: StateAccess + ?Sized>(
        &self,
        state: &S,
    ) -> Result<Option<UpgradePlan>, StateError> {
        state.get_decoded(UPGRADE_PLAN_KEY)
    }

    /// The height at which the upgrade `name` applied, if it did.
    pub fn applied_height<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        name: &str,
    ) -> Result<Option<u64>, StateError> {
        state.get_decoded(&upgrade_done_key(name))
    }

    /// Schedules `plan`, replacing any existing plan.
    pub fn schedule(
        &self,
        state: &mut dyn StateAccess,
        plan: &UpgradePlan,
        current_height: u64,
    ) -> Result<(), TransactionError> {
        if plan.name.trim().is_empty() {
            return Err(UpgradeError::InvalidUpgrade("plan name is empty".into()).into());
        }
        if plan.height <= current_height {
            return Err(UpgradeError::InvalidUpgrade(format!(
                "activation height {} is not after current height {}",
                plan.height, current_height
            ))
            .into());
        }
        if self.applied_height(&*state, &plan.name)?.is_some() {
            return Err(UpgradeError::AlreadyApplied(plan.name.clone()).into());
        }
        if let Some(prev) = self.scheduled_plan(&*state)? {
            log::info!("[Upgrade] Plan '{}' replaced by '{}'", prev.name, plan.name);
        }
        state.insert_encoded(UPGRADE_PLAN_KEY, plan)?;
        Ok(())
    }

    /// Clears the scheduled plan and returns it.
    pub fn cancel(&self, state: &mut dyn StateAccess) -> Result<UpgradePlan, TransactionError> {
        let plan = self
            .scheduled_plan(&*state)?
            .ok_or(UpgradeError::NoScheduledUpgrade)?;
        state.delete(UPGRADE_PLAN_KEY)?;
        Ok(plan)
    }
}

impl BlockchainService for UpgradeModule {
    fn id(&self) -> &str {
        "upgrade"
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

impl OnEndBlock for UpgradeModule {
    fn on_end_block(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
    ) -> Result<Vec<KernelEvent>, StateError> {
        let Some(plan) = self.scheduled_plan(&*state)? else {
            return Ok(Vec::new());
        };
        if plan.height > ctx.block_height {
            return Ok(Vec::new());
        }
        state.delete(UPGRADE_PLAN_KEY)?;
        state.insert_encoded(&upgrade_done_key(&plan.name), &ctx.block_height)?;
        log::info!(
            "[Upgrade] Applied upgrade '{}' at height {} ({})",
            plan.name,
            ctx.block_height,
            plan.info
        );
        Ok(vec![KernelEvent::UpgradeApplied {
            name: plan.name,
            height: ctx.block_height,
        }])
    }
}

// --- Dispatch handlers ---

/// Executes an approved `ScheduleUpgrade` call.
pub fn handle_schedule(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    let CallPayload::ScheduleUpgrade { plan } = payload else {
        return Err(payload_mismatch(CallKind::ScheduleUpgrade, payload));
    };
    ctx.service::<UpgradeModule>()?
        .schedule(state, plan, ctx.block_height)?;
    Ok(vec![KernelEvent::UpgradeScheduled {
        name: plan.name.clone(),
        height: plan.height,
    }])
}

/// Executes an approved `CancelUpgrade` call.
pub fn handle_cancel(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    if payload.kind() != CallKind::CancelUpgrade {
        return Err(payload_mismatch(CallKind::CancelUpgrade, payload));
    }
    let plan = ctx.service::<UpgradeModule>()?.cancel(state)?;
    Ok(vec![KernelEvent::UpgradeCancelled { name: plan.name }])
}
