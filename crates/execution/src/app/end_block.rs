// Path: crates/execution/src/app/end_block.rs

//! Logic that runs after the last transaction of a block and before the commit.

use meridian_api::services::access::ServiceDirectory;
use meridian_api::state::StateAccess;
use meridian_api::transaction::context::TxContext;
use meridian_types::app::KernelEvent;
use meridian_types::error::ChainError;
use meridian_types::service_configs::Capabilities;

/// Runs the `on_end_block` hook of every service that declares the capability,
/// in service-id order, and collects their events.
pub(super) fn run_on_end_block_hooks(
    services: &ServiceDirectory,
    state: &mut dyn StateAccess,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, ChainError> {
    let mut events = Vec::new();
    for service in services.services_in_deterministic_order() {
        if !service.capabilities().contains(Capabilities::ON_END_BLOCK) {
            continue;
        }
        let Some(hook) = service.as_on_end_block() else {
            tracing::warn!(
                target: "end_block",
                service = service.id(),
                "Service declares ON_END_BLOCK but exposes no hook."
            );
            continue;
        };
        let emitted = hook.on_end_block(state, ctx).map_err(|e| {
            tracing::error!(
                target: "end_block",
                height = ctx.block_height,
                service = service.id(),
                error = %e,
                "End-block hook failed."
            );
            ChainError::State(e)
        })?;
        if !emitted.is_empty() {
            tracing::debug!(
                target: "end_block",
                height = ctx.block_height,
                service = service.id(),
                events = emitted.len(),
                "End-block hook emitted events."
            );
        }
        events.extend(emitted);
    }
    Ok(events)
}
