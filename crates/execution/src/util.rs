// Path: crates/execution/src/util.rs
//! Genesis writing and event-to-metrics mapping helpers.

use meridian_api::state::StateAccess;
use meridian_services::authority::AuthorityRegistry;
use meridian_services::bank::BankModule;
use meridian_telemetry::sinks::governance_metrics;
use meridian_types::app::KernelEvent;
use meridian_types::config::GenesisConfig;
use meridian_types::error::ChainError;

/// Writes the genesis validator set, registry bounds and initial balances.
///
/// The registry enforces `min <= n <= max` and address uniqueness, so an
/// inconsistent genesis is refused here rather than at the first block.
pub fn write_genesis_state(
    state: &mut dyn StateAccess,
    genesis: &GenesisConfig,
) -> Result<(), ChainError> {
    tracing::info!(
        target: "execution",
        validators = genesis.validators.len(),
        balances = genesis.balances.len(),
        "Writing genesis state."
    );
    AuthorityRegistry
        .init_genesis(state, &genesis.validators, genesis.authority_params)
        .map_err(|e| ChainError::Genesis(e.to_string()))?;
    for entry in &genesis.balances {
        BankModule
            .mint(state, &entry.denom, &entry.address, u128::from(entry.amount))
            .map_err(|e| {
                ChainError::Genesis(format!("balance for {}: {}", entry.address, e))
            })?;
    }
    Ok(())
}

/// Feeds governance counters from the events of a committed block.
pub fn record_event_metrics<'a>(events: impl IntoIterator<Item = &'a KernelEvent>) {
    let sink = governance_metrics();
    for event in events {
        match event {
            KernelEvent::CallSubmitted { kind, .. } => sink.inc_calls_submitted(kind.as_str()),
            KernelEvent::CallConfirmed { .. } => sink.inc_votes("confirm"),
            KernelEvent::CallRevoked { .. } => sink.inc_votes("revoke"),
            KernelEvent::CallApproved { .. } => sink.inc_calls_approved(),
            KernelEvent::CallExecuted { error, .. } => sink.inc_calls_executed(error.is_some()),
            KernelEvent::CallRejected { .. } => sink.inc_calls_rejected(),
            _ => {}
        }
    }
}
