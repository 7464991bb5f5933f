// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured governance metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn governance_metrics() -> &'static dyn GovernanceMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and code.
    fn inc_error(&self, kind: &'static str, code: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _code: &'static str) {}
}

/// A sink for the multisig call lifecycle and block execution.
pub trait GovernanceMetricsSink: Send + Sync + std::fmt::Debug {
    /// A call was created, labeled by call kind.
    fn inc_calls_submitted(&self, kind: &str);
    /// A vote was confirmed or revoked; `action` is `confirm` or `revoke`.
    fn inc_votes(&self, action: &'static str);
    /// A call reached quorum.
    fn inc_calls_approved(&self);
    /// A call expired before reaching quorum.
    fn inc_calls_rejected(&self);
    /// An approved call was executed; `failed` is true if its handler returned an error.
    fn inc_calls_executed(&self, failed: bool);
    /// Sets the number of calls still waiting for votes.
    fn set_pending_calls(&self, count: u64);
    /// Sets the height of the last committed block.
    fn set_block_height(&self, height: u64);
}
impl GovernanceMetricsSink for NopSink {
    fn inc_calls_submitted(&self, _kind: &str) {}
    fn inc_votes(&self, _action: &'static str) {}
    fn inc_calls_approved(&self) {}
    fn inc_calls_rejected(&self) {}
    fn inc_calls_executed(&self, _failed: bool) {}
    fn set_pending_calls(&self, _count: u64) {}
    fn set_block_height(&self, _height: u64) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: ErrorMetricsSink + GovernanceMetricsSink {}

impl<T> MetricsSink for T where T: ErrorMetricsSink + GovernanceMetricsSink {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_view_one_sink_through_each_trait() {
        let errors: &'static dyn ErrorMetricsSink = error_metrics();
        let governance: &'static dyn GovernanceMetricsSink = governance_metrics();
        errors.inc_error("tx", "MULTISIG_NOT_VALIDATOR");
        governance.inc_votes("confirm");
        governance.set_block_height(1);

        let unified: &dyn MetricsSink = &NOP_SINK;
        let as_errors: &dyn ErrorMetricsSink = unified;
        as_errors.inc_error("kernel", "CHAIN_ID_MISMATCH");
    }
}
