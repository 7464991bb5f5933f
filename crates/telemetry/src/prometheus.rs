// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

// --- Metric Statics ---
// Set exactly once by `install`. Until then every sink method is a no-op.

static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static CALLS_SUBMITTED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static VOTES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static CALLS_APPROVED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static CALLS_REJECTED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static CALLS_EXECUTED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static PENDING_CALLS: OnceCell<IntGauge> = OnceCell::new();
static BLOCK_HEIGHT: OnceCell<IntGauge> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `$body` with the collector bound to `$m` if it has been registered.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, code: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, code]).inc());
    }
}

impl GovernanceMetricsSink for PrometheusSink {
    fn inc_calls_submitted(&self, kind: &str) {
        with_metric!(CALLS_SUBMITTED_TOTAL, |m| m.with_label_values(&[kind]).inc());
    }
    fn inc_votes(&self, action: &'static str) {
        with_metric!(VOTES_TOTAL, |m| m.with_label_values(&[action]).inc());
    }
    fn inc_calls_approved(&self) {
        with_metric!(CALLS_APPROVED_TOTAL, |m| m.inc());
    }
    fn inc_calls_rejected(&self) {
        with_metric!(CALLS_REJECTED_TOTAL, |m| m.inc());
    }
    fn inc_calls_executed(&self, failed: bool) {
        let outcome = if failed { "failed" } else { "ok" };
        with_metric!(CALLS_EXECUTED_TOTAL, |m| m
            .with_label_values(&[outcome])
            .inc());
    }
    fn set_pending_calls(&self, count: u64) {
        with_metric!(PENDING_CALLS, |m| m.set(i64::try_from(count).unwrap_or(i64::MAX)));
    }
    fn set_block_height(&self, height: u64) {
        with_metric!(BLOCK_HEIGHT, |m| m.set(i64::try_from(height).unwrap_or(i64::MAX)));
    }
}

fn already_installed() -> prometheus::Error {
    prometheus::Error::Msg("prometheus sink already installed".into())
}

/// Registers all collectors in the default registry, installs the sink as the
/// global [`SINK`] and returns it. Fails if called twice.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "meridian_errors_total",
            "Total number of errors, categorized by kind and code.",
            &["kind", "code"]
        )?)
        .map_err(|_| already_installed())?;
    CALLS_SUBMITTED_TOTAL
        .set(register_int_counter_vec!(
            "meridian_multisig_calls_submitted_total",
            "Total multisig calls submitted, by call kind.",
            &["kind"]
        )?)
        .map_err(|_| already_installed())?;
    VOTES_TOTAL
        .set(register_int_counter_vec!(
            "meridian_multisig_votes_total",
            "Total vote confirmations and revocations.",
            &["action"]
        )?)
        .map_err(|_| already_installed())?;
    CALLS_APPROVED_TOTAL
        .set(register_int_counter!(
            "meridian_multisig_calls_approved_total",
            "Total multisig calls that reached quorum."
        )?)
        .map_err(|_| already_installed())?;
    CALLS_REJECTED_TOTAL
        .set(register_int_counter!(
            "meridian_multisig_calls_rejected_total",
            "Total multisig calls rejected on expiry."
        )?)
        .map_err(|_| already_installed())?;
    CALLS_EXECUTED_TOTAL
        .set(register_int_counter_vec!(
            "meridian_multisig_calls_executed_total",
            "Total approved calls executed, by outcome.",
            &["outcome"]
        )?)
        .map_err(|_| already_installed())?;
    PENDING_CALLS
        .set(register_int_gauge!(
            "meridian_multisig_pending_calls",
            "Number of calls still collecting votes."
        )?)
        .map_err(|_| already_installed())?;
    BLOCK_HEIGHT
        .set(register_int_gauge!(
            "meridian_block_height",
            "Height of the last committed block."
        )?)
        .map_err(|_| already_installed())?;

    static PROM_SINK: PrometheusSink = PrometheusSink;
    SINK.set(&PROM_SINK).map_err(|_| already_installed())?;
    Ok(&PROM_SINK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_registers_collectors_once() {
        let sink = install().unwrap();
        sink.inc_error("tx", "MULTISIG_ONLY_MULTISIG");
        sink.inc_calls_submitted("add_validator");
        sink.set_pending_calls(3);

        let names: Vec<String> = prometheus::gather()
            .iter()
            .map(|f| f.get_name().to_string())
            .collect();
        assert!(names.contains(&"meridian_errors_total".to_string()));
        assert!(names.contains(&"meridian_multisig_pending_calls".to_string()));
        assert_eq!(PENDING_CALLS.get().map(|g| g.get()), Some(3));

        assert!(install().is_err());
    }
}
