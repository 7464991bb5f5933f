// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initializes the global `tracing` subscriber for structured JSON logging.
///
/// `RUST_LOG` wins over `default_filter` when it is set. Records emitted
/// through the `log` facade are forwarded to the same subscriber.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
