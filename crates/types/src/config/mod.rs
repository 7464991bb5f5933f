// Path: crates/types/src/config/mod.rs
//! Shared configuration structures for a Meridian node.

use crate::app::{AccountId, AuthorityParams, ChainId, Validator};
use crate::service_configs::MultisigParams;
use serde::{Deserialize, Serialize};

/// The top-level node configuration, usually loaded from `node.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// The chain this node executes.
    pub chain_id: ChainId,
    /// Multisig voting engine parameters.
    #[serde(default)]
    pub multisig: MultisigParams,
    /// Initial state written before the first block.
    pub genesis: GenesisConfig,
    /// Logging and metrics options.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// The state written by `init_genesis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisConfig {
    /// The initial authority set.
    pub validators: Vec<Validator>,
    /// The initial authority set bounds.
    #[serde(default)]
    pub authority_params: AuthorityParams,
    /// Initial currency holdings.
    #[serde(default)]
    pub balances: Vec<GenesisBalance>,
}

/// An initial currency holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBalance {
    /// The holder.
    pub address: AccountId,
    /// The denomination.
    pub denom: String,
    /// The amount held. TOML integers are 64-bit, so genesis amounts are too.
    pub amount: u64,
}

/// Logging and metrics options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// The default `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Whether to install the Prometheus metrics sink.
    #[serde(default)]
    pub metrics_enabled: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            metrics_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_config_parses_with_defaults() {
        let text = format!(
            r#"
chain_id = 7

[genesis]
validators = [
    {{ address = "{a}", attestation = "0x01" }},
    {{ address = "{b}", attestation = "0x02" }},
]

[[genesis.balances]]
address = "{a}"
denom = "umer"
amount = 1000
"#,
            a = "01".repeat(32),
            b = "02".repeat(32),
        );

        let cfg: NodeConfig = toml::from_str(&text).unwrap();
        assert_eq!(cfg.chain_id, ChainId(7));
        assert_eq!(cfg.multisig, MultisigParams::default());
        assert_eq!(cfg.genesis.validators.len(), 2);
        assert_eq!(cfg.genesis.validators[1].address, AccountId([2u8; 32]));
        assert_eq!(cfg.genesis.authority_params, AuthorityParams::default());
        assert_eq!(cfg.genesis.balances[0].amount, 1000);
        assert_eq!(cfg.telemetry.log_filter, "info");
    }

    #[test]
    fn node_config_reads_overrides() {
        let text = r#"
chain_id = 1

[multisig]
interval_to_execute = 5

[genesis]
validators = []
authority_params = { min_validators = 3, max_validators = 9 }

[telemetry]
log_filter = "debug"
metrics_enabled = true
"#;
        let cfg: NodeConfig = toml::from_str(text).unwrap();
        assert_eq!(cfg.multisig.interval_to_execute, 5);
        assert_eq!(cfg.genesis.authority_params.max_validators, 9);
        assert!(cfg.telemetry.metrics_enabled);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = "chain_id = 1\nbogus = true\n[genesis]\nvalidators = []\n";
        assert!(toml::from_str::<NodeConfig>(text).is_err());
    }
}
