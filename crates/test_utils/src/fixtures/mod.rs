//! Test fixtures for reproducible governance scenarios

use meridian_types::app::{
    AccountId, AuthorityParams, Block, BlockHeader, CallId, CallPayload, ChainId,
    ChainTransaction, TxPayload, Validator,
};
use meridian_types::config::{GenesisBalance, GenesisConfig, NodeConfig, TelemetryConfig};
use meridian_types::service_configs::MultisigParams;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The chain id used by fixtures unless a test overrides it.
pub const TEST_CHAIN_ID: ChainId = ChainId(1);

/// A deterministic account: every byte is `n`.
pub fn account(n: u8) -> AccountId {
    AccountId([n; 32])
}

/// A validator record for [`account`]`(n)`.
pub fn validator(n: u8) -> Validator {
    Validator {
        address: account(n),
        attestation: format!("0x{:02x}", n),
    }
}

/// Accounts `1..=n`.
pub fn validator_accounts(n: u8) -> Vec<AccountId> {
    (1..=n).map(account).collect()
}

/// Builds a [`GenesisConfig`] or a full [`NodeConfig`].
#[derive(Debug, Clone)]
pub struct GenesisBuilder {
    chain_id: ChainId,
    multisig: MultisigParams,
    genesis: GenesisConfig,
}

impl Default for GenesisBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GenesisBuilder {
    /// An empty genesis on [`TEST_CHAIN_ID`] with default parameters.
    pub fn new() -> Self {
        Self {
            chain_id: TEST_CHAIN_ID,
            multisig: MultisigParams::default(),
            genesis: GenesisConfig::default(),
        }
    }

    /// Adds validators `1..=n`.
    pub fn with_validators(mut self, n: u8) -> Self {
        self.genesis.validators.extend((1..=n).map(validator));
        self
    }

    /// Sets the registry bounds.
    pub fn with_bounds(mut self, min_validators: u32, max_validators: u32) -> Self {
        self.genesis.authority_params = AuthorityParams {
            min_validators,
            max_validators,
        };
        self
    }

    /// Credits `amount` of `denom` to `address`.
    pub fn with_balance(mut self, address: AccountId, denom: &str, amount: u64) -> Self {
        self.genesis.balances.push(GenesisBalance {
            address,
            denom: denom.to_string(),
            amount,
        });
        self
    }

    /// Sets the pending-call lifetime in blocks.
    pub fn with_interval(mut self, interval_to_execute: u64) -> Self {
        self.multisig = MultisigParams {
            interval_to_execute,
        };
        self
    }

    /// Sets the chain id.
    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// The genesis section alone.
    pub fn genesis(&self) -> GenesisConfig {
        self.genesis.clone()
    }

    /// A complete node configuration.
    pub fn node_config(&self) -> NodeConfig {
        NodeConfig {
            chain_id: self.chain_id,
            multisig: self.multisig,
            genesis: self.genesis.clone(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

// --- Transaction builders ---

/// A transaction from `account(sender)` on [`TEST_CHAIN_ID`].
pub fn tx(sender: u8, payload: TxPayload) -> ChainTransaction {
    ChainTransaction::new(account(sender), TEST_CHAIN_ID, payload)
}

/// `SubmitCall` from `account(sender)`.
pub fn submit(sender: u8, payload: CallPayload, unique_id: &str) -> ChainTransaction {
    tx(
        sender,
        TxPayload::SubmitCall {
            payload,
            unique_id: unique_id.to_string(),
        },
    )
}

/// `ConfirmCall` from `account(sender)`.
pub fn confirm(sender: u8, call_id: CallId) -> ChainTransaction {
    tx(sender, TxPayload::ConfirmCall { call_id })
}

/// `RevokeConfirm` from `account(sender)`.
pub fn revoke(sender: u8, call_id: CallId) -> ChainTransaction {
    tx(sender, TxPayload::RevokeConfirm { call_id })
}

/// A block at `height` on [`TEST_CHAIN_ID`].
pub fn block(height: u64, transactions: Vec<ChainTransaction>) -> Block<ChainTransaction> {
    Block {
        header: BlockHeader {
            height,
            chain_id: TEST_CHAIN_ID,
        },
        transactions,
    }
}

// --- Fixture files ---

/// Fixture files written to a temporary directory that is removed on drop.
pub struct Fixtures {
    dir: tempfile::TempDir,
}

impl Fixtures {
    /// Creates an empty fixture directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Get a fixture file path
    pub fn path<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Write data to a fixture file
    pub fn write<P: AsRef<Path>, C: AsRef<[u8]>>(
        &self,
        relative_path: P,
        contents: C,
    ) -> io::Result<PathBuf> {
        let path = self.path(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Writes `config` as TOML.
    pub fn write_config<P: AsRef<Path>>(
        &self,
        relative_path: P,
        config: &NodeConfig,
    ) -> io::Result<PathBuf> {
        let text = toml::to_string(config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write(relative_path, text)
    }

    /// Writes `blocks` as a JSON array.
    pub fn write_blocks<P: AsRef<Path>>(
        &self,
        relative_path: P,
        blocks: &[Block<ChainTransaction>],
    ) -> io::Result<PathBuf> {
        let text = serde_json::to_vec_pretty(blocks)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write(relative_path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_parseable_config() {
        let cfg = GenesisBuilder::new()
            .with_validators(3)
            .with_bounds(1, 5)
            .with_balance(account(1), "umer", 50)
            .with_interval(4)
            .node_config();

        let fixtures = Fixtures::new().unwrap();
        let path = fixtures.write_config("node.toml", &cfg).unwrap();
        let text = fs::read_to_string(path).unwrap();
        let parsed: NodeConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.genesis.validators.len(), 3);
        assert_eq!(parsed.multisig.interval_to_execute, 4);
        assert_eq!(parsed.genesis.balances[0].amount, 50);
    }

    #[test]
    fn blocks_round_trip_through_json() {
        let blocks = vec![block(1, vec![confirm(2, 1), revoke(2, 1)])];
        let fixtures = Fixtures::new().unwrap();
        let path = fixtures.write_blocks("blocks.json", &blocks).unwrap();
        let parsed: Vec<Block<ChainTransaction>> =
            serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed, blocks);
    }
}
