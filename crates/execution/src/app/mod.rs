// Path: crates/execution/src/app/mod.rs
mod end_block;
mod query;
mod state_machine;

use crate::util::write_genesis_state;
use meridian_api::services::access::ServiceDirectory;
use meridian_api::services::BlockchainService;
use meridian_api::state::{StateAccess, StateAccessExt, StateOverlay};
use meridian_services::standard_services;
use meridian_state::InMemoryState;
use meridian_tx::UnifiedTransactionModel;
use meridian_types::app::{ChainId, ChainStatus, KernelEvent, TxReceipt};
use meridian_types::config::{GenesisConfig, NodeConfig};
use meridian_types::error::{ChainError, CoreError, TransactionError};
use meridian_types::keys::STATUS_KEY;
use meridian_types::service_configs::MultisigParams;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// Represents the initialization state of the chain's genesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenesisState {
    /// Genesis has not been written or loaded.
    Pending,
    /// Genesis is committed; blocks may be applied.
    Ready {
        /// The chain ID as loaded from configuration.
        chain_id: ChainId,
    },
}

/// What applying one block produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    /// The committed height.
    pub height: u64,
    /// One receipt per transaction, in block order.
    pub receipts: Vec<TxReceipt>,
    /// Events emitted by end-block hooks.
    pub end_block_events: Vec<KernelEvent>,
}

impl BlockOutcome {
    /// The number of transactions that were applied.
    pub fn successful(&self) -> usize {
        self.receipts.iter().filter(|r| r.is_success()).count()
    }
}

/// The state machine that orchestrates block execution, service dispatch, and
/// state commits.
///
/// `S` is the committed key space. It is written only by the final
/// `batch_apply` of a block (or of genesis); everything before that happens in
/// overlays that are dropped on failure.
pub struct ExecutionMachine<S: StateAccess = InMemoryState> {
    store: S,
    chain_id: ChainId,
    services: ServiceDirectory,
    transaction_model: UnifiedTransactionModel,
    status: ChainStatus,
    genesis_state: GenesisState,
}

impl<S: StateAccess> Debug for ExecutionMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionMachine")
            .field("chain_id", &self.chain_id)
            .field("status", &self.status)
            .field("genesis_state", &self.genesis_state)
            .field("services", &self.services)
            .finish()
    }
}

impl ExecutionMachine<InMemoryState> {
    /// Builds an in-memory machine from a node configuration and commits its
    /// genesis.
    pub fn from_config(config: &NodeConfig) -> Result<Self, ChainError> {
        let mut machine = Self::new(InMemoryState::new(), config.chain_id, config.multisig)
            .map_err(|e| ChainError::Genesis(e.to_string()))?;
        machine.init_genesis(&config.genesis)?;
        Ok(machine)
    }
}

impl<S: StateAccess> ExecutionMachine<S> {
    /// Creates a machine over `store` with the built-in services.
    pub fn new(store: S, chain_id: ChainId, multisig: MultisigParams) -> Result<Self, CoreError> {
        let services = standard_services(multisig)?;
        tracing::debug!(
            target: "execution",
            chain_id = chain_id.0,
            services = ?services,
            "Execution machine created."
        );
        Ok(Self {
            store,
            chain_id,
            services,
            transaction_model: UnifiedTransactionModel::new(),
            status: ChainStatus::default(),
            genesis_state: GenesisState::Pending,
        })
    }

    /// Writes the genesis state and an initial status at height zero in one commit.
    ///
    /// Fails if the store already holds a chain status.
    pub fn init_genesis(&mut self, genesis: &GenesisConfig) -> Result<(), ChainError> {
        if self.store.contains(STATUS_KEY)? {
            return Err(ChainError::Genesis("chain status already present".into()));
        }
        let status = ChainStatus::default();
        let (inserts, deletes) = {
            let mut overlay = StateOverlay::new(&self.store);
            write_genesis_state(&mut overlay, genesis)?;
            overlay.insert_encoded(STATUS_KEY, &status)?;
            overlay.into_ordered_batch()
        };
        self.store.batch_apply(&inserts, &deletes)?;
        self.status = status;
        self.genesis_state = GenesisState::Ready {
            chain_id: self.chain_id,
        };
        tracing::info!(
            target: "execution",
            event = "genesis_ready",
            chain_id = self.chain_id.0,
            keys = inserts.len(),
            "Committed genesis state."
        );
        Ok(())
    }

    /// Resumes from a store that already holds a chain status, or writes
    /// `genesis` if it does not.
    pub fn load_or_initialize_status(&mut self, genesis: &GenesisConfig) -> Result<(), ChainError> {
        match self.store.get_decoded::<ChainStatus>(STATUS_KEY)? {
            Some(status) => {
                tracing::info!(
                    target: "execution",
                    event = "status_loaded",
                    height = status.height,
                    "Loaded existing chain status."
                );
                self.status = status;
                self.genesis_state = GenesisState::Ready {
                    chain_id: self.chain_id,
                };
                Ok(())
            }
            None => {
                tracing::info!(
                    target: "execution",
                    event = "status_init",
                    "No existing chain status found. Initializing genesis."
                );
                self.init_genesis(genesis)
            }
        }
    }

    /// The chain this machine executes.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Height and transaction count of the last committed block.
    pub fn status(&self) -> &ChainStatus {
        &self.status
    }

    /// Whether genesis has been committed.
    pub fn genesis_state(&self) -> GenesisState {
        self.genesis_state
    }

    /// The committed key space.
    pub fn committed_state(&self) -> &S {
        &self.store
    }

    /// The registered services.
    pub fn services(&self) -> &ServiceDirectory {
        &self.services
    }

    /// Consumes the machine and returns the committed key space.
    pub fn into_store(self) -> S {
        self.store
    }

    fn service<T: BlockchainService>(&self) -> Result<Arc<T>, TransactionError> {
        self.services.get::<T>().ok_or_else(|| {
            TransactionError::Invalid(format!(
                "required service '{}' is not registered",
                std::any::type_name::<T>()
            ))
        })
    }
}
