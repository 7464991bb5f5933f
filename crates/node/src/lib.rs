// Path: crates/node/src/lib.rs
#![forbid(unsafe_code)]

//! Configuration loading and block replay shared by the `meridian-node` binary
//! and its tests.

use anyhow::{anyhow, Context, Result};
use meridian_execution::{BlockOutcome, ExecutionMachine};
use meridian_types::app::{
    Block, Call, CallId, ChainStatus, ChainTransaction, QueryRequest, QueryResponse, Validator,
};
use meridian_types::config::NodeConfig;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads and parses a TOML node configuration.
pub fn load_config(path: &Path) -> Result<NodeConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Reads a JSON array of finalized blocks.
pub fn load_blocks(path: &Path) -> Result<Vec<Block<ChainTransaction>>> {
    let bytes = fs::read(path).with_context(|| format!("reading blocks {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing blocks {}", path.display()))
}

/// What a replay printed on completion.
#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    /// The chain that was replayed.
    pub chain_id: u32,
    /// Status after the last block.
    pub status: ChainStatus,
    /// Per-block outcomes, in order.
    pub blocks: Vec<BlockOutcome>,
    /// The validator set after the last block.
    pub validators: Vec<Validator>,
    /// The quorum of that set.
    pub quorum: u32,
    /// Calls still collecting votes.
    pub pending_calls: Vec<Call>,
    /// The last assigned call id.
    pub last_call_id: CallId,
}

fn query(machine: &ExecutionMachine, request: QueryRequest) -> Result<QueryResponse> {
    machine
        .query(&request)
        .map_err(|e| anyhow!("query {:?} failed: {}/{} {}", request, e.codespace, e.code, e.message))
}

/// Commits genesis from `config` and applies `blocks` in order.
///
/// Stops at the first block that cannot be applied.
pub fn replay(config: &NodeConfig, blocks: &[Block<ChainTransaction>]) -> Result<ReplaySummary> {
    let mut machine = ExecutionMachine::from_config(config).context("initializing genesis")?;
    let mut outcomes = Vec::with_capacity(blocks.len());
    for block in blocks {
        let outcome = machine
            .apply_block(block)
            .with_context(|| format!("applying block {}", block.header.height))?;
        tracing::info!(
            target: "node",
            height = outcome.height,
            applied = outcome.successful(),
            failed = outcome.receipts.len() - outcome.successful(),
            "Block replayed."
        );
        outcomes.push(outcome);
    }

    let QueryResponse::Validators { validators, quorum } =
        query(&machine, QueryRequest::Validators)?
    else {
        return Err(anyhow!("unexpected response to validators query"));
    };
    let QueryResponse::Calls(pending_calls) = query(&machine, QueryRequest::PendingCalls)? else {
        return Err(anyhow!("unexpected response to pending calls query"));
    };
    let QueryResponse::LastCallId(last_call_id) = query(&machine, QueryRequest::LastCallId)? else {
        return Err(anyhow!("unexpected response to last call id query"));
    };

    Ok(ReplaySummary {
        chain_id: machine.chain_id().0,
        status: machine.status().clone(),
        blocks: outcomes,
        validators,
        quorum,
        pending_calls,
        last_call_id,
    })
}
