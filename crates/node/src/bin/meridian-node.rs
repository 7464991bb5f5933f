// Path: crates/node/src/bin/meridian-node.rs
#![forbid(unsafe_code)]

//! Replays finalized blocks against a genesis configuration and prints the result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use meridian_node::{load_blocks, load_config, replay};
use prometheus::{Encoder, TextEncoder};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "meridian-node", version, about = "Meridian PoA kernel")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Applies a JSON list of blocks on top of genesis and prints a JSON summary.
    Replay {
        #[clap(long, help = "Path to the node.toml configuration file.")]
        config: PathBuf,
        #[clap(long, help = "Path to a JSON array of blocks.")]
        blocks: PathBuf,
        #[clap(long, help = "Write Prometheus text metrics here after replay.")]
        metrics_out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    match opts.command {
        Command::Replay {
            config,
            blocks,
            metrics_out,
        } => {
            let node_config = load_config(&config)?;
            meridian_telemetry::init::init_tracing(&node_config.telemetry.log_filter)?;
            if node_config.telemetry.metrics_enabled || metrics_out.is_some() {
                meridian_telemetry::prometheus::install()?;
            }
            tracing::info!(
                target: "node",
                event = "startup",
                config = ?config,
                blocks = ?blocks,
                chain_id = node_config.chain_id.0
            );

            let block_list = load_blocks(&blocks)?;
            let summary = replay(&node_config, &block_list)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);

            if let Some(path) = metrics_out {
                let mut buf = Vec::new();
                TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
                fs::write(&path, buf)?;
                tracing::info!(target: "node", path = ?path, "Metrics written.");
            }
            Ok(())
        }
    }
}
