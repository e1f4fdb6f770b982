//! Replays a canned batch of checkpoint side-transactions through the coordination
//! core, end to end, against an in-memory keeper and a scriptable oracle double.
//!
//! Shaped after `checkpoint-validator`: load a params file and an input batch, run the
//! existing core logic, print per-item outcomes — adapted from "verify one Bitcoin
//! checkpoint transaction" to "replay one batch of bridge-chain checkpoint side-txs".

use std::{collections::BTreeMap, fs, path::PathBuf};

use anyhow::Result;
use argh::FromArgs;
use bridge_checkpoint_contracts::testing::MockContractCaller;
use bridge_checkpoint_core::{dispatch_post, dispatch_side, CheckpointMsg, HandlerCtx};
use bridge_checkpoint_keeper::{InMemoryKeeper, InMemoryStakingKeeper};
use bridge_checkpoint_types::{Address, CheckpointParams, Hash32, RootChainConfig, RootChainType};
use serde::Deserialize;
use tracing::{error, info};

#[derive(FromArgs)]
/// Replay a batch of bridge-chain checkpoint side-transactions through the
/// coordination core
struct Args {
    /// checkpoint/chain params JSON file
    #[argh(option, short = 'c')]
    config: PathBuf,

    /// JSON file holding an ordered array of checkpoint messages
    #[argh(option, short = 'm')]
    messages: PathBuf,

    /// oracle seed JSON file (header records, synced ids, valid checkpoint roots)
    #[argh(option, short = 'o')]
    oracle: Option<PathBuf>,

    /// verbose logging
    #[argh(switch, short = 'v')]
    verbose: bool,
}

#[derive(Deserialize)]
struct DemoConfig {
    checkpoint_params: CheckpointParams,
    chain_config: RootChainConfig,
}

#[derive(Deserialize, Default)]
struct OracleSeed {
    #[serde(default)]
    valid_checkpoint_roots: Vec<(u64, u64, Hash32)>,
    #[serde(default)]
    headers: Vec<SeedHeader>,
    #[serde(default)]
    synced_checkpoint_ids: Vec<(RootChainType, u64)>,
}

#[derive(Deserialize)]
struct SeedHeader {
    root_chain: RootChainType,
    number: u64,
    root_hash: Hash32,
    start_block: u64,
    end_block: u64,
    created_at: u64,
    proposer: Address,
}

fn main() {
    let args: Args = argh::from_env();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    if let Err(e) = run(args) {
        error!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config: DemoConfig = serde_json::from_str(&fs::read_to_string(&args.config)?)?;
    let messages: Vec<CheckpointMsg> = serde_json::from_str(&fs::read_to_string(&args.messages)?)?;
    let oracle: OracleSeed = match &args.oracle {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => OracleSeed::default(),
    };

    let keeper = InMemoryKeeper::new(config.checkpoint_params, config.chain_config);
    let staking = InMemoryStakingKeeper::new();
    let contracts = MockContractCaller::new();

    for (start, end, root) in &oracle.valid_checkpoint_roots {
        contracts.seed_valid_checkpoint(*start, *end, *root);
    }
    for h in &oracle.headers {
        contracts.seed_header(
            h.root_chain,
            h.number,
            bridge_checkpoint_contracts::HeaderInfo {
                root_hash: h.root_hash,
                start_block: h.start_block,
                end_block: h.end_block,
                created_at: h.created_at,
                proposer: h.proposer,
            },
        );
    }
    for (root, number) in &oracle.synced_checkpoint_ids {
        contracts.seed_synced_checkpoint_id(*root, *number);
    }

    info!("replaying {} message(s)", messages.len());

    let mut pass_count = 0;
    let mut rotations: BTreeMap<RootChainType, u32> = BTreeMap::new();

    for (i, msg) in messages.iter().enumerate() {
        let block_time = (i as u64 + 1) * 10;
        let vote = dispatch_side(msg, &keeper, &contracts);
        let mut ctx = HandlerCtx::new(block_time, Hash32::ZERO);
        let outcome = dispatch_post(msg, &vote, &keeper, &staking, &mut ctx);

        let before = staking.invocation_count();

        match &outcome {
            Ok(()) => {
                pass_count += 1;
                info!(
                    index = i,
                    kind = msg.kind_name(),
                    root_chain = ?msg.root_chain(),
                    ?vote,
                    events = ctx.take_events().len(),
                    "applied"
                );
            }
            Err(err) => {
                info!(
                    index = i,
                    kind = msg.kind_name(),
                    root_chain = ?msg.root_chain(),
                    ?vote,
                    %err,
                    "rejected"
                );
            }
        }

        let after = staking.invocation_count();
        if after != before {
            *rotations.entry(msg.root_chain()).or_default() += after - before;
        }
    }

    println!("\n=== RESULTS ===");
    println!("Messages replayed: {}", messages.len());
    println!("Applied:           {pass_count}");
    println!("Rejected:          {}", messages.len() - pass_count);
    for (root, count) in &rotations {
        println!("Proposer rotations on {root}: {count}");
    }

    Ok(())
}
