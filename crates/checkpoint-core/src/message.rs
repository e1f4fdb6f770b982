//! The four side-transaction message kinds the dispatcher (C7) routes on.
//!
//! These mirror the teacher's exhaustive `SubprotocolId`/message-table dispatch idiom:
//! a closed sum type matched exhaustively, rather than a dynamic registry keyed by a
//! string or numeric tag. There are exactly four kinds and the protocol does not grow
//! new ones without a spec change.

use bridge_checkpoint_types::{Address, Hash32, RootChainType};
use serde::{Deserialize, Serialize};

/// Propose a new checkpoint interval for `root_chain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCheckpoint {
    pub start_block: u64,
    pub end_block: u64,
    pub root_hash: Hash32,
    pub proposer: Address,
    pub account_root_hash: Hash32,
    pub bor_chain_id: String,
    pub root_chain: RootChainType,
}

/// Confirm that checkpoint `number` was accepted on `root_chain`'s contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCheckpointAck {
    pub number: u64,
    pub start_block: u64,
    pub end_block: u64,
    pub root_hash: Hash32,
    pub proposer: Address,
    pub root_chain: RootChainType,
}

/// Mirror a checkpoint an off-chain relayer submitted directly to a secondary root
/// chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCheckpointSync {
    pub number: u64,
    pub start_block: u64,
    pub end_block: u64,
    pub proposer: Address,
    pub root_chain: RootChainType,
}

/// Confirm a previously synced checkpoint, flushing the sync buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCheckpointSyncAck {
    pub number: u64,
    pub root_chain: RootChainType,
}

/// The side-transaction message sum type the dispatcher matches exhaustively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointMsg {
    Checkpoint(MsgCheckpoint),
    CheckpointAck(MsgCheckpointAck),
    CheckpointSync(MsgCheckpointSync),
    CheckpointSyncAck(MsgCheckpointSyncAck),
}

impl CheckpointMsg {
    pub fn root_chain(&self) -> RootChainType {
        match self {
            CheckpointMsg::Checkpoint(m) => m.root_chain,
            CheckpointMsg::CheckpointAck(m) => m.root_chain,
            CheckpointMsg::CheckpointSync(m) => m.root_chain,
            CheckpointMsg::CheckpointSyncAck(m) => m.root_chain,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            CheckpointMsg::Checkpoint(_) => "Checkpoint",
            CheckpointMsg::CheckpointAck(_) => "CheckpointAck",
            CheckpointMsg::CheckpointSync(_) => "CheckpointSync",
            CheckpointMsg::CheckpointSyncAck(_) => "CheckpointSyncAck",
        }
    }
}
