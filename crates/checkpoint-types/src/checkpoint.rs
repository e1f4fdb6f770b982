use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{
    primitives::{Address, Hash32},
    root_chain::RootChainType,
};

/// An interval `[start_block, end_block]` of the child chain committed by a proposer,
/// destined for a specific root chain.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Checkpoint {
    pub start_block: u64,
    pub end_block: u64,
    /// Merkle root of child-chain block headers over `[start_block, end_block]`.
    pub root_hash: Hash32,
    pub proposer: Address,
    /// Merkle root of the bridge chain's account state at proposal time.
    pub account_root_hash: Hash32,
    pub bor_chain_id: String,
    pub root_chain: RootChainType,
}

impl Checkpoint {
    /// Number of child-chain blocks spanned by this checkpoint, inclusive.
    ///
    /// Saturates rather than panics so malformed input (`end < start`) is surfaced as
    /// a validation failure by the caller instead of an arithmetic panic here.
    pub fn len(&self) -> u64 {
        self.end_block.saturating_sub(self.start_block).saturating_add(1)
    }
}

/// A proposed checkpoint sitting in the single-slot buffer, awaiting ack or expiry.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct BufferEntry {
    pub checkpoint: Checkpoint,
    /// Bridge block-time at which this entry was buffered.
    pub timestamp: u64,
}

impl BufferEntry {
    /// The bridge time at which this entry expires, given a buffer TTL.
    pub fn expiry(&self, buffer_time_secs: u64) -> u64 {
        self.timestamp.saturating_add(buffer_time_secs)
    }

    pub fn is_expired(&self, now: u64, buffer_time_secs: u64) -> bool {
        now >= self.expiry(buffer_time_secs)
    }
}

/// A checkpoint that has been committed to the per-root log under a monotonically
/// increasing `number`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct CommittedCheckpoint {
    pub number: u64,
    pub checkpoint: Checkpoint,
}

/// A lightweight mirror of a checkpoint submitted directly to a secondary root chain
/// by an off-chain process, pending its `CheckpointSyncAck`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct SyncBufferEntry {
    pub number: u64,
    pub start_block: u64,
    pub end_block: u64,
    pub proposer: Address,
    pub timestamp: u64,
}

impl SyncBufferEntry {
    pub fn expiry(&self, buffer_time_secs: u64) -> u64 {
        self.timestamp.saturating_add(buffer_time_secs)
    }

    pub fn is_expired(&self, now: u64, buffer_time_secs: u64) -> bool {
        now >= self.expiry(buffer_time_secs)
    }
}
