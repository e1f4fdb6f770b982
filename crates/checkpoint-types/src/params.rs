use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{primitives::Address, root_chain::RootChainType};

/// Checkpoint-shape limits, consulted by the side validator for `MsgCheckpoint`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointParams {
    /// Upper bound on `end_block - start_block + 1`.
    pub max_checkpoint_length: u64,
    /// Buffer TTL, in bridge-time seconds.
    pub checkpoint_buffer_time_secs: u64,
}

impl Default for CheckpointParams {
    fn default() -> Self {
        Self {
            max_checkpoint_length: 10_000,
            checkpoint_buffer_time_secs: 1_000,
        }
    }
}

/// The full, file-loaded root-chain configuration: one address/activation-height pair
/// per tag. This is what a config document deserializes into; `Keeper::chain_params`
/// resolves it down to the single-tag [`ChainParams`] view handlers consume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootChainConfig {
    /// Passed to root-chain readers to decode header records.
    pub child_block_interval: u64,
    /// Contract address on the corresponding root chain, keyed by tag. `Stake` has no
    /// entry (it is not an external root chain).
    pub root_chain_addresses: BTreeMap<RootChainType, Address>,
    /// Child-chain height at which the first checkpoint for this tag must start.
    pub chain_activation_heights: BTreeMap<RootChainType, u64>,
    /// Address of the Tron staking manager contract, consulted by
    /// `get_synced_checkpoint_id`.
    pub tron_staking_manager_address: Address,
}

impl RootChainConfig {
    /// Resolves the configuration down to the single-tag view a handler needs.
    pub fn chain_params(&self, root: RootChainType) -> ChainParams {
        ChainParams {
            root_chain_address: self.root_chain_addresses.get(&root).copied(),
            chain_activation_height: self
                .chain_activation_heights
                .get(&root)
                .copied()
                .unwrap_or_default(),
            child_block_interval: self.child_block_interval,
            tron_staking_manager_address: self.tron_staking_manager_address,
        }
    }
}

/// Per-root-chain configuration consulted when resolving a root-chain contract
/// instance and decoding its header records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChainParams {
    /// Contract address on this root chain. `None` for tags with no external
    /// contract (namely `Stake`), which `WrongRootChainType` resolution rejects.
    pub root_chain_address: Option<Address>,
    /// Child-chain height at which the first checkpoint for this tag must start.
    pub chain_activation_height: u64,
    pub child_block_interval: u64,
    pub tron_staking_manager_address: Address,
}
