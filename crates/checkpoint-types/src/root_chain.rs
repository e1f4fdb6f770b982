use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Closed set of chains a checkpoint may be anchored to.
///
/// `Stake` is the bridge chain's own canonical root; its acks additionally drive
/// proposer rotation. All other variants are external settlement chains. Every piece
/// of checkpoint state is keyed by this tag and invariants are enforced per-tag.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub enum RootChainType {
    Stake,
    Eth,
    Bsc,
    Tron,
}

impl RootChainType {
    pub const ALL: [RootChainType; 4] = [
        RootChainType::Stake,
        RootChainType::Eth,
        RootChainType::Bsc,
        RootChainType::Tron,
    ];

    /// Whether acks on this root drive `StakingKeeper::increment_accum`.
    pub fn drives_proposer_rotation(self) -> bool {
        matches!(self, RootChainType::Stake)
    }
}

impl fmt::Display for RootChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RootChainType::Stake => "stake",
            RootChainType::Eth => "eth",
            RootChainType::Bsc => "bsc",
            RootChainType::Tron => "tron",
        };
        f.write_str(s)
    }
}
