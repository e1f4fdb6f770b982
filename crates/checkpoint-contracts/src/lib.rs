//! The `ContractCaller` oracle interface (component C1): the side validators'
//! window onto the external root chains and the child chain. Every method here is a
//! read against state the bridge chain does not itself replicate, so the only thing
//! core can assume about it is that it may be slow, unavailable, or (for the child
//! chain read) inconsistent across validators until enough of them vote.

mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use bridge_checkpoint_types::{Address, Hash32, RootChainType};

pub use error::{ContractCallerError, ContractCallerResult};

/// Opaque handle to a resolved root-chain contract instance, as returned by
/// [`ContractCaller::get_root_chain_instance`] and consumed by
/// [`ContractCaller::get_header_info`].
///
/// The concrete RPC client behind this is out of scope for the core; callers treat it
/// as a capability token scoped to one resolved `(address, root_chain_type)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootChainInstance {
    pub address: Address,
    pub root_chain_type: RootChainType,
}

/// One committed header-block record as read back from a root-chain contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderInfo {
    pub root_hash: Hash32,
    pub start_block: u64,
    pub end_block: u64,
    pub created_at: u64,
    pub proposer: Address,
}

/// Out-of-band oracle consulted by the side validators.
///
/// Implementations are never invoked by the post phase: everything here is
/// non-deterministic from the protocol's point of view, which is exactly why its
/// results have to be consensus-aggregated into a vote before they can affect
/// persistent state.
pub trait ContractCaller {
    /// Recomputes the Merkle root over child-chain headers `[start, end]` and compares
    /// it to `root`, additionally rejecting intervals longer than `max_len`.
    fn validate_checkpoint(
        &self,
        start: u64,
        end: u64,
        root: Hash32,
        max_len: u64,
    ) -> ContractCallerResult<bool>;

    /// Resolves a root-chain contract address into a typed instance handle.
    fn get_root_chain_instance(
        &self,
        address: Address,
        root_chain_type: RootChainType,
    ) -> ContractCallerResult<RootChainInstance>;

    /// Reads back header-block `number` from the resolved instance.
    fn get_header_info(
        &self,
        number: u64,
        instance: &RootChainInstance,
        child_block_interval: u64,
    ) -> ContractCallerResult<HeaderInfo>;

    /// Tron-specific header read: Tron's address encoding differs enough from the
    /// EVM-style chains that it is not routed through [`Self::get_root_chain_instance`].
    fn get_tron_header_info(
        &self,
        number: u64,
        tron_address: Address,
        child_block_interval: u64,
    ) -> ContractCallerResult<HeaderInfo>;

    /// Reads the highest checkpoint number an off-chain relayer has synced to the
    /// secondary root chain identified by `root_chain_type`.
    fn get_synced_checkpoint_id(
        &self,
        tron_staking_manager: Address,
        root_chain_type: RootChainType,
    ) -> ContractCallerResult<u64>;
}
