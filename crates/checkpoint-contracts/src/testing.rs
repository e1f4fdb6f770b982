//! A scriptable [`ContractCaller`] double for exercising the side validators without a
//! real root-chain RPC client.

use std::collections::HashMap;

use bridge_checkpoint_types::{Address, Hash32, RootChainType};
use parking_lot::Mutex;

use crate::{ContractCallerError, ContractCallerResult, HeaderInfo, RootChainInstance};

/// An in-memory stand-in for the child chain + root chain contracts.
///
/// Tests seed it with the "true" header-block records and synced-checkpoint ids it
/// should answer with; `validate_checkpoint` compares against a seeded valid-root set
/// rather than recomputing a real Merkle root, since that recomputation lives entirely
/// outside this core.
#[derive(Default)]
pub struct MockContractCaller {
    inner: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    valid_checkpoint_roots: HashMap<(u64, u64), Hash32>,
    headers: HashMap<(RootChainType, u64), HeaderInfo>,
    synced_checkpoint_ids: HashMap<RootChainType, u64>,
    force_transport_error: bool,
}

impl MockContractCaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `validate_checkpoint(start, end, root, _)` succeed for exactly this root.
    pub fn seed_valid_checkpoint(&self, start: u64, end: u64, root: Hash32) {
        self.inner
            .lock()
            .valid_checkpoint_roots
            .insert((start, end), root);
    }

    /// Seeds the header-block record a root chain contract will answer with for
    /// `number`.
    pub fn seed_header(&self, root_chain_type: RootChainType, number: u64, info: HeaderInfo) {
        self.inner
            .lock()
            .headers
            .insert((root_chain_type, number), info);
    }

    /// Seeds the value `get_synced_checkpoint_id` returns for a root chain.
    pub fn seed_synced_checkpoint_id(&self, root_chain_type: RootChainType, number: u64) {
        self.inner
            .lock()
            .synced_checkpoint_ids
            .insert(root_chain_type, number);
    }

    /// Makes every subsequent call fail with a transport error, to exercise
    /// fail-closed behavior.
    pub fn fail_transport(&self) {
        self.inner.lock().force_transport_error = true;
    }
}

impl super::ContractCaller for MockContractCaller {
    fn validate_checkpoint(
        &self,
        start: u64,
        end: u64,
        root: Hash32,
        max_len: u64,
    ) -> ContractCallerResult<bool> {
        let state = self.inner.lock();
        if state.force_transport_error {
            return Err(ContractCallerError::Transport("mock: forced".into()));
        }
        let len = end.saturating_sub(start).saturating_add(1);
        if len > max_len {
            return Ok(false);
        }
        Ok(state.valid_checkpoint_roots.get(&(start, end)) == Some(&root))
    }

    fn get_root_chain_instance(
        &self,
        address: Address,
        root_chain_type: RootChainType,
    ) -> ContractCallerResult<RootChainInstance> {
        if self.inner.lock().force_transport_error {
            return Err(ContractCallerError::Transport("mock: forced".into()));
        }
        Ok(RootChainInstance {
            address,
            root_chain_type,
        })
    }

    fn get_header_info(
        &self,
        number: u64,
        instance: &RootChainInstance,
        _child_block_interval: u64,
    ) -> ContractCallerResult<HeaderInfo> {
        let state = self.inner.lock();
        if state.force_transport_error {
            return Err(ContractCallerError::Transport("mock: forced".into()));
        }
        state
            .headers
            .get(&(instance.root_chain_type, number))
            .cloned()
            .ok_or(ContractCallerError::HeaderNotFound(number))
    }

    fn get_tron_header_info(
        &self,
        number: u64,
        _tron_address: Address,
        _child_block_interval: u64,
    ) -> ContractCallerResult<HeaderInfo> {
        let state = self.inner.lock();
        if state.force_transport_error {
            return Err(ContractCallerError::Transport("mock: forced".into()));
        }
        state
            .headers
            .get(&(RootChainType::Tron, number))
            .cloned()
            .ok_or(ContractCallerError::HeaderNotFound(number))
    }

    fn get_synced_checkpoint_id(
        &self,
        _tron_staking_manager: Address,
        root_chain_type: RootChainType,
    ) -> ContractCallerResult<u64> {
        let state = self.inner.lock();
        if state.force_transport_error {
            return Err(ContractCallerError::Transport("mock: forced".into()));
        }
        state
            .synced_checkpoint_ids
            .get(&root_chain_type)
            .copied()
            .ok_or(ContractCallerError::HeaderNotFound(0))
    }
}
