use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU32, Ordering},
};

use bridge_checkpoint_types::{
    BufferEntry, ChainParams, Checkpoint, CheckpointError, CheckpointParams, CheckpointResult,
    RootChainConfig, RootChainType, SyncBufferEntry,
};
use parking_lot::RwLock;

use crate::traits::{CheckpointKeeper, StakingKeeper};

#[derive(Default)]
struct RootState {
    committed: BTreeMap<u64, Checkpoint>,
    buffer: Option<BufferEntry>,
    sync_buffer: Option<SyncBufferEntry>,
    ack_count: u64,
}

/// Reference `Keeper` implementation backed by in-process maps, one [`RootState`] per
/// [`RootChainType`] so that cross-tag isolation (§5) holds structurally: a write under
/// one tag can never touch another tag's entry in the outer map.
pub struct InMemoryKeeper {
    checkpoint_params: CheckpointParams,
    chain_config: RootChainConfig,
    roots: RwLock<BTreeMap<RootChainType, RootState>>,
}

impl InMemoryKeeper {
    pub fn new(checkpoint_params: CheckpointParams, chain_config: RootChainConfig) -> Self {
        Self {
            checkpoint_params,
            chain_config,
            roots: RwLock::new(BTreeMap::new()),
        }
    }
}

impl CheckpointKeeper for InMemoryKeeper {
    fn checkpoint_params(&self) -> CheckpointParams {
        self.checkpoint_params.clone()
    }

    fn chain_params(&self, root: RootChainType) -> CheckpointResult<ChainParams> {
        let params = self.chain_config.chain_params(root);
        if root != RootChainType::Stake && params.root_chain_address.is_none() {
            return Err(CheckpointError::WrongRootChainType);
        }
        Ok(params)
    }

    fn last_checkpoint(&self, root: RootChainType) -> CheckpointResult<Checkpoint> {
        self.roots
            .read()
            .get(&root)
            .and_then(|s| s.committed.values().next_back())
            .cloned()
            .ok_or(CheckpointError::NoCheckpointFound(root))
    }

    fn checkpoint_buffer(&self, root: RootChainType) -> Option<BufferEntry> {
        self.roots.read().get(&root).and_then(|s| s.buffer.clone())
    }

    fn set_checkpoint_buffer(&self, root: RootChainType, entry: BufferEntry) {
        self.roots.write().entry(root).or_default().buffer = Some(entry);
    }

    fn flush_checkpoint_buffer(&self, root: RootChainType) {
        if let Some(state) = self.roots.write().get_mut(&root) {
            state.buffer = None;
        }
    }

    fn add_checkpoint(
        &self,
        root: RootChainType,
        number: u64,
        checkpoint: Checkpoint,
    ) -> CheckpointResult<()> {
        self.roots
            .write()
            .entry(root)
            .or_default()
            .committed
            .insert(number, checkpoint);
        Ok(())
    }

    fn ack_count(&self, root: RootChainType) -> u64 {
        self.roots.read().get(&root).map(|s| s.ack_count).unwrap_or(0)
    }

    fn increment_ack_count(&self, root: RootChainType) {
        self.roots.write().entry(root).or_default().ack_count += 1;
    }

    fn sync_buffer(&self, root: RootChainType) -> Option<SyncBufferEntry> {
        self.roots
            .read()
            .get(&root)
            .and_then(|s| s.sync_buffer.clone())
    }

    fn set_sync_buffer(&self, root: RootChainType, entry: SyncBufferEntry) {
        self.roots.write().entry(root).or_default().sync_buffer = Some(entry);
    }

    fn flush_sync_buffer(&self, root: RootChainType) {
        if let Some(state) = self.roots.write().get_mut(&root) {
            state.sync_buffer = None;
        }
    }
}

/// Reference `StakingKeeper` implementation: a bare accumulator counter, enough to
/// assert the Stake-only rotation invariant (§8 invariant 7) in tests.
#[derive(Default)]
pub struct InMemoryStakingKeeper {
    accum: AtomicU32,
    invocations: AtomicU32,
}

impl InMemoryStakingKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accum(&self) -> u32 {
        self.accum.load(Ordering::SeqCst)
    }

    /// Number of times `increment_accum` has been called, for test assertions.
    pub fn invocation_count(&self) -> u32 {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl StakingKeeper for InMemoryStakingKeeper {
    fn increment_accum(&self, n: u32) {
        self.accum.fetch_add(n, Ordering::SeqCst);
        self.invocations.fetch_add(1, Ordering::SeqCst);
    }
}
