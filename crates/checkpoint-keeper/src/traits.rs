use bridge_checkpoint_types::{
    BufferEntry, ChainParams, Checkpoint, CheckpointParams, CheckpointResult, RootChainType,
    SyncBufferEntry,
};

/// State access for the checkpoint coordination core (component C2/C3 combined behind
/// one trait, as the post committer never needs to distinguish the two stores by type,
/// only by the methods it calls).
///
/// The `Keeper` is the sole writer of persistent checkpoint state. All methods are
/// keyed by [`RootChainType`]; an implementation must keep the state for each tag
/// byte-isolated from every other tag (§5, *Cross-tag isolation*).
pub trait CheckpointKeeper {
    /// Global checkpoint-shape limits.
    fn checkpoint_params(&self) -> CheckpointParams;

    /// Resolved per-root-chain configuration. `Stake` has no external contract address
    /// and callers resolving an ack/sync address for it get `WrongRootChainType`.
    fn chain_params(&self, root: RootChainType) -> CheckpointResult<ChainParams>;

    /// The most recently committed checkpoint for `root`, or the `NoCheckpointFound`
    /// sentinel if none has ever been committed.
    fn last_checkpoint(&self, root: RootChainType) -> CheckpointResult<Checkpoint>;

    /// The checkpoint currently sitting in the proposal buffer for `root`, if any.
    fn checkpoint_buffer(&self, root: RootChainType) -> Option<BufferEntry>;

    /// Overwrites the proposal buffer for `root`. Callers must have already checked
    /// that the slot is empty or expired; the keeper does not enforce the single-slot
    /// invariant itself.
    fn set_checkpoint_buffer(&self, root: RootChainType, entry: BufferEntry);

    /// Clears the proposal buffer for `root`.
    fn flush_checkpoint_buffer(&self, root: RootChainType);

    /// Appends `checkpoint` to the committed log for `root` under `number`.
    fn add_checkpoint(
        &self,
        root: RootChainType,
        number: u64,
        checkpoint: Checkpoint,
    ) -> CheckpointResult<()>;

    /// Current ack count for `root`.
    fn ack_count(&self, root: RootChainType) -> u64;

    /// Increments the ack count for `root` by one.
    fn increment_ack_count(&self, root: RootChainType);

    /// The checkpoint currently sitting in the sync buffer for `root`, if any.
    fn sync_buffer(&self, root: RootChainType) -> Option<SyncBufferEntry>;

    /// Overwrites the sync buffer for `root`.
    fn set_sync_buffer(&self, root: RootChainType, entry: SyncBufferEntry);

    /// Clears the sync buffer for `root`.
    fn flush_sync_buffer(&self, root: RootChainType);
}

/// Proposer-rotation hook, invoked exactly once per successful `Stake`-tagged ack
/// (§4.3.2 step 8, §8 invariant 7).
pub trait StakingKeeper {
    fn increment_accum(&self, n: u32);
}
