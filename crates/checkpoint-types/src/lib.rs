//! Data model for the checkpoint coordination core: the `Checkpoint` value, its
//! buffered and committed forms, the closed `RootChainType` tag set, and the protocol
//! result codes the side validators and post committers produce.

mod checkpoint;
mod error;
mod params;
mod primitives;
mod root_chain;

pub use checkpoint::{BufferEntry, Checkpoint, CommittedCheckpoint, SyncBufferEntry};
pub use error::{CheckpointError, CheckpointResult};
pub use params::{ChainParams, CheckpointParams, RootChainConfig};
pub use primitives::{Address, Hash32};
pub use root_chain::RootChainType;
