mod ctx;
mod error;
mod handle;
mod reorg;
mod state;
mod task;

pub(crate) use handle::OlTrackerBuilder;
pub(crate) use state::{init_ol_tracker_state, ConsensusHeads};
