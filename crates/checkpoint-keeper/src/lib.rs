//! The checkpoint `Keeper` (state access, components C2/C3) and `StakingKeeper`
//! (proposer rotation) interfaces, plus in-memory reference implementations.

mod memory;
mod traits;

pub use memory::{InMemoryKeeper, InMemoryStakingKeeper};
pub use traits::{CheckpointKeeper, StakingKeeper};
