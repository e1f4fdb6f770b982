//! For ensuring deterministic genesis states used in EE.

mod account_state;
mod exec_chain;
mod utils;

pub use account_state::ensure_genesis_ee_account_state;
pub use exec_chain::ensure_finalized_exec_chain_genesis;
pub use utils::*;
