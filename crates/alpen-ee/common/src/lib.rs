#![expect(unused_crate_dependencies, reason = "wip")]
pub mod traits;
pub mod types;

pub use traits::storage::{OLBlockOrSlot, Storage, StorageError};
pub use types::ee_account_state::EeAccountStateAtBlock;
