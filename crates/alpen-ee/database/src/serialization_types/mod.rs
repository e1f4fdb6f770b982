mod account_state;
mod batch;
mod exec_block;
mod olblockid;

pub(crate) use account_state::DBAccountStateAtEpoch;
pub(crate) use batch::{DBBatchId, DBBatchWithStatus, DBChunkId, DBChunkWithStatus};
pub(crate) use exec_block::DBExecBlockRecord;
pub(crate) use olblockid::DBOLBlockId;
