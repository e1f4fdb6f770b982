use thiserror::Error;

/// Transport/RPC-level failures underneath [`crate::ContractCaller`].
///
/// Distinct from `bridge_checkpoint_types::CheckpointError`: these are failures of the
/// oracle itself, not protocol verdicts. The side validators treat every variant here
/// as fail-closed (a `No` vote), per the spec's timeout/transport-error handling.
#[derive(Debug, Error)]
pub enum ContractCallerError {
    #[error("root chain rpc timed out")]
    Timeout,

    #[error("root chain rpc transport error: {0}")]
    Transport(String),

    #[error("header block {0} not found")]
    HeaderNotFound(u64),

    #[error("malformed response from root chain contract: {0}")]
    Malformed(String),
}

pub type ContractCallerResult<T> = Result<T, ContractCallerError>;
