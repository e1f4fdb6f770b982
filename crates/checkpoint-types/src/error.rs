use thiserror::Error;

use crate::root_chain::RootChainType;

/// Protocol-level result codes produced by the side validators and post committers.
///
/// These are acceptance-criteria codes, not implementation failures: a `No` vote or a
/// rejected post-commit is an expected, well-typed outcome, never a panic or an
/// `anyhow`-style opaque error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckpointError {
    /// Merkle root mismatch or interval longer than `max_checkpoint_length`.
    #[error("invalid block input")]
    InvalidBlockInput,

    /// Side-phase external-truth mismatch for an ack or a sync.
    #[error("invalid ack")]
    InvalidAck,

    /// Root chain tag not recognized while resolving a contract address.
    #[error("wrong root chain type")]
    WrongRootChainType,

    /// A proposed checkpoint overlaps the existing committed tip.
    #[error("checkpoint overlaps last committed checkpoint")]
    OldCheckpoint,

    /// A proposed checkpoint leaves a gap after the committed tip.
    #[error("checkpoint is discontinuous with last committed checkpoint")]
    DiscontinuousCheckpoint,

    /// First checkpoint for a tag did not start at `ChainActivationHeight`, or the
    /// side-tx result was not `Yes`.
    #[error("bad block details")]
    BadBlockDetails,

    /// Buffer already occupied by an unexpired entry; not a fault, the caller should
    /// retry after `expiry`.
    #[error("no ack: buffer occupied until {expiry}")]
    NoAck { expiry: u64 },

    /// Buffer missing, or the ack message does not match the buffered checkpoint.
    #[error("bad ack")]
    BadAck,

    /// No checkpoint has ever been committed for this root chain.
    #[error("no checkpoint found for {0}")]
    NoCheckpointFound(RootChainType),

    /// Message kind not recognized by the dispatcher.
    #[error("unknown request")]
    UnknownRequest,
}

pub type CheckpointResult<T> = Result<T, CheckpointError>;
