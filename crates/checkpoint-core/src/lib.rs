//! The checkpoint coordination core: dispatcher, side validators, post committers, and
//! event emission for the four checkpoint side-transaction kinds.
//!
//! `CheckpointMsg` is a closed Rust enum, so the dispatcher's match is already
//! exhaustive at compile time — there is no runtime "unrecognized kind" case to route
//! through `CheckpointError::UnknownRequest`. That variant is kept in
//! `bridge-checkpoint-types` for the wire-level adapter that decodes a raw message
//! envelope into a `CheckpointMsg` before it ever reaches this crate, which is outside
//! this core's scope (§1).

mod context;
mod dispatch;
mod events;
mod message;
mod post;
mod side;
mod vote;

pub use context::HandlerCtx;
pub use dispatch::{dispatch_post, dispatch_side};
pub use events::{Event, EventBuilder, EventKind};
pub use message::{
    CheckpointMsg, MsgCheckpoint, MsgCheckpointAck, MsgCheckpointSync, MsgCheckpointSyncAck,
};
pub use post::{post_checkpoint, post_checkpoint_ack, post_checkpoint_sync, post_checkpoint_sync_ack};
pub use side::{side_checkpoint, side_checkpoint_ack, side_checkpoint_sync, side_checkpoint_sync_ack};
pub use vote::SideVote;

#[cfg(test)]
mod tests;
