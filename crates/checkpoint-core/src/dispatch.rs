//! Dispatcher (component C7): the two entry points consensus calls into, one per
//! phase. Routing is an exhaustive match over the closed [`CheckpointMsg`] sum type,
//! mirroring the teacher's exhaustive subprotocol/handler-table dispatch idiom rather
//! than a dynamic registry — there are exactly four message kinds and they do not
//! change without a protocol upgrade.

use bridge_checkpoint_contracts::ContractCaller;
use bridge_checkpoint_keeper::{CheckpointKeeper, StakingKeeper};
use bridge_checkpoint_types::CheckpointResult;

use crate::{context::HandlerCtx, message::CheckpointMsg, post, side, vote::SideVote};

/// Side phase: independently vote on `msg` without mutating any persistent state.
pub fn dispatch_side(
    msg: &CheckpointMsg,
    keeper: &dyn CheckpointKeeper,
    contracts: &dyn ContractCaller,
) -> SideVote {
    match msg {
        CheckpointMsg::Checkpoint(m) => {
            side::side_checkpoint(m, contracts, &keeper.checkpoint_params())
        }
        CheckpointMsg::CheckpointAck(m) => side::side_checkpoint_ack(m, keeper, contracts),
        CheckpointMsg::CheckpointSync(m) => side::side_checkpoint_sync(m, keeper, contracts),
        CheckpointMsg::CheckpointSyncAck(m) => {
            side::side_checkpoint_sync_ack(m, keeper, contracts)
        }
    }
}

/// Post phase: apply `msg`'s persistent effects, gated on the aggregated `side_result`.
pub fn dispatch_post(
    msg: &CheckpointMsg,
    side_result: &SideVote,
    keeper: &dyn CheckpointKeeper,
    staking: &dyn StakingKeeper,
    ctx: &mut HandlerCtx,
) -> CheckpointResult<()> {
    match msg {
        CheckpointMsg::Checkpoint(m) => post::post_checkpoint(m, side_result, keeper, ctx),
        CheckpointMsg::CheckpointAck(m) => {
            post::post_checkpoint_ack(m, side_result, keeper, staking, ctx)
        }
        CheckpointMsg::CheckpointSync(m) => {
            post::post_checkpoint_sync(m, side_result, keeper, ctx)
        }
        CheckpointMsg::CheckpointSyncAck(m) => {
            post::post_checkpoint_sync_ack(m, side_result, keeper, ctx)
        }
    }
}
