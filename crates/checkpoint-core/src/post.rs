//! Post committers (component C5): deterministic state transitions applied once the
//! side-tx result has been consensus-aggregated to `Yes`. None of these consult the
//! `ContractCaller` — doing so would make the post phase non-deterministic across
//! validators (§5).

use bridge_checkpoint_keeper::{CheckpointKeeper, StakingKeeper};
use bridge_checkpoint_types::{
    BufferEntry, Checkpoint, CheckpointError, CheckpointResult, SyncBufferEntry,
};
use tracing::info;

use crate::{
    context::HandlerCtx,
    events::{EventBuilder, EventKind},
    message::{MsgCheckpoint, MsgCheckpointAck, MsgCheckpointSync, MsgCheckpointSyncAck},
    vote::SideVote,
};

fn require_yes(side_result: &SideVote) -> CheckpointResult<()> {
    if side_result.is_yes() {
        Ok(())
    } else {
        Err(CheckpointError::BadBlockDetails)
    }
}

/// 4.3.1 — buffer insertion.
pub fn post_checkpoint(
    msg: &MsgCheckpoint,
    side_result: &SideVote,
    keeper: &dyn CheckpointKeeper,
    ctx: &mut HandlerCtx,
) -> CheckpointResult<()> {
    require_yes(side_result)?;

    match keeper.last_checkpoint(msg.root_chain) {
        Ok(last) => {
            if last.end_block >= msg.start_block {
                return Err(CheckpointError::OldCheckpoint);
            }
            if last.end_block + 1 != msg.start_block {
                return Err(CheckpointError::DiscontinuousCheckpoint);
            }
        }
        Err(CheckpointError::NoCheckpointFound(_)) => {
            let chain_params = keeper.chain_params(msg.root_chain)?;
            if msg.start_block != chain_params.chain_activation_height {
                return Err(CheckpointError::BadBlockDetails);
            }
        }
        Err(err) => return Err(err),
    }

    let buffer_ttl = keeper.checkpoint_params().checkpoint_buffer_time_secs;
    if let Some(existing) = keeper.checkpoint_buffer(msg.root_chain) {
        if !existing.is_expired(ctx.block_time(), buffer_ttl) {
            return Err(CheckpointError::NoAck {
                expiry: existing.expiry(buffer_ttl),
            });
        }
    }

    let checkpoint = Checkpoint {
        start_block: msg.start_block,
        end_block: msg.end_block,
        root_hash: msg.root_hash,
        proposer: msg.proposer,
        account_root_hash: msg.account_root_hash,
        bor_chain_id: msg.bor_chain_id.clone(),
        root_chain: msg.root_chain,
    };
    keeper.set_checkpoint_buffer(
        msg.root_chain,
        BufferEntry {
            checkpoint,
            timestamp: ctx.block_time(),
        },
    );

    info!(
        root_chain = ?msg.root_chain,
        start = msg.start_block,
        end = msg.end_block,
        "checkpoint buffered"
    );

    ctx.emit(
        EventBuilder::new(EventKind::Checkpoint)
            .attr("tx-hash", ctx.tx_hash())
            .attr("side-tx-result", "Yes")
            .attr("proposer", msg.proposer)
            .attr("start", msg.start_block)
            .attr("end", msg.end_block)
            .attr("root-hash", msg.root_hash)
            .attr("account-hash", msg.account_root_hash)
            .attr("root-chain", msg.root_chain)
            .build(),
    );

    Ok(())
}

/// 4.3.2 — commit a checkpoint ack.
pub fn post_checkpoint_ack(
    msg: &MsgCheckpointAck,
    side_result: &SideVote,
    keeper: &dyn CheckpointKeeper,
    staking: &dyn StakingKeeper,
    ctx: &mut HandlerCtx,
) -> CheckpointResult<()> {
    require_yes(side_result)?;

    let mut buffer = keeper
        .checkpoint_buffer(msg.root_chain)
        .ok_or(CheckpointError::BadAck)?;

    if msg.start_block != buffer.checkpoint.start_block {
        return Err(CheckpointError::BadAck);
    }

    // Exact start/end match with a differing root is an unrecoverable mismatch; this
    // arm is checked before the trim arm below so the dominance relationship (§9.3) is
    // structural, not a consequence of branch order.
    if msg.end_block == buffer.checkpoint.end_block && msg.root_hash != buffer.checkpoint.root_hash
    {
        return Err(CheckpointError::BadAck);
    }

    if buffer.checkpoint.end_block > msg.end_block {
        buffer.checkpoint.end_block = msg.end_block;
        buffer.checkpoint.root_hash = msg.root_hash;
        buffer.checkpoint.proposer = msg.proposer;
    }

    keeper.add_checkpoint(msg.root_chain, msg.number, buffer.checkpoint.clone())?;
    keeper.increment_ack_count(msg.root_chain);
    keeper.flush_checkpoint_buffer(msg.root_chain);

    if msg.root_chain.drives_proposer_rotation() {
        staking.increment_accum(1);
    }

    info!(
        root_chain = ?msg.root_chain,
        number = msg.number,
        end = buffer.checkpoint.end_block,
        "checkpoint ack committed"
    );

    ctx.emit(
        EventBuilder::new(EventKind::CheckpointAck)
            .attr("tx-hash", ctx.tx_hash())
            .attr("side-tx-result", "Yes")
            .attr("header-index", msg.number)
            .attr("root-chain", msg.root_chain)
            .build(),
    );

    Ok(())
}

/// 4.3.3 — sync mirror. No continuity check: a sync mirrors externally submitted
/// state already validated in the side phase, and may legitimately cover any interval
/// (§9.4, §11.4).
pub fn post_checkpoint_sync(
    msg: &MsgCheckpointSync,
    side_result: &SideVote,
    keeper: &dyn CheckpointKeeper,
    ctx: &mut HandlerCtx,
) -> CheckpointResult<()> {
    require_yes(side_result)?;

    let buffer_ttl = keeper.checkpoint_params().checkpoint_buffer_time_secs;
    if let Some(existing) = keeper.sync_buffer(msg.root_chain) {
        if !existing.is_expired(ctx.block_time(), buffer_ttl) {
            return Err(CheckpointError::NoAck {
                expiry: existing.expiry(buffer_ttl),
            });
        }
    }

    keeper.set_sync_buffer(
        msg.root_chain,
        SyncBufferEntry {
            number: msg.number,
            start_block: msg.start_block,
            end_block: msg.end_block,
            proposer: msg.proposer,
            timestamp: ctx.block_time(),
        },
    );

    ctx.emit(
        EventBuilder::new(EventKind::CheckpointSync)
            .attr("tx-hash", ctx.tx_hash())
            .attr("side-tx-result", "Yes")
            .attr("number", msg.number)
            .attr("root-chain", msg.root_chain)
            .build(),
    );

    Ok(())
}

/// 4.3.3 — sync ack: flush only, no further state change.
pub fn post_checkpoint_sync_ack(
    msg: &MsgCheckpointSyncAck,
    side_result: &SideVote,
    keeper: &dyn CheckpointKeeper,
    ctx: &mut HandlerCtx,
) -> CheckpointResult<()> {
    require_yes(side_result)?;

    keeper.flush_sync_buffer(msg.root_chain);

    ctx.emit(
        EventBuilder::new(EventKind::CheckpointSyncAck)
            .attr("tx-hash", ctx.tx_hash())
            .attr("side-tx-result", "Yes")
            .attr("number", msg.number)
            .attr("root-chain", msg.root_chain)
            .build(),
    );

    Ok(())
}
