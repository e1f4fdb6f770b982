//! Side validators (component C4): independent, oracle-backed checks run once per
//! message before consensus aggregates a vote. None of these touch the `Keeper`'s
//! mutable state — they only read `chain_params`/`checkpoint_params` and the
//! `ContractCaller`.

use bridge_checkpoint_contracts::ContractCaller;
use bridge_checkpoint_keeper::CheckpointKeeper;
use bridge_checkpoint_types::{Address, CheckpointError, CheckpointParams, RootChainType};
use tracing::{debug, warn};

use crate::{
    message::{MsgCheckpoint, MsgCheckpointAck, MsgCheckpointSync, MsgCheckpointSyncAck},
    vote::SideVote,
};

/// 4.2.1 — propose.
pub fn side_checkpoint(
    msg: &MsgCheckpoint,
    contracts: &dyn ContractCaller,
    params: &CheckpointParams,
) -> SideVote {
    match contracts.validate_checkpoint(
        msg.start_block,
        msg.end_block,
        msg.root_hash,
        params.max_checkpoint_length,
    ) {
        Ok(true) => SideVote::Yes,
        Ok(false) => SideVote::No(CheckpointError::InvalidBlockInput),
        Err(err) => {
            warn!(?err, "validate_checkpoint transport error, voting No");
            SideVote::No(CheckpointError::InvalidBlockInput)
        }
    }
}

/// Resolves the on-chain header record for `root_chain`/`number`, routing `Tron`
/// through its dedicated address encoding (§4.2.2 step 2).
fn resolve_header_info(
    root_chain: RootChainType,
    number: u64,
    keeper: &dyn CheckpointKeeper,
    contracts: &dyn ContractCaller,
) -> Result<bridge_checkpoint_contracts::HeaderInfo, CheckpointError> {
    let chain_params = keeper.chain_params(root_chain)?;

    if root_chain == RootChainType::Tron {
        return contracts
            .get_tron_header_info(
                number,
                chain_params.tron_staking_manager_address,
                chain_params.child_block_interval,
            )
            .map_err(|_| CheckpointError::InvalidAck);
    }

    let address = chain_params.root_chain_address.unwrap_or(Address::ZERO);
    let instance = contracts
        .get_root_chain_instance(address, root_chain)
        .map_err(|_| CheckpointError::InvalidAck)?;
    contracts
        .get_header_info(number, &instance, chain_params.child_block_interval)
        .map_err(|_| CheckpointError::InvalidAck)
}

/// 4.2.2 — confirm a submission on a root chain.
pub fn side_checkpoint_ack(
    msg: &MsgCheckpointAck,
    keeper: &dyn CheckpointKeeper,
    contracts: &dyn ContractCaller,
) -> SideVote {
    let header = match resolve_header_info(msg.root_chain, msg.number, keeper, contracts) {
        Ok(h) => h,
        Err(err) => return SideVote::No(err),
    };

    let matches = msg.start_block == header.start_block
        && msg.end_block == header.end_block
        && msg.proposer == header.proposer
        && msg.root_hash == header.root_hash;

    debug!(
        root_chain = ?msg.root_chain,
        number = msg.number,
        matches,
        "checked checkpoint ack against root chain header"
    );

    if matches {
        SideVote::Yes
    } else {
        SideVote::No(CheckpointError::InvalidAck)
    }
}

/// 4.2.3 — mirror a checkpoint submitted directly on a secondary root chain.
///
/// `root_hash` is deliberately not part of the comparison: a sync confirms interval
/// ownership, not the committed root value (§4.2.3).
pub fn side_checkpoint_sync(
    msg: &MsgCheckpointSync,
    keeper: &dyn CheckpointKeeper,
    contracts: &dyn ContractCaller,
) -> SideVote {
    let header = match resolve_header_info(msg.root_chain, msg.number, keeper, contracts) {
        Ok(h) => h,
        Err(err) => return SideVote::No(err),
    };

    let matches = msg.start_block == header.start_block
        && msg.end_block == header.end_block
        && msg.proposer == header.proposer;

    if matches {
        SideVote::Yes
    } else {
        SideVote::No(CheckpointError::InvalidAck)
    }
}

/// 4.2.4 — confirm a previously synced checkpoint.
pub fn side_checkpoint_sync_ack(
    msg: &MsgCheckpointSyncAck,
    keeper: &dyn CheckpointKeeper,
    contracts: &dyn ContractCaller,
) -> SideVote {
    let chain_params = match keeper.chain_params(msg.root_chain) {
        Ok(p) => p,
        Err(err) => return SideVote::No(err),
    };

    let synced = match contracts.get_synced_checkpoint_id(
        chain_params.tron_staking_manager_address,
        msg.root_chain,
    ) {
        Ok(n) => n,
        Err(err) => {
            warn!(?err, "get_synced_checkpoint_id transport error, voting No");
            return SideVote::No(CheckpointError::InvalidAck);
        }
    };

    if msg.number <= synced {
        SideVote::Yes
    } else {
        SideVote::No(CheckpointError::InvalidAck)
    }
}
