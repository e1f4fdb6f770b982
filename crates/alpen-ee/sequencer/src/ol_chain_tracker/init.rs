use alpen_ee_common::{get_inbox_messages_checked, ExecBlockStorage, SequencerOLClient};
use eyre::eyre;
use tracing::error;

use crate::OLChainTrackerState;

/// Initializes tracker state by syncing from local storage and the OL client.
pub async fn init_ol_chain_tracker_state<TStorage: ExecBlockStorage, TClient: SequencerOLClient>(
    storage: &TStorage,
    ol_client: &TClient,
) -> eyre::Result<OLChainTrackerState> {
    // last finalized block known to EE sequencer locally
    let finalized_exec_block = storage
        .best_finalized_block()
        .await?
        .ok_or(eyre!("finalized block missing"))?;
    let local_finalized_ol_block = *finalized_exec_block.ol_block();

    // chain status according to OL
    // TODO: retry
    let ol_chain_status = ol_client.chain_status().await?;
    let remote_finalized_ol_block = ol_chain_status.finalized().to_block_commitment();

    if remote_finalized_ol_block.slot() < local_finalized_ol_block.slot() {
        // Block height that is considered finalized locally is not considered finalized on OL.
        //
        // Either a deep reorg has occurred on OL,
        // or a significant mismatch between OL and EE.
        // In either case, exit to avoid corrupting local data and await manual resolution.
        error!(
            local = ?local_finalized_ol_block,
            remote = ?remote_finalized_ol_block,
            "local finalized OL block ahead of OL"
        );
        return Err(eyre!(
            "local finalized state is ahead of connected OL's finalized slot"
        ));
    }

    // TODO: retry
    // TODO: chunk calls by slot range
    let blocks = get_inbox_messages_checked(
        ol_client,
        local_finalized_ol_block.slot(),
        remote_finalized_ol_block.slot(),
    )
    .await?;

    let (block_at_finalized_height, blocks) = {
        let mut iter = blocks.into_iter();
        // Safe: get_inbox_messages_checked guarantees (max_slot - min_slot + 1) >= 1 blocks.
        let first = iter.next().expect("at least one block guaranteed");

        (first, iter)
    };

    if block_at_finalized_height.commitment != local_finalized_ol_block {
        // The block we know to be finalized locally is not present in the OL chain.
        // OL chain has seen a deep reorg.
        // Avoid corrupting local data and exit to await manual resolution.
        error!(
            local = ?local_finalized_ol_block,
            remote = ?block_at_finalized_height.commitment,
            "local finalized OL block not present in OL"
        );

        return Err(eyre!(
            "local finalized state not present in OL chain. Deep reorg detected."
        ));
    }

    let mut state = OLChainTrackerState::new_empty(
        local_finalized_ol_block,
        block_at_finalized_height.next_inbox_msg_idx,
    );

    // Everything looks ok now. Build local state.
    for block in blocks {
        state.append_block(
            block.commitment,
            block.inbox_messages,
            block.next_inbox_msg_idx,
        )?;
    }

    Ok(state)
}
