use std::collections::BTreeMap;

use bridge_checkpoint_contracts::testing::MockContractCaller;
use bridge_checkpoint_keeper::{InMemoryKeeper, InMemoryStakingKeeper};
use bridge_checkpoint_types::{
    Address, CheckpointError, CheckpointParams, Hash32, RootChainConfig, RootChainType,
};

use super::*;

fn harness(root: RootChainType, activation_height: u64) -> (InMemoryKeeper, MockContractCaller) {
    let mut chain_activation_heights = BTreeMap::new();
    chain_activation_heights.insert(root, activation_height);

    let mut root_chain_addresses = BTreeMap::new();
    if root != RootChainType::Tron && root != RootChainType::Stake {
        root_chain_addresses.insert(root, Address([9u8; 20]));
    }

    let keeper = InMemoryKeeper::new(
        CheckpointParams {
            max_checkpoint_length: 10_000,
            checkpoint_buffer_time_secs: 1_000,
        },
        RootChainConfig {
            child_block_interval: 1,
            root_chain_addresses,
            chain_activation_heights,
            tron_staking_manager_address: Address([7u8; 20]),
        },
    );
    (keeper, MockContractCaller::new())
}

fn ctx(block_time: u64) -> HandlerCtx {
    HandlerCtx::new(block_time, Hash32::ZERO)
}

fn propose(root: RootChainType, start: u64, end: u64, root_hash: Hash32) -> MsgCheckpoint {
    MsgCheckpoint {
        start_block: start,
        end_block: end,
        root_hash,
        proposer: Address([1u8; 20]),
        account_root_hash: Hash32::ZERO,
        bor_chain_id: "137".into(),
        root_chain: root,
    }
}

// S1: first checkpoint at activation height buffers and emits.
#[test]
fn s1_first_checkpoint_buffers_and_emits() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let mut c = ctx(10);
    let msg = propose(RootChainType::Eth, 100, 199, Hash32::ZERO);

    post_checkpoint(&msg, &SideVote::Yes, &keeper, &mut c).unwrap();

    let buffered = keeper.checkpoint_buffer(RootChainType::Eth).unwrap();
    assert_eq!(buffered.checkpoint.start_block, 100);
    assert_eq!(buffered.checkpoint.end_block, 199);

    let events = c.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Checkpoint);
}

// S2: a duplicate proposal while the buffer is live is a soft NoAck, no overwrite.
#[test]
fn s2_duplicate_proposal_is_no_ack() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let mut c = ctx(10);
    let first = propose(RootChainType::Eth, 100, 199, Hash32::ZERO);
    post_checkpoint(&first, &SideVote::Yes, &keeper, &mut c).unwrap();

    let mut c2 = ctx(20);
    let err = post_checkpoint(&first, &SideVote::Yes, &keeper, &mut c2).unwrap_err();
    assert_eq!(err, CheckpointError::NoAck { expiry: 10 + 1_000 });

    let buffered = keeper.checkpoint_buffer(RootChainType::Eth).unwrap();
    assert_eq!(buffered.timestamp, 10, "buffer must not be overwritten");
}

// S3: ack commits the buffered checkpoint, flushes, increments ack count, no rotation.
#[test]
fn s3_ack_commits_and_flushes() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let staking = InMemoryStakingKeeper::new();
    let mut c = ctx(10);
    let root_hash = Hash32([5u8; 32]);
    let proposer = Address([1u8; 20]);

    post_checkpoint(
        &propose(RootChainType::Eth, 100, 199, root_hash),
        &SideVote::Yes,
        &keeper,
        &mut c,
    )
    .unwrap();

    let ack = MsgCheckpointAck {
        number: 1,
        start_block: 100,
        end_block: 199,
        root_hash,
        proposer,
        root_chain: RootChainType::Eth,
    };
    let mut c2 = ctx(20);
    post_checkpoint_ack(&ack, &SideVote::Yes, &keeper, &staking, &mut c2).unwrap();

    assert!(keeper.checkpoint_buffer(RootChainType::Eth).is_none());
    assert_eq!(keeper.ack_count(RootChainType::Eth), 1);
    assert_eq!(keeper.last_checkpoint(RootChainType::Eth).unwrap().end_block, 199);
    assert_eq!(staking.invocation_count(), 0, "Eth must not rotate the proposer");
}

// S4: an ack with a shorter end_block trims the buffered checkpoint before commit.
#[test]
fn s4_ack_trims_to_onchain_truth() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let staking = InMemoryStakingKeeper::new();
    let mut c = ctx(10);

    post_checkpoint(
        &propose(RootChainType::Eth, 100, 199, Hash32::ZERO),
        &SideVote::Yes,
        &keeper,
        &mut c,
    )
    .unwrap();

    let trimmed_root = Hash32([9u8; 32]);
    let trimmed_proposer = Address([2u8; 20]);
    let ack = MsgCheckpointAck {
        number: 1,
        start_block: 100,
        end_block: 150,
        root_hash: trimmed_root,
        proposer: trimmed_proposer,
        root_chain: RootChainType::Eth,
    };
    let mut c2 = ctx(20);
    post_checkpoint_ack(&ack, &SideVote::Yes, &keeper, &staking, &mut c2).unwrap();

    let committed = keeper.last_checkpoint(RootChainType::Eth).unwrap();
    assert_eq!(committed.end_block, 150);
    assert_eq!(committed.root_hash, trimmed_root);
    assert_eq!(committed.proposer, trimmed_proposer);
}

// S5: a gap after the committed tip is discontinuous.
#[test]
fn s5_gap_after_tip_is_discontinuous() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let staking = InMemoryStakingKeeper::new();
    let mut c = ctx(10);
    post_checkpoint(
        &propose(RootChainType::Eth, 100, 199, Hash32::ZERO),
        &SideVote::Yes,
        &keeper,
        &mut c,
    )
    .unwrap();
    let ack = MsgCheckpointAck {
        number: 1,
        start_block: 100,
        end_block: 199,
        root_hash: Hash32::ZERO,
        proposer: Address([1u8; 20]),
        root_chain: RootChainType::Eth,
    };
    let mut c2 = ctx(20);
    post_checkpoint_ack(&ack, &SideVote::Yes, &keeper, &staking, &mut c2).unwrap();

    let mut c3 = ctx(30);
    let err = post_checkpoint(
        &propose(RootChainType::Eth, 210, 300, Hash32::ZERO),
        &SideVote::Yes,
        &keeper,
        &mut c3,
    )
    .unwrap_err();
    assert_eq!(err, CheckpointError::DiscontinuousCheckpoint);
}

// S6: an interval longer than max_checkpoint_length votes No/InvalidBlockInput.
#[test]
fn s6_overlong_interval_votes_no() {
    let (keeper, contracts) = harness(RootChainType::Eth, 100);
    let msg = propose(RootChainType::Eth, 200, 999_999, Hash32::ZERO);
    let vote = side_checkpoint(&msg, &contracts, &keeper.checkpoint_params());
    assert_eq!(vote, SideVote::No(CheckpointError::InvalidBlockInput));
}

// S7: sync-ack referencing a higher number than the relayer has synced votes No.
#[test]
fn s7_sync_ack_ahead_of_relayer_votes_no() {
    let (keeper, contracts) = harness(RootChainType::Eth, 100);
    contracts.seed_synced_checkpoint_id(RootChainType::Eth, 4);
    let msg = MsgCheckpointSyncAck {
        number: 5,
        root_chain: RootChainType::Eth,
    };
    let vote = side_checkpoint_sync_ack(&msg, &keeper, &contracts);
    assert_eq!(vote, SideVote::No(CheckpointError::InvalidAck));
}

// S8: a successful Stake-tagged ack rotates the proposer exactly once.
#[test]
fn s8_stake_ack_rotates_proposer_once() {
    let (keeper, _contracts) = harness(RootChainType::Stake, 0);
    let staking = InMemoryStakingKeeper::new();
    let mut c = ctx(10);
    post_checkpoint(
        &propose(RootChainType::Stake, 0, 9, Hash32::ZERO),
        &SideVote::Yes,
        &keeper,
        &mut c,
    )
    .unwrap();

    let ack = MsgCheckpointAck {
        number: 1,
        start_block: 0,
        end_block: 9,
        root_hash: Hash32::ZERO,
        proposer: Address([1u8; 20]),
        root_chain: RootChainType::Stake,
    };
    let mut c2 = ctx(20);
    post_checkpoint_ack(&ack, &SideVote::Yes, &keeper, &staking, &mut c2).unwrap();
    assert_eq!(staking.invocation_count(), 1);
}

// Invariant 2: the first checkpoint must start exactly at the activation height.
#[test]
fn first_checkpoint_must_start_at_activation_height() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let mut c = ctx(10);
    let err = post_checkpoint(
        &propose(RootChainType::Eth, 50, 149, Hash32::ZERO),
        &SideVote::Yes,
        &keeper,
        &mut c,
    )
    .unwrap_err();
    assert_eq!(err, CheckpointError::BadBlockDetails);
}

// Invariant 3 (single-slot buffer) already covered by s2; this checks it also applies
// to the sync buffer.
#[test]
fn sync_buffer_is_single_slot() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let mut c = ctx(10);
    let sync = MsgCheckpointSync {
        number: 1,
        start_block: 100,
        end_block: 199,
        proposer: Address([1u8; 20]),
        root_chain: RootChainType::Eth,
    };
    post_checkpoint_sync(&sync, &SideVote::Yes, &keeper, &mut c).unwrap();

    let mut c2 = ctx(20);
    let err = post_checkpoint_sync(&sync, &SideVote::Yes, &keeper, &mut c2).unwrap_err();
    assert!(matches!(err, CheckpointError::NoAck { .. }));
}

// §11.4 open question resolution: sync performs no continuity check.
#[test]
fn sync_has_no_continuity_check() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let mut c = ctx(10);
    let sync = MsgCheckpointSync {
        number: 1,
        start_block: 100,
        end_block: 199,
        proposer: Address([1u8; 20]),
        root_chain: RootChainType::Eth,
    };
    post_checkpoint_sync(&sync, &SideVote::Yes, &keeper, &mut c).unwrap();

    // Flush via sync-ack, then sync a non-adjacent interval: must succeed.
    let mut c_ack = ctx(11);
    post_checkpoint_sync_ack(
        &MsgCheckpointSyncAck {
            number: 1,
            root_chain: RootChainType::Eth,
        },
        &SideVote::Yes,
        &keeper,
        &mut c_ack,
    )
    .unwrap();

    let mut c2 = ctx(20);
    let disjoint_sync = MsgCheckpointSync {
        number: 2,
        start_block: 500,
        end_block: 600,
        proposer: Address([1u8; 20]),
        root_chain: RootChainType::Eth,
    };
    post_checkpoint_sync(&disjoint_sync, &SideVote::Yes, &keeper, &mut c2).unwrap();
    assert_eq!(keeper.sync_buffer(RootChainType::Eth).unwrap().start_block, 500);
}

// Invariant 5: operations on one root chain leave another tag untouched.
#[test]
fn isolation_across_root_chains() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let mut c = ctx(10);
    post_checkpoint(
        &propose(RootChainType::Eth, 100, 199, Hash32::ZERO),
        &SideVote::Yes,
        &keeper,
        &mut c,
    )
    .unwrap();

    assert!(keeper.checkpoint_buffer(RootChainType::Bsc).is_none());
    assert!(keeper.checkpoint_buffer(RootChainType::Tron).is_none());
    assert_eq!(keeper.ack_count(RootChainType::Bsc), 0);
}

// Invariant 6: a non-Yes side result never mutates state or emits events.
#[test]
fn no_vote_is_a_noop() {
    let (keeper, _contracts) = harness(RootChainType::Eth, 100);
    let mut c = ctx(10);
    let err = post_checkpoint(
        &propose(RootChainType::Eth, 100, 199, Hash32::ZERO),
        &SideVote::No(CheckpointError::InvalidBlockInput),
        &keeper,
        &mut c,
    )
    .unwrap_err();
    assert_eq!(err, CheckpointError::BadBlockDetails);
    assert!(keeper.checkpoint_buffer(RootChainType::Eth).is_none());
    assert!(c.take_events().is_empty());
}

// §11.1: resolving an unconfigured contract address never panics, returns a typed
// error instead.
#[test]
fn unconfigured_root_chain_is_typed_error_not_panic() {
    let (keeper, contracts) = harness(RootChainType::Eth, 100);
    let ack = MsgCheckpointAck {
        number: 1,
        start_block: 0,
        end_block: 0,
        root_hash: Hash32::ZERO,
        proposer: Address([1u8; 20]),
        root_chain: RootChainType::Bsc, // never configured by this harness
    };
    let vote = side_checkpoint_ack(&ack, &keeper, &contracts);
    assert_eq!(vote, SideVote::No(CheckpointError::WrongRootChainType));
}

// Side-phase Yes path through the full dispatcher, end to end.
#[test]
fn dispatcher_routes_checkpoint_ack_through_side_and_post() {
    let (keeper, contracts) = harness(RootChainType::Eth, 100);
    let staking = InMemoryStakingKeeper::new();
    let root_hash = Hash32([3u8; 32]);
    let proposer = Address([4u8; 20]);

    let mut c = ctx(10);
    dispatch_post(
        &CheckpointMsg::Checkpoint(propose(RootChainType::Eth, 100, 199, root_hash)),
        &SideVote::Yes,
        &keeper,
        &staking,
        &mut c,
    )
    .unwrap();

    contracts.seed_header(
        RootChainType::Eth,
        1,
        bridge_checkpoint_contracts::HeaderInfo {
            root_hash,
            start_block: 100,
            end_block: 199,
            created_at: 0,
            proposer,
        },
    );

    let ack_msg = CheckpointMsg::CheckpointAck(MsgCheckpointAck {
        number: 1,
        start_block: 100,
        end_block: 199,
        root_hash,
        proposer,
        root_chain: RootChainType::Eth,
    });
    let vote = dispatch_side(&ack_msg, &keeper, &contracts);
    assert_eq!(vote, SideVote::Yes);

    let mut c2 = ctx(20);
    dispatch_post(&ack_msg, &vote, &keeper, &staking, &mut c2).unwrap();
    assert_eq!(keeper.ack_count(RootChainType::Eth), 1);
}
