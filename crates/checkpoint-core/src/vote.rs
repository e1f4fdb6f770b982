use bridge_checkpoint_types::CheckpointError;

/// Outcome of the side phase (component C4): the validators' independent,
/// oracle-backed check of a message before consensus aggregates it.
///
/// There is no `Skip` variant here — `Skip` (abstain) is a consensus-layer concept for
/// validators that cannot reach the oracle at all; once a validator does reach it, the
/// outcome is binary. A `No` always carries the reason so the post phase can return it
/// verbatim if, by some bug in the caller, post runs without aggregation ever having
/// happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideVote {
    Yes,
    No(CheckpointError),
}

impl SideVote {
    pub fn is_yes(&self) -> bool {
        matches!(self, SideVote::Yes)
    }
}
