//! Typed attribute events (component C6), emitted by the post committers after a
//! successful state transition.
//!
//! Consumers parse by attribute key (§6.3); order is not part of the contract, so this
//! stores attributes as an ordered `Vec` purely for deterministic test assertions, not
//! because order is meaningful downstream.

/// One emitted event: a kind tag plus its attribute list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub attributes: Vec<(String, String)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Checkpoint,
    CheckpointAck,
    CheckpointSync,
    CheckpointSyncAck,
}

impl EventKind {
    pub fn action(self) -> &'static str {
        match self {
            EventKind::Checkpoint => "checkpoint",
            EventKind::CheckpointAck => "checkpoint-ack",
            EventKind::CheckpointSync => "checkpoint-sync",
            EventKind::CheckpointSyncAck => "checkpoint-sync-ack",
        }
    }
}

/// Builds up the attribute list for one event. Handlers push exactly one of these per
/// successful post-commit; nothing is emitted if the handler returns an error first, so
/// there is no "undo" path to maintain.
pub struct EventBuilder {
    kind: EventKind,
    attributes: Vec<(String, String)>,
}

impl EventBuilder {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
        }
        .attr("action", kind.action())
        .attr("module", "checkpoint")
    }

    pub fn attr(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> Event {
        Event {
            kind: self.kind,
            attributes: self.attributes,
        }
    }
}
