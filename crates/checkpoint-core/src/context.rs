use bridge_checkpoint_types::Hash32;

use crate::events::Event;

/// Per-message handler context (§4.1, §6.3): the bridge block time the post phase is
/// allowed to observe, the raw transaction hash used in event attributes, and a fresh
/// event accumulator installed by the dispatcher for this one message.
///
/// The post phase's determinism requirement (§5) is structural here: `HandlerCtx` is
/// the only channel through which a post committer can read anything resembling
/// "current time", and it is fed by the replicated block time, never a wall clock.
pub struct HandlerCtx {
    block_time: u64,
    tx_hash: Hash32,
    events: Vec<Event>,
}

impl HandlerCtx {
    pub fn new(block_time: u64, tx_hash: Hash32) -> Self {
        Self {
            block_time,
            tx_hash,
            events: Vec::new(),
        }
    }

    pub fn block_time(&self) -> u64 {
        self.block_time
    }

    pub fn tx_hash(&self) -> Hash32 {
        self.tx_hash
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Drains the events accumulated for this message. Intended to be called once,
    /// after the post committer returns, by whatever drives the dispatcher.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
