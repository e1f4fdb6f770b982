//! Account message types.

// Include SSZ type definitions from acct-ssz-types
// This brings in: MsgPayload, MsgPayloadData, SentMessage, ReceivedMessage
include!("../../acct-ssz-types/src/messages.rs");

// Business logic for SentMessage
impl SentMessage {
    pub fn new(dest: AccountId, payload: MsgPayload) -> Self {
        Self { dest, payload }
    }

    pub fn dest(&self) -> AccountId {
        self.dest
    }

    pub fn payload(&self) -> &MsgPayload {
        &self.payload
    }
}

// Business logic for ReceivedMessage
impl ReceivedMessage {
    pub fn new(source: AccountId, payload: MsgPayload) -> Self {
        Self { source, payload }
    }

    pub fn source(&self) -> AccountId {
        self.source
    }

    pub fn payload(&self) -> &MsgPayload {
        &self.payload
    }
}

// Business logic for MsgPayload
impl MsgPayload {
    pub fn new(value: BitcoinAmount, data: impl Into<MsgPayloadData>) -> Self {
        Self {
            value,
            data: data.into(),
        }
    }

    pub fn value(&self) -> BitcoinAmount {
        self.value
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
