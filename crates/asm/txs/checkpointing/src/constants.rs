use strata_asm_common::SubprotocolId;

/// Subprotocol identifier assigned to checkpointing v0 transactions.
pub const CHECKPOINTING_V0_SUBPROTOCOL_ID: SubprotocolId = 1;

/// Transaction type identifier for OL STF checkpoints.
pub const OL_STF_CHECKPOINT_TX_TYPE: u8 = 1;
