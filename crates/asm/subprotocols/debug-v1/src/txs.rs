//! Transaction parsing and handling for the debug subprotocol.
//!
//! This module implements parsing for debug transaction types that allow
//! injection of test data into the ASM for testing purposes.

use borsh::BorshDeserialize;
use strata_asm_common::TxInputRef;
use strata_asm_logs::AsmLogType;
use strata_asm_proto_bridge_v1::WithdrawOutput;
use strata_l1_txfmt::TxType;
use strata_primitives::{bitcoin_bosd::Descriptor, l1::BitcoinAmount};
use thiserror::Error;

use crate::constants::{
    AMOUNT_OFFSET, AMOUNT_SIZE, DESCRIPTOR_OFFSET, FAKE_ASM_LOG_TX_TYPE,
    FAKE_WITHDRAW_INTENT_TX_TYPE, MIN_ASM_LOG_AUX_DATA_LEN, MIN_FAKEWITHDRAW_AUX_DATA_LEN,
};

/// Errors that can occur during debug transaction parsing.
#[derive(Debug, Error)]
pub(crate) enum DebugTxParseError {
    /// The transaction type is not supported by the debug subprotocol.
    #[error("unsupported transaction type: {0}")]
    UnsupportedTxType(TxType),

    /// The auxiliary data is too short for the expected format.
    #[error("auxiliary data too short: expected at least {expected} bytes, got {actual} bytes")]
    AuxDataTooShort { expected: usize, actual: usize },

    /// Invalid descriptor format.
    #[error("invalid descriptor format: {0}")]
    InvalidDescriptorFormat(String),

    /// Failed to deserialize ASM log type.
    #[error("failed to deserialize ASM log type: {0}")]
    AsmLogDeserializationError(#[from] borsh::io::Error),
}

/// Type alias for fake ASM log injection info.
pub(crate) type FakeAsmLogInfo = AsmLogType;

/// Type alias for fake withdrawal info.
pub(crate) type FakeWithdrawInfo = WithdrawOutput;

/// Parsed debug transaction types.
pub(crate) enum ParsedDebugTx {
    /// ASM log injection transaction.
    FakeAsmLog(FakeAsmLogInfo),

    /// Fake withdrawal creation transaction.
    FakeWithdrawIntent(FakeWithdrawInfo),
}

/// Parses a debug transaction from the given transaction input.
///
/// This function examines the transaction type and delegates to the appropriate
/// parsing function based on the type.
pub(crate) fn parse_debug_tx(tx: &TxInputRef<'_>) -> Result<ParsedDebugTx, DebugTxParseError> {
    match tx.tag().tx_type() {
        FAKE_ASM_LOG_TX_TYPE => parse_fake_asm_log_tx(tx),
        FAKE_WITHDRAW_INTENT_TX_TYPE => parse_fake_withdraw_intent_tx(tx),
        tx_type => Err(DebugTxParseError::UnsupportedTxType(tx_type)),
    }
}

/// Parses ASM log data from auxiliary data bytes.
fn parse_asm_log_from_aux_data(aux_data: &[u8]) -> Result<AsmLogType, DebugTxParseError> {
    if aux_data.len() < MIN_ASM_LOG_AUX_DATA_LEN {
        return Err(DebugTxParseError::AuxDataTooShort {
            expected: MIN_ASM_LOG_AUX_DATA_LEN,
            actual: aux_data.len(),
        });
    }

    // Deserialize the AsmLogType from auxiliary data
    let asm_log_type = AsmLogType::try_from_slice(aux_data)?;
    Ok(asm_log_type)
}

/// Parses an ASM log injection transaction.
///
/// Auxiliary data format:
/// - `[serialized AsmLogType]` - serialized AsmLogType
fn parse_fake_asm_log_tx(tx: &TxInputRef<'_>) -> Result<ParsedDebugTx, DebugTxParseError> {
    let aux_data = tx.tag().aux_data();
    let asm_log_type = parse_asm_log_from_aux_data(aux_data)?;
    Ok(ParsedDebugTx::FakeAsmLog(asm_log_type))
}

/// Parses withdrawal data from auxiliary data bytes.
fn parse_withdrawal_from_aux_data(aux_data: &[u8]) -> Result<WithdrawOutput, DebugTxParseError> {
    if aux_data.len() < MIN_FAKEWITHDRAW_AUX_DATA_LEN {
        return Err(DebugTxParseError::AuxDataTooShort {
            expected: MIN_FAKEWITHDRAW_AUX_DATA_LEN,
            actual: aux_data.len(),
        });
    }

    // Extract amount using constants
    let amount_end = AMOUNT_OFFSET + AMOUNT_SIZE;
    let amount_bytes: [u8; AMOUNT_SIZE] = aux_data[AMOUNT_OFFSET..amount_end].try_into().unwrap();
    let amount = u64::from_be_bytes(amount_bytes);
    let amt = BitcoinAmount::from_sat(amount);

    // Extract descriptor (self-describing, no length field needed)
    let desc_bytes = &aux_data[DESCRIPTOR_OFFSET..];
    let dest = Descriptor::from_bytes(desc_bytes)
        .map_err(|e| DebugTxParseError::InvalidDescriptorFormat(e.to_string()))?;

    let withdraw_output = WithdrawOutput::new(dest, amt);
    Ok(withdraw_output)
}

/// Parses a fake withdrawal transaction.
///
/// Auxiliary data format:
/// - `[amount: 8 bytes]` - The withdrawal amount in satoshis
/// - `[descriptor: variable]` - The self-describing Bitcoin descriptor
fn parse_fake_withdraw_intent_tx(tx: &TxInputRef<'_>) -> Result<ParsedDebugTx, DebugTxParseError> {
    let aux_data = tx.tag().aux_data();
    let withdraw_output = parse_withdrawal_from_aux_data(aux_data)?;
    Ok(ParsedDebugTx::FakeWithdrawIntent(withdraw_output))
}
