//! Bitcoin inscription parsing
//!
//! Handles parsing of Bitcoin inscription envelopes to extract checkpoint data.

use strata_asm_common::TxInputRef;
use strata_l1_txfmt::TxType;

use crate::error::*;

/// Parses inscription envelope from Bitcoin transaction to extract embedded data
///
/// TODO: Parse inscription envelope and extract the actual signed checkpoint data
/// This is a placeholder implementation that needs to be replaced with proper
/// Bitcoin inscription parsing logic.
///
/// # Arguments
/// * `tx` - The transaction input reference containing inscription data
///
/// # Returns
/// The extracted data from the inscription envelope or parsing error
pub(crate) fn parse_inscription_envelope(tx: &TxInputRef<'_>) -> Result<Vec<u8>> {
    // [PLACE_HOLDER]
    // TODO: Implement proper Bitcoin inscription parsing
    // This should:
    // 1. Parse the transaction witness stack
    // 2. Extract inscription envelope data
    // 3. Validate inscription format
    // 4. Return the embedded checkpoint data

    // For now, assume the data is in the first witness element
    // This is a placeholder implementation
    let witness_data = tx
        .tx()
        .input
        .first()
        .ok_or_else(|| CoreError::TxParsingError("no transaction inputs".to_string()))?
        .witness
        .to_vec();

    if witness_data.is_empty() {
        return Err(CoreError::TxParsingError("empty witness data".to_string()));
    }

    // Return the first witness element as placeholder
    Ok(witness_data[0].clone())
}

/// Validates inscription envelope format and structure
/// [PLACE_HOLDER]
/// TODO: Implement inscription envelope validation
/// This function should validate that the inscription follows the expected
/// format of the tx type.
///
/// # Arguments
/// * `envelope_data` - The raw inscription envelope data
/// * `tx_type` - The type of the transaction (checkpoint, forced inclusion, etc.)
///
/// # Returns
/// Result indicating if the envelope is valid
pub(crate) fn validate_inscription_envelope(envelope_data: &[u8], _tx_type: TxType) -> Result<()> {
    // TODO: Implement inscription envelope validation
    // This should validate:
    // 1. Inscription envelope structure
    // 2. Content type and format (sequence of byte based on tx type inscription standard)
    // 3. Data integrity checks (max size, etc.)

    if envelope_data.is_empty() {
        return Err(CoreError::MalformedSignedCheckpoint(
            "empty inscription envelope".to_string(),
        ));
    }

    // Placeholder validation
    Ok(())
}
