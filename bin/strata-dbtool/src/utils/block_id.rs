//! Utilities for parsing and validating block IDs

use hex::FromHex;
use strata_cli_common::errors::{DisplayableError, DisplayedError};
use strata_primitives::{buf::Buf32, l1::L1BlockId, l2::L2BlockId};

/// Length of a hex-encoded block ID (32 bytes = 64 hex characters)
const HEX_BLOCK_ID_LENGTH: usize = 64;

/// Error message for invalid block ID format
const INVALID_BLOCK_ID_MSG: &str = "Block-id must be 32-byte / 64-char hex";

/// Parses a hex string into a 32-byte array
///
/// Accepts hex strings with or without "0x" prefix
/// Returns error if the hex string is not exactly 64 characters or contains invalid hex
pub(crate) fn parse_block_id_hex(hex_input: &str) -> Result<[u8; 32], DisplayedError> {
    let hex_str = hex_input.strip_prefix("0x").unwrap_or(hex_input);

    if hex_str.len() != HEX_BLOCK_ID_LENGTH {
        return Err(DisplayedError::UserError(
            INVALID_BLOCK_ID_MSG.into(),
            Box::new(hex_input.to_owned()),
        ));
    }

    <[u8; 32]>::from_hex(hex_str).user_error(format!("Invalid 32-byte hex {hex_str}"))
}

/// Parses a hex string into an L2BlockId
///
/// # Arguments
/// * `hex_input` - Hex string with or without "0x" prefix
///
/// # Returns
/// * `Ok(L2BlockId)` - Successfully parsed block ID
/// * `Err(DisplayedError)` - Invalid hex format or length
///
/// # Examples
/// ```
/// let block_id = parse_l2_block_id("0x1234567890abcdef...")?;
/// let block_id = parse_l2_block_id("1234567890abcdef...")?;
/// ```
pub(crate) fn parse_l2_block_id(hex_input: &str) -> Result<L2BlockId, DisplayedError> {
    let bytes = parse_block_id_hex(hex_input)?;
    Ok(L2BlockId::from(Buf32::from(bytes)))
}

/// Parses a hex string into an L1BlockId
///
/// # Arguments
/// * `hex_input` - Hex string with or without "0x" prefix
///
/// # Returns
/// * `Ok(L1BlockId)` - Successfully parsed block ID
/// * `Err(DisplayedError)` - Invalid hex format or length
///
/// # Examples
/// ```
/// let block_id = parse_l1_block_id("0x1234567890abcdef...")?;
/// let block_id = parse_l1_block_id("1234567890abcdef...")?;
/// ```
pub(crate) fn parse_l1_block_id(hex_input: &str) -> Result<L1BlockId, DisplayedError> {
    let bytes = parse_block_id_hex(hex_input)?;
    Ok(L1BlockId::from(Buf32::from(bytes)))
}
