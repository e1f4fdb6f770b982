//! L2→L1 message processing
//!
//! Handles extraction and validation of messages from L2 to L1 (withdrawals, etc.).

use strata_asm_common::L2ToL1Msg;
use strata_checkpoint_types::Checkpoint;
use strata_msg_fmt::{MAX_TYPE, TypeId};

use crate::error::*;

/// Extracts L2→L1 messages from checkpoint's batch transition data
///
/// TODO: Parse the actual batch transition structure to extract withdrawal messages
/// This is a placeholder implementation that would need to be replaced with
/// proper parsing logic based on the actual BatchTransition structure
///
/// # Arguments
/// * `checkpoint` - The checkpoint containing L2→L1 message data
///
/// # Returns
/// Vector of extracted L2→L1 messages or error if parsing fails
pub(crate) fn extract_l2_to_l1_messages(checkpoint: &Checkpoint) -> Result<Vec<L2ToL1Msg>> {
    // [PLACE_HOLDER]
    // For now, return empty vector as we don't have access to the actual
    // withdrawal data structure in the batch transition

    // In a real implementation, this would:
    // 1. Parse the batch transition to find withdrawal operations
    // 2. Extract destination addresses, amounts, and data
    // 3. Validate withdrawal message format
    // 4. Return properly formatted L2ToL1Msg instances

    let _batch_transition = checkpoint.batch_transition();

    // TODO: Implement actual message extraction logic
    // For example:
    // let withdrawals = batch_transition.extract_withdrawals()?;
    // let messages = withdrawals.into_iter()
    //     .map(|w| create_withdrawal_message(w))
    //     .collect::<Result<Vec<_>, _>>()?;

    Ok(Vec::new())
}

/// Validates the structure and content of L2→L1 messages
///
/// This function performs validation on L2→L1 messages to ensure they
/// follow the expected format and contain valid data.
///
/// # Arguments
/// * `messages` - Vector of L2ToL1Msg to validate
///
/// # Returns
/// Result indicating validation success or specific error
pub(crate) fn validate_l2_to_l1_messages(messages: &[L2ToL1Msg]) -> Result<()> {
    for (idx, msg) in messages.iter().enumerate() {
        // Validate that the message type is within expected range
        let ty: TypeId = msg.ty();
        if ty > MAX_TYPE {
            return Err(CoreError::InvalidL2ToL1Msg {
                index: idx,
                reason: "valid message type".into(),
            });
        }

        // [PLACE_HOLDER] => Waiting for the design and spec of L2 → L1 messaging system.
        // TODO: Add message type-specific validation once message types are defined
        // For example:
        // - Type 0x01 might be withdrawal messages
        // - Type 0x02 might be upgrade messages
        // Each type would have its own validation logic

        // Basic validation that message body is not empty for certain types
        if msg.body().is_empty() && ty != 0 {
            return Err(CoreError::InvalidL2ToL1Msg {
                index: idx,
                reason: "required non-empty message body".into(),
            });
        }
    }

    Ok(())
}
