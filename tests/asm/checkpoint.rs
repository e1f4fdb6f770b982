//! Checkpoint subprotocol integration tests
//!
//! Tests the checkpoint subprotocol's ability to process checkpoint transactions.
//!
//! For admin→checkpoint interaction tests, see `admin_to_checkpoint.rs`.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

// TODO: Add checkpoint-specific tests here
// - Checkpoint submission and verification
// - Batch processing
// - Proof verification
