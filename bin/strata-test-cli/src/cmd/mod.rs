pub mod args;
pub mod convert_to_xonly_pk;
pub mod create_deposit_tx;
pub mod create_withdrawal_fulfillment;
pub mod extract_p2tr_pubkey;
pub mod get_address;
pub mod musig_aggregate_pks;
pub mod sign_schnorr_sig;
pub mod xonlypk_to_descriptor;

pub use args::{Commands, TopLevel};
