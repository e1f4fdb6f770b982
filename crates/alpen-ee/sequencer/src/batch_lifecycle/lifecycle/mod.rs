mod da_complete;
mod da_pending;
mod proof_pending;
mod proof_ready;

pub(crate) use da_complete::try_advance_da_complete;
pub(crate) use da_pending::try_advance_da_pending;
pub(crate) use proof_pending::try_advance_proof_pending;
pub(crate) use proof_ready::try_advance_proof_ready;
