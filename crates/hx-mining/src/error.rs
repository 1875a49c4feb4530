//! Error types for the settlement subsystem

use shared_types::AddressError;
use thiserror::Error;

use crate::ports::bank::BankError;

/// Result type alias for settlement operations
pub type Result<T> = std::result::Result<T, MiningError>;

/// Errors surfaced by settlement actions.
///
/// Any error returned from an action handler means the transaction's
/// mutations were not applied; handlers do all fallible work before the
/// first store write.
#[derive(Debug, Error)]
pub enum MiningError {
    /// Job inputs rejected at the posting boundary
    #[error("Invalid job: {reason}")]
    InvalidJob { reason: String },

    /// No job under the given id
    #[error("Job not found: {job_id}")]
    JobNotFound { job_id: String },

    /// Job exists but is not accepting work
    #[error("Job not active: {job_id} (status {status})")]
    JobNotActive { job_id: String, status: String },

    /// Block height passed the job deadline
    #[error("Job expired: {job_id} (deadline height {deadline}, current {height})")]
    JobExpired {
        job_id: String,
        deadline: u64,
        height: u64,
    },

    /// Verifier examined the proof and rejected it
    #[error("Invalid proof for job {job_id}")]
    InvalidProof { job_id: String },

    /// Verifier could not be reached and policy is fail-closed
    #[error("Proof verification unavailable: {reason}")]
    ProofVerificationUnavailable { reason: String },

    /// Malformed miner address
    #[error("Invalid miner address: {0}")]
    InvalidMiner(AddressError),

    /// Claimant holds no shares on the job
    #[error("No shares to claim on job {job_id}")]
    NoShares { job_id: String },

    /// Cancellation blocked because competitive work was already accepted
    #[error("Cannot cancel job {job_id}: {total_shares} shares already earned")]
    CannotCancel { job_id: String, total_shares: i64 },

    /// Caller is not allowed to perform the action
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// No checkpoint under the given id
    #[error("Checkpoint not found: {id}")]
    CheckpointNotFound { id: u64 },

    /// Parameter set failed validation
    #[error("Invalid params: {reason}")]
    InvalidParams { reason: String },

    /// Every ligand in the docking job is already leased out
    #[error("All ligands assigned for job {job_id}")]
    AllLigandsAssigned { job_id: String },

    /// A result for this (job, ligand) pair was already recorded
    #[error("Result already submitted for ligand {ligand_id} of job {job_id}")]
    DuplicateResult { job_id: String, ligand_id: String },

    /// Bank ledger refused a token movement
    #[error("Bank error: {0}")]
    Bank(#[from] BankError),
}

impl MiningError {
    /// Whether the caller's inputs were at fault (as opposed to chain state).
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidJob { .. }
                | Self::InvalidProof { .. }
                | Self::InvalidMiner(_)
                | Self::Unauthorized { .. }
                | Self::InvalidParams { .. }
                | Self::DuplicateResult { .. }
        )
    }
}
