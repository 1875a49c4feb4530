//! Action messages and responses
//!
//! Logical message contracts of the settlement subsystem; the host's
//! wire codec maps onto these. Addresses arrive as raw strings and are
//! validated by the handlers.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

use crate::domain::SearchBox;

/// Post a paid optimization job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostJob {
    pub customer: String,
    pub problem_type: String,
    pub problem_data: Vec<u8>,
    /// SHA-256 commitment over `problem_data`, hex.
    pub problem_hash: String,
    pub threshold: i64,
    /// Gross reward, uhlx; the posting fee comes out of this.
    pub reward: Amount,
    /// Job lifetime in blocks.
    pub duration_blocks: u64,
}

/// Submit a verified proof for an optimization job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitProof {
    pub miner: String,
    pub job_id: String,
    pub energy: i64,
    pub proof: Vec<u8>,
    pub proof_type: String,
    /// Commitment over the solution, hex.
    pub solution_hash: String,
}

/// Claim a miner's accumulated rewards on a job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimRewards {
    pub claimer: String,
    pub job_id: String,
}

/// Cancel an unworked job and refund its escrow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CancelJob {
    pub customer: String,
    pub job_id: String,
}

/// Queue an unpaid community problem for background execution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitPublicJob {
    pub submitter: String,
    pub problem_type: String,
    pub problem_data: Vec<u8>,
    /// SHA-256 commitment over `problem_data`, hex.
    pub problem_hash: String,
    pub threshold: i64,
}

/// Open a molecular-docking campaign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateDockingJob {
    pub creator: String,
    /// Commitment over the target structure, hex.
    pub target_hash: String,
    pub protein_pdb: String,
    pub total_ligands: u64,
    /// Binding-site center, milli-angstroms.
    pub center_x_milli: i64,
    pub center_y_milli: i64,
    pub center_z_milli: i64,
    /// Escrowed reward for paid campaigns, uhlx. Ignored for background.
    pub reward: Amount,
    pub is_background: bool,
}

/// Lease a batch of ligands to dock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimDockingJob {
    pub miner: String,
    /// Specific campaign, or `None` for the active background campaign.
    pub job_id: Option<String>,
    /// Ligands requested; zero falls back to the default batch.
    pub batch_size: u64,
}

/// Response to [`ClaimDockingJob`]: the leased range plus everything a
/// miner needs to run the docking locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingAssignment {
    pub job_id: String,
    pub target_hash: String,
    pub protein_pdb: String,
    pub start_ligand: u64,
    pub end_ligand: u64,
    pub search_box: SearchBox,
}

/// Report one docked ligand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitDockingResult {
    pub miner: String,
    pub job_id: String,
    pub ligand_id: String,
    pub ligand_smiles: String,
    /// Binding affinity, milli-kcal/mol.
    pub binding_score_milli: i64,
    pub rotatable_bonds: i32,
}

/// Response to [`SubmitDockingResult`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockingResultAck {
    pub accepted: bool,
    pub reward: Amount,
    pub is_hit: bool,
}

/// Default ligand batch when a claim does not name one.
pub const DEFAULT_DOCKING_BATCH: u64 = 100;
