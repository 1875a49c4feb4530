//! # Settlement Entities
//!
//! Work orders and the records derived from them. All of this state is
//! consensus-critical: fields are integers (milli-units where the source
//! data is fractional) and every entity is owned exclusively by its store.
//!
//! Miners and customers appear as address strings only; they are parsed
//! into [`shared_types::Address`] at the action boundary.

use serde::{Deserialize, Serialize};
use shared_types::Amount;
use std::fmt;

use crate::config::Params;

/// Customer string recorded on network-generated background jobs.
/// Not a spendable account; background jobs carry no escrow.
pub const BACKGROUND_JOB_CUSTOMER: &str = "helix_network";

/// Lifecycle state of an optimization job.
///
/// `Active` is the only state that accepts proofs. Terminal states
/// (`Completed`, `Expired`, `Cancelled`) are sticky: no transition ever
/// leaves them. `Queued` is the pre-active holding state for public
/// background submissions waiting on the scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Active,
    Completed,
    Expired,
    Cancelled,
}

impl JobStatus {
    /// Whether the job will never mutate again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Expired | Self::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A unit of paid or unpaid optimization work.
///
/// Never physically deleted; terminal status preserves the audit trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// `job_{height}_{seq}` for posted jobs, `sys_{height}_{hash8}` for
    /// synthetic background jobs.
    pub id: String,
    /// Posting account, or [`BACKGROUND_JOB_CUSTOMER`].
    pub customer: String,
    /// Problem family, e.g. `ising_synthetic`, `protein_folding`.
    pub problem_type: String,
    /// Opaque problem payload.
    pub problem_data: Vec<u8>,
    /// SHA-256 commitment over the problem payload, hex.
    pub problem_hash: String,
    /// Energy a solution must reach for the job to count as solved.
    pub threshold: i64,
    /// Escrowed reward net of the posting fee, uhlx. Immutable after
    /// escrow except through cancellation refund.
    pub reward: Amount,
    pub status: JobStatus,
    /// Best (lowest) energy any accepted submission has claimed.
    pub best_energy: i64,
    /// Address of the miner holding `best_energy`, empty before the
    /// bootstrap proof.
    pub best_solver: String,
    /// Sum of every share award ever attributed to this job.
    pub total_shares: i64,
    /// Height the job became active at.
    pub created_height: u64,
    /// Block time the job became active at, unix seconds. Drives the
    /// time-based emission reward; heights drive the deadline.
    pub created_time: i64,
    /// Height after which submissions are rejected.
    pub deadline_height: u64,
    /// Network-generated work (no customer escrow, scheduler-managed).
    pub is_background: bool,
}

impl Job {
    /// Lazy expiry check: the stored status stays untouched, callers
    /// decide what an expired-but-`Active` job means for them.
    pub fn is_past_deadline(&self, height: u64) -> bool {
        height > self.deadline_height
    }
}

/// Lifecycle state of a docking campaign.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockingStatus {
    Active,
    Completed,
    Expired,
}

impl fmt::Display for DockingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// Ligand search box, axis-aligned, in milli-angstroms.
///
/// Fixed-point so identical geometry serializes identically on every
/// platform. `30.0 Å` is stored as `30_000`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBox {
    pub center_x_milli: i64,
    pub center_y_milli: i64,
    pub center_z_milli: i64,
    pub size_x_milli: i64,
    pub size_y_milli: i64,
    pub size_z_milli: i64,
}

/// Default cubic search box edge: 30 Å.
pub const DEFAULT_BOX_SIZE_MILLI: i64 = 30_000;

impl SearchBox {
    /// Default-sized box around a binding-site center.
    pub fn centered(x_milli: i64, y_milli: i64, z_milli: i64) -> Self {
        Self {
            center_x_milli: x_milli,
            center_y_milli: y_milli,
            center_z_milli: z_milli,
            size_x_milli: DEFAULT_BOX_SIZE_MILLI,
            size_y_milli: DEFAULT_BOX_SIZE_MILLI,
            size_z_milli: DEFAULT_BOX_SIZE_MILLI,
        }
    }
}

/// A molecular-docking campaign over a ligand library.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingJob {
    /// `dock_{height}_{seq}`.
    pub id: String,
    /// UniProt id of the target, when known.
    pub protein_id: String,
    /// Commitment over the target structure, hex.
    pub target_hash: String,
    /// PDB text of the target structure.
    pub protein_pdb: String,
    /// Library size. `docked_count` can never exceed it.
    pub total_ligands: u64,
    /// Results accepted so far. Status flips to `Completed` exactly when
    /// this reaches `total_ligands`.
    pub docked_count: u64,
    /// Results whose binding score cleared the hit threshold.
    pub hit_count: u64,
    pub search_box: SearchBox,
    pub is_background: bool,
    pub status: DockingStatus,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds.
    pub deadline: i64,
    /// Customer escrow for paid campaigns, uhlx. Zero for background.
    pub reward_pool: Amount,
    /// Next unclaimed ligand index; leases only ever advance it, which
    /// is what makes claims non-overlapping by construction.
    pub next_ligand_idx: u64,
    /// Data license of the target structure, e.g. `CC-BY-4.0`.
    pub license: String,
}

/// One accepted ligand docking result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingResult {
    /// `{job_id}_{ligand_id}`.
    pub id: String,
    pub job_id: String,
    pub ligand_id: String,
    pub ligand_smiles: String,
    /// Binding affinity in milli-kcal/mol; `-7.0` arrives as `-7_000`.
    pub binding_score_milli: i64,
    pub rotatable_bonds: i32,
    pub miner: String,
    /// Complexity-weighted reward credited for this ligand, uhlx.
    pub reward: Amount,
    pub is_hit: bool,
    pub block_height: u64,
    /// Unix seconds.
    pub submitted_at: i64,
}

/// A miner's exclusive lease over the ligand range `[start, end)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingClaim {
    pub miner: String,
    pub job_id: String,
    pub start_ligand: u64,
    pub end_ligand: u64,
    /// Unix seconds.
    pub claimed_at: i64,
}

/// Immutable snapshot of aggregate counters over a block range.
///
/// Ids form a contiguous sequence from 1; `start_height` of checkpoint
/// n+1 is always `end_height` of checkpoint n plus one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: u64,
    pub start_height: u64,
    pub end_height: u64,
    /// Validator reward pool at the checkpoint height, uhlx.
    pub validator_rewards: Amount,
    /// Emission escrow at the checkpoint height, uhlx.
    pub emission_escrow: Amount,
    /// Unix seconds.
    pub timestamp: i64,
}

/// Serializable image of the module's full state for chain genesis and
/// state export.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Option<Params>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub docking_jobs: Vec<DockingJob>,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    pub last_checkpoint_id: u64,
    #[serde(default)]
    pub validator_reward_pool: Amount,
    #[serde(default)]
    pub emission_escrow: Amount,
    #[serde(default)]
    pub current_problem_size: u64,
    #[serde(default)]
    pub background_job_count: u64,
}
