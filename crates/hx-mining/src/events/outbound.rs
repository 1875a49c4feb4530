//! Outbound event payloads

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Event: a customer posted a paid job
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobPostedEvent {
    pub job_id: String,
    pub customer: String,
    pub threshold: i64,
    /// Escrowed reward net of the posting fee, uhlx
    pub reward: Amount,
}

/// Event: posting fee burned out of supply
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeeBurnedEvent {
    pub job_id: String,
    pub amount: Amount,
}

/// Event: a verified proof earned shares
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofAcceptedEvent {
    pub job_id: String,
    pub miner: String,
    pub energy: i64,
    pub shares_earned: i64,
    pub proof_type: String,
}

/// Event: a miner claimed its cut of a job's rewards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardsClaimedEvent {
    pub job_id: String,
    pub claimer: String,
    /// Total paid to the miner (customer cut + emission cut), uhlx
    pub amount: Amount,
}

/// Event: escrowed emission released as part of a claim
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionRewardClaimedEvent {
    pub job_id: String,
    pub minutes_to_solve: i64,
    pub emission_reward: Amount,
    pub remaining_escrow: Amount,
}

/// Event: an unworked job was cancelled and refunded
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobCancelledEvent {
    pub job_id: String,
    pub customer: String,
    pub refund: Amount,
}

/// Event: a background job's threshold was met
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobCompletedEvent {
    pub job_id: String,
    pub solver: String,
    pub energy: i64,
    pub solve_time_secs: i64,
}

/// Event: the scheduler retired a background job past its deadline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobExpiredEvent {
    pub job_id: String,
}

/// Event: a docking campaign opened
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingJobCreatedEvent {
    pub job_id: String,
    pub target_hash: String,
    pub total_ligands: u64,
    pub is_background: bool,
}

/// Event: a miner leased a ligand range
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingJobClaimedEvent {
    pub job_id: String,
    pub miner: String,
    pub start_ligand: u64,
    pub end_ligand: u64,
}

/// Event: a ligand result was accepted
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingResultSubmittedEvent {
    pub job_id: String,
    pub ligand_id: String,
    pub miner: String,
    pub binding_score_milli: i64,
    pub reward: Amount,
    pub is_hit: bool,
}

/// Event: a docking epoch settled
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingEpochEndEvent {
    pub epoch: u64,
    pub total_shares: i64,
    pub emission_distributed: Amount,
}

/// Event: one miner's cut of an epoch settlement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockingRewardPaidEvent {
    pub miner: String,
    pub shares: i64,
    pub reward: Amount,
}

/// Event: a checkpoint was recorded
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointCreatedEvent {
    pub checkpoint_id: u64,
    pub height: u64,
    pub validator_rewards: Amount,
    pub emission_escrow: Amount,
}

/// Event: the synthetic problem size moved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAdjustedEvent {
    pub avg_solve_time: i64,
    pub old_size: u64,
    pub new_size: u64,
}

/// Event: the scheduler synthesized a background job
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyntheticJobGeneratedEvent {
    pub job_id: String,
    pub problem_size: u64,
    pub threshold: i64,
}

/// Event: a queued public submission went active
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicJobActivatedEvent {
    pub job_id: String,
    pub submitter: String,
}
