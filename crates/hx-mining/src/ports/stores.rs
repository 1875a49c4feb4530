//! # Typed Repositories
//!
//! One repository trait per entity type, each with typed get/put/iterate
//! operations. This replaces the raw byte-prefixed keys of a singleton
//! KV namespace: no prefix concatenation, no key-collision risk, and the
//! full shape of persisted state is readable from this one file.
//!
//! ## Contract
//!
//! - Execution is strictly serial (one transaction at a time), so methods
//!   take `&mut self` and implementations need no interior locking.
//! - Every `iterate`-style method MUST return entries in a deterministic
//!   order (ascending by key); replays depend on it.
//! - Stores hold state only. No business logic, no validation.

use shared_types::{Address, Amount};

use crate::domain::{Checkpoint, DockingClaim, DockingJob, DockingResult, Job};

/// Optimization job records, keyed by job id.
pub trait JobStore {
    fn job(&self, id: &str) -> Option<Job>;
    fn put_job(&mut self, job: Job);
    /// All jobs, ascending by id.
    fn jobs(&self) -> Vec<Job>;
    /// Next value of the module-wide job sequence (starts at 1).
    fn next_job_seq(&mut self) -> u64;
}

/// Per-miner, per-job competition share balances.
pub trait ShareStore {
    fn shares(&self, miner: &Address, job_id: &str) -> i64;
    fn set_shares(&mut self, miner: &Address, job_id: &str, shares: i64);
}

/// Docking campaign records plus the active-background-job pointer.
pub trait DockingJobStore {
    fn docking_job(&self, id: &str) -> Option<DockingJob>;
    fn put_docking_job(&mut self, job: DockingJob);
    /// All docking jobs, ascending by id.
    fn docking_jobs(&self) -> Vec<DockingJob>;
    fn active_docking_job_id(&self) -> Option<String>;
    fn set_active_docking_job_id(&mut self, id: Option<String>);
    /// Next value of the docking job sequence (starts at 1).
    fn next_docking_seq(&mut self) -> u64;
}

/// Accepted ligand results, keyed by (job id, ligand id).
pub trait DockingResultStore {
    fn docking_result(&self, job_id: &str, ligand_id: &str) -> Option<DockingResult>;
    fn put_docking_result(&mut self, result: DockingResult);
}

/// Ligand-range leases, keyed by (miner, job id). A newer claim by the
/// same miner on the same job replaces the older record.
pub trait DockingClaimStore {
    fn docking_claim(&self, miner: &Address, job_id: &str) -> Option<DockingClaim>;
    fn put_docking_claim(&mut self, claim: DockingClaim);
}

/// Lifetime per-miner docking reward counters.
pub trait DockingRewardStore {
    fn miner_docking_rewards(&self, miner: &Address) -> Amount;
    fn add_miner_docking_rewards(&mut self, miner: &Address, amount: Amount);
}

/// Rolling-epoch share accumulators for the docking distributor.
///
/// Everything here resets at every epoch rollover except the epoch
/// number and start minute.
pub trait EpochShareStore {
    /// Current epoch number; 1 before the first rollover.
    fn epoch_number(&self) -> u64;
    fn set_epoch_number(&mut self, epoch: u64);
    /// Minute the current epoch started at; `None` until first touched.
    fn epoch_start_minute(&self) -> Option<i64>;
    fn set_epoch_start_minute(&mut self, minute: i64);
    fn epoch_total_shares(&self) -> i64;
    fn set_epoch_total_shares(&mut self, shares: i64);
    fn miner_epoch_shares(&self, miner: &Address) -> i64;
    fn set_miner_epoch_shares(&mut self, miner: &Address, shares: i64);
    /// Per-miner accumulators, ascending by address.
    fn miner_epoch_share_entries(&self) -> Vec<(Address, i64)>;
    fn clear_miner_epoch_shares(&mut self);
}

/// Checkpoint chain, keyed by checkpoint id.
pub trait CheckpointStore {
    fn checkpoint(&self, id: u64) -> Option<Checkpoint>;
    fn put_checkpoint(&mut self, checkpoint: Checkpoint);
    /// Highest assigned checkpoint id; 0 before the first checkpoint.
    fn last_checkpoint_id(&self) -> u64;
    fn set_last_checkpoint_id(&mut self, id: u64);
}

/// Emission scheduler scalars.
pub trait EmissionStore {
    fn emission_escrow(&self) -> Amount;
    fn set_emission_escrow(&mut self, amount: Amount);
    /// Minute of the last accrual tick; `None` before the first tick.
    fn last_emission_minute(&self) -> Option<i64>;
    fn set_last_emission_minute(&mut self, minute: i64);
    /// Genesis anchor minute; `None` until first captured.
    fn genesis_minute(&self) -> Option<i64>;
    fn set_genesis_minute(&mut self, minute: i64);
}

/// Validator-side reward accumulator awaiting a distribution mechanism.
pub trait RewardPoolStore {
    fn validator_reward_pool(&self) -> Amount;
    fn set_validator_reward_pool(&mut self, amount: Amount);
}

/// Background-job scheduler bookkeeping.
pub trait SchedulerStore {
    /// Id of the background job currently posed to the network.
    fn current_job_id(&self) -> Option<String>;
    fn set_current_job_id(&mut self, id: Option<String>);
    fn background_job_count(&self) -> u64;
    fn set_background_job_count(&mut self, count: u64);
    /// Current synthetic lattice edge.
    fn problem_size(&self) -> u64;
    fn set_problem_size(&mut self, size: u64);
    /// Rolling solve-time window, oldest first.
    fn solve_time_history(&self) -> Vec<i64>;
    fn set_solve_time_history(&mut self, history: Vec<i64>);
    /// Queued public background jobs, FIFO order.
    fn public_job_queue(&self) -> Vec<String>;
    fn set_public_job_queue(&mut self, queue: Vec<String>);
}

/// Everything the settlement service needs from persistence, as one bound.
pub trait SettlementStore:
    JobStore
    + ShareStore
    + DockingJobStore
    + DockingResultStore
    + DockingClaimStore
    + DockingRewardStore
    + EpochShareStore
    + CheckpointStore
    + EmissionStore
    + RewardPoolStore
    + SchedulerStore
{
}

impl<T> SettlementStore for T where
    T: JobStore
        + ShareStore
        + DockingJobStore
        + DockingResultStore
        + DockingClaimStore
        + DockingRewardStore
        + EpochShareStore
        + CheckpointStore
        + EmissionStore
        + RewardPoolStore
        + SchedulerStore
{
}
