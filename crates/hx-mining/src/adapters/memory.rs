//! In-memory implementation of the settlement stores
//!
//! Ordered maps throughout: iteration order is part of the consensus
//! contract, so `BTreeMap` stands in for the KV store's sorted key space.

use std::collections::BTreeMap;

use shared_types::{Address, Amount};

use crate::domain::{Checkpoint, DockingClaim, DockingJob, DockingResult, Job};
use crate::domain::problems::MIN_PROBLEM_SIZE;
use crate::ports::stores::{
    CheckpointStore, DockingClaimStore, DockingJobStore, DockingResultStore, DockingRewardStore,
    EmissionStore, EpochShareStore, JobStore, RewardPoolStore, SchedulerStore, ShareStore,
};

/// Whole module state in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryState {
    jobs: BTreeMap<String, Job>,
    job_seq: u64,
    shares: BTreeMap<(Address, String), i64>,
    docking_jobs: BTreeMap<String, DockingJob>,
    docking_seq: u64,
    active_docking_job: Option<String>,
    docking_results: BTreeMap<(String, String), DockingResult>,
    docking_claims: BTreeMap<(String, String), DockingClaim>,
    docking_rewards: BTreeMap<Address, Amount>,
    epoch_number: Option<u64>,
    epoch_start_minute: Option<i64>,
    epoch_total_shares: i64,
    epoch_shares: BTreeMap<Address, i64>,
    checkpoints: BTreeMap<u64, Checkpoint>,
    last_checkpoint_id: u64,
    emission_escrow: Amount,
    last_emission_minute: Option<i64>,
    genesis_minute: Option<i64>,
    validator_reward_pool: Amount,
    current_job_id: Option<String>,
    background_job_count: u64,
    problem_size: Option<u64>,
    solve_times: Vec<i64>,
    public_queue: Vec<String>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobStore for InMemoryState {
    fn job(&self, id: &str) -> Option<Job> {
        self.jobs.get(id).cloned()
    }

    fn put_job(&mut self, job: Job) {
        self.jobs.insert(job.id.clone(), job);
    }

    fn jobs(&self) -> Vec<Job> {
        self.jobs.values().cloned().collect()
    }

    fn next_job_seq(&mut self) -> u64 {
        self.job_seq += 1;
        self.job_seq
    }
}

impl ShareStore for InMemoryState {
    fn shares(&self, miner: &Address, job_id: &str) -> i64 {
        self.shares
            .get(&(miner.clone(), job_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn set_shares(&mut self, miner: &Address, job_id: &str, shares: i64) {
        self.shares.insert((miner.clone(), job_id.to_string()), shares);
    }
}

impl DockingJobStore for InMemoryState {
    fn docking_job(&self, id: &str) -> Option<DockingJob> {
        self.docking_jobs.get(id).cloned()
    }

    fn put_docking_job(&mut self, job: DockingJob) {
        self.docking_jobs.insert(job.id.clone(), job);
    }

    fn docking_jobs(&self) -> Vec<DockingJob> {
        self.docking_jobs.values().cloned().collect()
    }

    fn active_docking_job_id(&self) -> Option<String> {
        self.active_docking_job.clone()
    }

    fn set_active_docking_job_id(&mut self, id: Option<String>) {
        self.active_docking_job = id;
    }

    fn next_docking_seq(&mut self) -> u64 {
        self.docking_seq += 1;
        self.docking_seq
    }
}

impl DockingResultStore for InMemoryState {
    fn docking_result(&self, job_id: &str, ligand_id: &str) -> Option<DockingResult> {
        self.docking_results
            .get(&(job_id.to_string(), ligand_id.to_string()))
            .cloned()
    }

    fn put_docking_result(&mut self, result: DockingResult) {
        self.docking_results
            .insert((result.job_id.clone(), result.ligand_id.clone()), result);
    }
}

impl DockingClaimStore for InMemoryState {
    fn docking_claim(&self, miner: &Address, job_id: &str) -> Option<DockingClaim> {
        self.docking_claims
            .get(&(miner.as_str().to_string(), job_id.to_string()))
            .cloned()
    }

    fn put_docking_claim(&mut self, claim: DockingClaim) {
        self.docking_claims
            .insert((claim.miner.clone(), claim.job_id.clone()), claim);
    }
}

impl DockingRewardStore for InMemoryState {
    fn miner_docking_rewards(&self, miner: &Address) -> Amount {
        self.docking_rewards.get(miner).copied().unwrap_or(0)
    }

    fn add_miner_docking_rewards(&mut self, miner: &Address, amount: Amount) {
        *self.docking_rewards.entry(miner.clone()).or_insert(0) += amount;
    }
}

impl EpochShareStore for InMemoryState {
    fn epoch_number(&self) -> u64 {
        self.epoch_number.unwrap_or(1)
    }

    fn set_epoch_number(&mut self, epoch: u64) {
        self.epoch_number = Some(epoch);
    }

    fn epoch_start_minute(&self) -> Option<i64> {
        self.epoch_start_minute
    }

    fn set_epoch_start_minute(&mut self, minute: i64) {
        self.epoch_start_minute = Some(minute);
    }

    fn epoch_total_shares(&self) -> i64 {
        self.epoch_total_shares
    }

    fn set_epoch_total_shares(&mut self, shares: i64) {
        self.epoch_total_shares = shares;
    }

    fn miner_epoch_shares(&self, miner: &Address) -> i64 {
        self.epoch_shares.get(miner).copied().unwrap_or(0)
    }

    fn set_miner_epoch_shares(&mut self, miner: &Address, shares: i64) {
        self.epoch_shares.insert(miner.clone(), shares);
    }

    fn miner_epoch_share_entries(&self) -> Vec<(Address, i64)> {
        self.epoch_shares
            .iter()
            .map(|(addr, shares)| (addr.clone(), *shares))
            .collect()
    }

    fn clear_miner_epoch_shares(&mut self) {
        self.epoch_shares.clear();
    }
}

impl CheckpointStore for InMemoryState {
    fn checkpoint(&self, id: u64) -> Option<Checkpoint> {
        self.checkpoints.get(&id).cloned()
    }

    fn put_checkpoint(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.insert(checkpoint.id, checkpoint);
    }

    fn last_checkpoint_id(&self) -> u64 {
        self.last_checkpoint_id
    }

    fn set_last_checkpoint_id(&mut self, id: u64) {
        self.last_checkpoint_id = id;
    }
}

impl EmissionStore for InMemoryState {
    fn emission_escrow(&self) -> Amount {
        self.emission_escrow
    }

    fn set_emission_escrow(&mut self, amount: Amount) {
        self.emission_escrow = amount;
    }

    fn last_emission_minute(&self) -> Option<i64> {
        self.last_emission_minute
    }

    fn set_last_emission_minute(&mut self, minute: i64) {
        self.last_emission_minute = Some(minute);
    }

    fn genesis_minute(&self) -> Option<i64> {
        self.genesis_minute
    }

    fn set_genesis_minute(&mut self, minute: i64) {
        self.genesis_minute = Some(minute);
    }
}

impl RewardPoolStore for InMemoryState {
    fn validator_reward_pool(&self) -> Amount {
        self.validator_reward_pool
    }

    fn set_validator_reward_pool(&mut self, amount: Amount) {
        self.validator_reward_pool = amount;
    }
}

impl SchedulerStore for InMemoryState {
    fn current_job_id(&self) -> Option<String> {
        self.current_job_id.clone()
    }

    fn set_current_job_id(&mut self, id: Option<String>) {
        self.current_job_id = id;
    }

    fn background_job_count(&self) -> u64 {
        self.background_job_count
    }

    fn set_background_job_count(&mut self, count: u64) {
        self.background_job_count = count;
    }

    fn problem_size(&self) -> u64 {
        self.problem_size.unwrap_or(MIN_PROBLEM_SIZE)
    }

    fn set_problem_size(&mut self, size: u64) {
        self.problem_size = Some(size);
    }

    fn solve_time_history(&self) -> Vec<i64> {
        self.solve_times.clone()
    }

    fn set_solve_time_history(&mut self, history: Vec<i64>) {
        self.solve_times = history;
    }

    fn public_job_queue(&self) -> Vec<String> {
        self.public_queue.clone()
    }

    fn set_public_job_queue(&mut self, queue: Vec<String>) {
        self.public_queue = queue;
    }
}
