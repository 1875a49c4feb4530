//! # Settlement Service
//!
//! `MiningService` is the one writer of settlement state. The host
//! runtime routes each transaction's action here, then calls
//! [`MiningService::begin_block`] / [`MiningService::end_block`] around
//! every block.
//!
//! ## Transactional discipline
//!
//! The host gives no free rollback, so every handler follows the same
//! shape: parse and validate, move tokens (the only fallible effects),
//! then write stores and emit events, none of which can fail. An error
//! therefore always leaves state exactly as it was. Best-effort side
//! operations (posting-fee burn, per-miner rollover payouts) are the
//! documented exception: they log and continue.

mod background;
mod checkpoint;
mod docking;
mod emission;
mod epochs;
mod genesis;
mod jobs;
mod msgs;

pub use msgs::*;

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, BlockCtx};
use tracing::debug;

use crate::config::Params;
use crate::domain::{emission_rate, emission_stage_number, Checkpoint, DockingClaim, DockingJob, Job};
use crate::error::{MiningError, Result};
use crate::events::Event;
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::ProofVerifier;

/// Snapshot of the emission scheduler, for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionStatus {
    pub escrow: Amount,
    pub rate_per_minute: Amount,
    pub stage: u8,
    pub minutes_since_genesis: i64,
}

/// Snapshot of the docking epoch distributor, for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochStatus {
    pub epoch_number: u64,
    pub start_minute: Option<i64>,
    pub total_shares: i64,
    pub participant_count: usize,
}

/// The settlement subsystem's single entry point.
///
/// Generic over its three capabilities so the same logic runs against
/// the host chain in production and the in-memory adapters in tests.
pub struct MiningService<S, B, V> {
    state: S,
    bank: B,
    verifier: V,
    params: Params,
    events: Vec<Event>,
}

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    pub fn new(state: S, bank: B, verifier: V, params: Params) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            state,
            bank,
            verifier,
            params,
            events: Vec::new(),
        })
    }

    /// Per-block pre-processing: emission accrual, background scheduling.
    pub fn begin_block(&mut self, ctx: BlockCtx) {
        self.process_emissions(ctx);
        self.ensure_background_job(ctx);
    }

    /// Per-block post-processing: epoch rollover, checkpointing.
    pub fn end_block(&mut self, ctx: BlockCtx) {
        self.process_docking_epoch(ctx);
        self.maybe_create_checkpoint(ctx);
    }

    // === Parameters ===

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Replace the parameter set (governance path).
    pub fn set_params(&mut self, params: Params) -> Result<()> {
        params.validate()?;
        debug!(target: "hx-mining", "params updated");
        self.params = params;
        Ok(())
    }

    // === Events ===

    /// Hand the accumulated events to the host and clear the buffer.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    // === Queries (read-only) ===

    pub fn job(&self, job_id: &str) -> Result<Job> {
        self.state.job(job_id).ok_or_else(|| MiningError::JobNotFound {
            job_id: job_id.to_string(),
        })
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state.jobs()
    }

    pub fn docking_job(&self, job_id: &str) -> Result<DockingJob> {
        self.state
            .docking_job(job_id)
            .ok_or_else(|| MiningError::JobNotFound {
                job_id: job_id.to_string(),
            })
    }

    pub fn shares_of(&self, miner: &str, job_id: &str) -> Result<i64> {
        let miner = Address::parse(miner).map_err(MiningError::InvalidMiner)?;
        Ok(self.state.shares(&miner, job_id))
    }

    pub fn docking_claim(&self, miner: &str, job_id: &str) -> Result<Option<DockingClaim>> {
        let miner = Address::parse(miner).map_err(MiningError::InvalidMiner)?;
        Ok(self.state.docking_claim(&miner, job_id))
    }

    pub fn miner_docking_rewards(&self, miner: &str) -> Result<Amount> {
        let miner = Address::parse(miner).map_err(MiningError::InvalidMiner)?;
        Ok(self.state.miner_docking_rewards(&miner))
    }

    pub fn checkpoint(&self, id: u64) -> Result<Checkpoint> {
        self.state
            .checkpoint(id)
            .ok_or(MiningError::CheckpointNotFound { id })
    }

    pub fn last_checkpoint_id(&self) -> u64 {
        self.state.last_checkpoint_id()
    }

    pub fn validator_reward_pool(&self) -> Amount {
        self.state.validator_reward_pool()
    }

    pub fn emission_status(&self, ctx: BlockCtx) -> EmissionStatus {
        // Query path: reads the anchor without initializing it.
        let minutes = match self.state.genesis_minute() {
            Some(genesis) => ctx.minute() - genesis,
            None => 0,
        };
        EmissionStatus {
            escrow: self.state.emission_escrow(),
            rate_per_minute: emission_rate(minutes),
            stage: emission_stage_number(minutes),
            minutes_since_genesis: minutes,
        }
    }

    pub fn epoch_status(&self) -> EpochStatus {
        EpochStatus {
            epoch_number: self.state.epoch_number(),
            start_minute: self.state.epoch_start_minute(),
            total_shares: self.state.epoch_total_shares(),
            participant_count: self.state.miner_epoch_share_entries().len(),
        }
    }

    // === Test and tooling access ===

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    // === Shared internals ===

    /// Genesis minute, captured on first access.
    pub(crate) fn genesis_minute_or_init(&mut self, ctx: BlockCtx) -> i64 {
        match self.state.genesis_minute() {
            Some(minute) => minute,
            None => {
                self.state.set_genesis_minute(ctx.minute());
                ctx.minute()
            }
        }
    }

    /// Emission rate at the block's minute.
    pub(crate) fn current_emission_rate(&mut self, ctx: BlockCtx) -> Amount {
        let genesis = self.genesis_minute_or_init(ctx);
        emission_rate(ctx.minute() - genesis)
    }
}
