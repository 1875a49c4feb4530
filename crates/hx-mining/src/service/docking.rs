//! Docking campaign actions: create, claim a ligand range, submit results.

use shared_types::{Address, BlockCtx};
use tracing::info;

use crate::domain::{docking_reward, is_hit, DockingClaim, DockingJob, DockingResult, DockingStatus, SearchBox};
use crate::error::{MiningError, Result};
use crate::events::{
    DockingJobClaimedEvent, DockingJobCreatedEvent, DockingResultSubmittedEvent, Event,
};
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::ProofVerifier;
use crate::service::{
    ClaimDockingJob, CreateDockingJob, DockingAssignment, DockingResultAck, MiningService,
    SubmitDockingResult, DEFAULT_DOCKING_BATCH,
};
use crate::MODULE_NAME;

/// Campaign lifetime: seven days.
const DOCKING_JOB_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    /// Open a docking campaign. Paid campaigns escrow their reward pool;
    /// background campaigns become the network's active campaign.
    pub fn create_docking_job(&mut self, ctx: BlockCtx, msg: CreateDockingJob) -> Result<String> {
        let mut reward_pool = 0;
        if !msg.is_background && msg.reward > 0 {
            let creator = Address::parse(&msg.creator).map_err(|err| MiningError::InvalidJob {
                reason: format!("malformed creator address: {err}"),
            })?;
            self.bank
                .send_from_account_to_module(&creator, MODULE_NAME, msg.reward)?;
            reward_pool = msg.reward;
        }

        let seq = self.state.next_docking_seq();
        let job_id = format!("dock_{}_{}", ctx.height, seq);

        let job = DockingJob {
            id: job_id.clone(),
            protein_id: String::new(),
            target_hash: msg.target_hash.clone(),
            protein_pdb: msg.protein_pdb,
            total_ligands: msg.total_ligands,
            docked_count: 0,
            hit_count: 0,
            search_box: SearchBox::centered(
                msg.center_x_milli,
                msg.center_y_milli,
                msg.center_z_milli,
            ),
            is_background: msg.is_background,
            status: DockingStatus::Active,
            created_at: ctx.time_secs,
            deadline: ctx.time_secs + DOCKING_JOB_LIFETIME_SECS,
            reward_pool,
            next_ligand_idx: 0,
            license: String::new(),
        };
        self.state.put_docking_job(job);

        if msg.is_background {
            self.state.set_active_docking_job_id(Some(job_id.clone()));
        }

        self.emit(Event::DockingJobCreated(DockingJobCreatedEvent {
            job_id: job_id.clone(),
            target_hash: msg.target_hash,
            total_ligands: msg.total_ligands,
            is_background: msg.is_background,
        }));

        Ok(job_id)
    }

    /// Lease the next contiguous ligand range to a miner.
    ///
    /// The cursor only moves forward, so no two claims ever overlap.
    pub fn claim_docking_job(
        &mut self,
        ctx: BlockCtx,
        msg: ClaimDockingJob,
    ) -> Result<DockingAssignment> {
        let job = match &msg.job_id {
            Some(id) => self.state.docking_job(id),
            None => self
                .state
                .active_docking_job_id()
                .and_then(|id| self.state.docking_job(&id)),
        }
        .ok_or_else(|| MiningError::JobNotFound {
            job_id: msg.job_id.clone().unwrap_or_else(|| "<active>".into()),
        })?;

        if job.status != DockingStatus::Active {
            return Err(MiningError::JobNotActive {
                job_id: job.id,
                status: job.status.to_string(),
            });
        }
        if job.next_ligand_idx >= job.total_ligands {
            return Err(MiningError::AllLigandsAssigned { job_id: job.id });
        }
        Address::parse(&msg.miner).map_err(MiningError::InvalidMiner)?;

        let batch_size = if msg.batch_size == 0 {
            DEFAULT_DOCKING_BATCH
        } else {
            msg.batch_size
        };
        let start_ligand = job.next_ligand_idx;
        let end_ligand = (start_ligand + batch_size).min(job.total_ligands);

        let mut job = job;
        job.next_ligand_idx = end_ligand;
        let assignment = DockingAssignment {
            job_id: job.id.clone(),
            target_hash: job.target_hash.clone(),
            protein_pdb: job.protein_pdb.clone(),
            start_ligand,
            end_ligand,
            search_box: job.search_box,
        };
        self.state.put_docking_job(job);

        self.state.put_docking_claim(DockingClaim {
            miner: msg.miner.clone(),
            job_id: assignment.job_id.clone(),
            start_ligand,
            end_ligand,
            claimed_at: ctx.time_secs,
        });

        self.emit(Event::DockingJobClaimed(DockingJobClaimedEvent {
            job_id: assignment.job_id.clone(),
            miner: msg.miner,
            start_ligand,
            end_ligand,
        }));

        Ok(assignment)
    }

    /// Record one docked ligand: complexity-weighted reward tracking,
    /// epoch share credit, hit bookkeeping, campaign completion.
    pub fn submit_docking_result(
        &mut self,
        ctx: BlockCtx,
        msg: SubmitDockingResult,
    ) -> Result<DockingResultAck> {
        let job = self
            .state
            .docking_job(&msg.job_id)
            .ok_or_else(|| MiningError::JobNotFound {
                job_id: msg.job_id.clone(),
            })?;
        if job.status != DockingStatus::Active {
            return Err(MiningError::JobNotActive {
                job_id: job.id,
                status: job.status.to_string(),
            });
        }
        let miner = Address::parse(&msg.miner).map_err(MiningError::InvalidMiner)?;
        if self
            .state
            .docking_result(&msg.job_id, &msg.ligand_id)
            .is_some()
        {
            return Err(MiningError::DuplicateResult {
                job_id: msg.job_id,
                ligand_id: msg.ligand_id,
            });
        }

        let reward = docking_reward(msg.rotatable_bonds);
        let hit = is_hit(msg.binding_score_milli);

        self.state.put_docking_result(DockingResult {
            id: format!("{}_{}", msg.job_id, msg.ligand_id),
            job_id: msg.job_id.clone(),
            ligand_id: msg.ligand_id.clone(),
            ligand_smiles: msg.ligand_smiles,
            binding_score_milli: msg.binding_score_milli,
            rotatable_bonds: msg.rotatable_bonds,
            miner: msg.miner.clone(),
            reward,
            is_hit: hit,
            block_height: ctx.height,
            submitted_at: ctx.time_secs,
        });

        let mut job = job;
        job.docked_count += 1;
        if hit {
            job.hit_count += 1;
        }
        // Completion lands exactly when every ligand is docked.
        if job.docked_count == job.total_ligands {
            job.status = DockingStatus::Completed;
            if self.state.active_docking_job_id().as_deref() == Some(job.id.as_str()) {
                self.state.set_active_docking_job_id(None);
            }
        }
        let job_id = job.id.clone();
        self.state.put_docking_job(job);

        // Epoch settlement pays for this work at rollover; the lifetime
        // counter feeds the per-miner reward query.
        self.add_miner_epoch_shares(&miner, msg.rotatable_bonds);
        self.state.add_miner_docking_rewards(&miner, reward);

        if hit {
            info!(
                target: "hx-mining",
                job_id = %job_id, ligand_id = %msg.ligand_id,
                binding_score_milli = msg.binding_score_milli, miner = %msg.miner,
                "drug candidate found"
            );
        }
        self.emit(Event::DockingResultSubmitted(DockingResultSubmittedEvent {
            job_id,
            ligand_id: msg.ligand_id,
            miner: msg.miner,
            binding_score_milli: msg.binding_score_milli,
            reward,
            is_hit: hit,
        }));

        Ok(DockingResultAck {
            accepted: true,
            reward,
            is_hit: hit,
        })
    }
}
