//! Background job scheduling.
//!
//! The network always poses exactly one background optimization job so
//! idle mining capacity keeps producing useful work. Replacement order
//! when the current job ends: queued public submissions first (picked by
//! deterministic block-derived randomness), synthetic Ising problems
//! last. Synthetic difficulty self-tunes toward the 8-12 minute solve
//! band.

use sha2::{Digest, Sha256};
use shared_types::{Address, BlockCtx};
use tracing::{info, warn};

use crate::domain::problems::{
    adjust_problem_size, generate_couplings, threshold_for_size, ADJUSTMENT_WINDOW,
};
use crate::domain::{Job, JobStatus, BACKGROUND_JOB_CUSTOMER};
use crate::error::{MiningError, Result};
use crate::events::{
    DifficultyAdjustedEvent, Event, JobCompletedEvent, JobExpiredEvent, PublicJobActivatedEvent,
    SyntheticJobGeneratedEvent,
};
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::ProofVerifier;
use crate::service::{MiningService, SubmitPublicJob};

/// Background job lifetime: 24 hours at 2-second blocks.
const BACKGROUND_JOB_DURATION_BLOCKS: u64 = 43_200;

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    /// Queue a community problem for background execution.
    ///
    /// The job sits `Queued` and unrewarded until the scheduler draws it;
    /// activation restamps its clock and deadline.
    pub fn submit_public_job(&mut self, ctx: BlockCtx, msg: SubmitPublicJob) -> Result<String> {
        Address::parse(&msg.submitter).map_err(|err| MiningError::InvalidJob {
            reason: format!("malformed submitter address: {err}"),
        })?;

        let seq = self.state.next_job_seq();
        let job_id = format!("pub_{}_{}", ctx.height, seq);

        self.state.put_job(Job {
            id: job_id.clone(),
            customer: msg.submitter,
            problem_type: msg.problem_type,
            problem_data: msg.problem_data,
            problem_hash: msg.problem_hash,
            threshold: msg.threshold,
            reward: 0,
            status: JobStatus::Queued,
            best_energy: 0,
            best_solver: String::new(),
            total_shares: 0,
            created_height: ctx.height,
            created_time: ctx.time_secs,
            deadline_height: ctx.height + BACKGROUND_JOB_DURATION_BLOCKS,
            is_background: true,
        });

        let mut queue = self.state.public_job_queue();
        queue.push(job_id.clone());
        self.state.set_public_job_queue(queue);

        Ok(job_id)
    }

    /// Keep one background job active: expire the stale one, then draw a
    /// public submission, then fall back to synthesis.
    pub(crate) fn ensure_background_job(&mut self, ctx: BlockCtx) {
        if let Some(current_id) = self.state.current_job_id() {
            if let Some(job) = self.state.job(&current_id) {
                if job.status == JobStatus::Active {
                    if !job.is_past_deadline(ctx.height) {
                        return;
                    }
                    // Eager expiry: the scheduler owns its jobs, so the
                    // terminal status is written out rather than left to
                    // lazy checks.
                    self.expire_background_job(job);
                }
            }
        }

        if self.activate_public_job(ctx) {
            return;
        }
        self.generate_synthetic_job(ctx);
    }

    fn expire_background_job(&mut self, mut job: Job) {
        job.status = JobStatus::Expired;
        let job_id = job.id.clone();
        self.state.put_job(job);
        self.state.set_current_job_id(None);

        info!(target: "hx-mining", job_id = %job_id, "background job expired");
        self.emit(Event::JobExpired(JobExpiredEvent { job_id }));
    }

    /// Draw a queued public job, index picked by hashing the block
    /// context. Predictable, but identical on every validator.
    fn activate_public_job(&mut self, ctx: BlockCtx) -> bool {
        let mut queue = self.state.public_job_queue();
        if queue.is_empty() {
            return false;
        }

        let seed = format!("{}:{}", ctx.height, ctx.time_secs);
        let digest: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
        let draw = u64::from_be_bytes([
            digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
        ]);
        let index = (draw % queue.len() as u64) as usize;
        let job_id = queue.swap_remove(index);
        self.state.set_public_job_queue(queue);

        let Some(mut job) = self.state.job(&job_id) else {
            warn!(target: "hx-mining", job_id = %job_id, "queued job missing, dropping");
            return false;
        };

        job.status = JobStatus::Active;
        job.created_height = ctx.height;
        job.created_time = ctx.time_secs;
        job.deadline_height = ctx.height + BACKGROUND_JOB_DURATION_BLOCKS;
        let submitter = job.customer.clone();
        self.state.put_job(job);
        self.state.set_current_job_id(Some(job_id.clone()));

        info!(target: "hx-mining", job_id = %job_id, submitter = %submitter, "activated public background job");
        self.emit(Event::PublicJobActivated(PublicJobActivatedEvent {
            job_id,
            submitter,
        }));
        true
    }

    /// Pose a fresh synthetic Ising problem at the current size.
    fn generate_synthetic_job(&mut self, ctx: BlockCtx) {
        let size = self.state.problem_size();
        let seed_data = format!("helix_ising_{}_{}_{}", ctx.height, ctx.time_secs, size);
        let seed: [u8; 32] = Sha256::digest(seed_data.as_bytes()).into();
        let (problem_data, problem_hash) = generate_couplings(&seed, size);
        let threshold = threshold_for_size(size);
        let job_id = format!("sys_{}_{}", ctx.height, &problem_hash[..8]);

        self.state.put_job(Job {
            id: job_id.clone(),
            customer: BACKGROUND_JOB_CUSTOMER.to_string(),
            problem_type: "ising_synthetic".to_string(),
            problem_data,
            problem_hash,
            threshold,
            reward: 0,
            status: JobStatus::Active,
            best_energy: 0,
            best_solver: String::new(),
            total_shares: 0,
            created_height: ctx.height,
            created_time: ctx.time_secs,
            deadline_height: ctx.height + BACKGROUND_JOB_DURATION_BLOCKS,
            is_background: true,
        });
        self.state.set_current_job_id(Some(job_id.clone()));
        let count = self.state.background_job_count();
        self.state.set_background_job_count(count + 1);

        info!(
            target: "hx-mining",
            job_id = %job_id, problem_size = size, threshold,
            "generated synthetic background job"
        );
        self.emit(Event::SyntheticJobGenerated(SyntheticJobGeneratedEvent {
            job_id,
            problem_size: size,
            threshold,
        }));
    }

    /// A background job met its threshold: retire it, record the solve
    /// time, and retune the problem size once the window fills.
    pub(crate) fn finish_background_job(&mut self, ctx: BlockCtx, job: &Job, energy: i64) {
        if self.state.current_job_id().as_deref() == Some(job.id.as_str()) {
            self.state.set_current_job_id(None);
        }

        let solve_time_secs = (ctx.time_secs - job.created_time).max(0);
        self.emit(Event::JobCompleted(JobCompletedEvent {
            job_id: job.id.clone(),
            solver: job.best_solver.clone(),
            energy,
            solve_time_secs,
        }));

        let mut history = self.state.solve_time_history();
        history.push(solve_time_secs);
        if history.len() > ADJUSTMENT_WINDOW {
            history.drain(..history.len() - ADJUSTMENT_WINDOW);
        }

        if history.len() < ADJUSTMENT_WINDOW {
            self.state.set_solve_time_history(history);
            return;
        }

        let avg_solve_time = history.iter().sum::<i64>() / history.len() as i64;
        let old_size = self.state.problem_size();
        let new_size = adjust_problem_size(old_size, avg_solve_time);
        if new_size != old_size {
            self.state.set_problem_size(new_size);
            info!(
                target: "hx-mining",
                avg_solve_time, old_size, new_size,
                "difficulty adjusted"
            );
            self.emit(Event::DifficultyAdjusted(DifficultyAdjustedEvent {
                avg_solve_time,
                old_size,
                new_size,
            }));
        }
        // Window is consumed by the adjustment check either way.
        self.state.set_solve_time_history(Vec::new());
    }
}
