//! Optimization job actions: post, prove, claim, cancel.

use shared_types::{Address, Amount, BlockCtx};
use tracing::{info, warn};

use crate::config::VerifierPolicy;
use crate::domain::{score_submission, Job, JobStatus};
use crate::error::{MiningError, Result};
use crate::events::{
    Event, FeeBurnedEvent, JobCancelledEvent, JobPostedEvent, ProofAcceptedEvent,
    RewardsClaimedEvent,
};
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::{ProofVerifier, VerifierError, VerifyRequest};
use crate::service::{ClaimRewards, CancelJob, MiningService, PostJob, SubmitProof};
use crate::MODULE_NAME;

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    /// Post a paid job: escrow the gross reward, burn the posting fee,
    /// store the job `Active` with the net reward.
    pub fn post_job(&mut self, ctx: BlockCtx, msg: PostJob) -> Result<String> {
        let customer = Address::parse(&msg.customer).map_err(|err| MiningError::InvalidJob {
            reason: format!("malformed customer address: {err}"),
        })?;
        if msg.reward < self.params.min_job_reward {
            return Err(MiningError::InvalidJob {
                reason: format!(
                    "reward {} below minimum {}",
                    msg.reward, self.params.min_job_reward
                ),
            });
        }
        if msg.duration_blocks == 0 || msg.duration_blocks > self.params.max_job_duration_blocks {
            return Err(MiningError::InvalidJob {
                reason: format!(
                    "duration {} blocks outside 1..={}",
                    msg.duration_blocks, self.params.max_job_duration_blocks
                ),
            });
        }

        self.bank
            .send_from_account_to_module(&customer, MODULE_NAME, msg.reward)?;

        // Fee burn is best-effort: the escrow just landed, but a host
        // bank may still refuse; the job proceeds with the gross reward.
        let fee =
            (msg.reward as u128 * self.params.job_fee_burn_percent as u128 / 100) as Amount;
        let seq = self.state.next_job_seq();
        let job_id = format!("job_{}_{}", ctx.height, seq);
        let mut net_reward = msg.reward;
        let mut fee_burned = 0;
        if fee > 0 {
            match self.bank.burn(MODULE_NAME, fee) {
                Ok(()) => {
                    net_reward = msg.reward - fee;
                    fee_burned = fee;
                }
                Err(err) => {
                    warn!(target: "hx-mining", job_id = %job_id, %err, "posting fee burn failed");
                }
            }
        }

        let job = Job {
            id: job_id.clone(),
            customer: msg.customer.clone(),
            problem_type: msg.problem_type,
            problem_data: msg.problem_data,
            problem_hash: msg.problem_hash,
            threshold: msg.threshold,
            reward: net_reward,
            status: JobStatus::Active,
            best_energy: 0,
            best_solver: String::new(),
            total_shares: 0,
            created_height: ctx.height,
            created_time: ctx.time_secs,
            deadline_height: ctx.height + msg.duration_blocks,
            is_background: false,
        };
        self.state.put_job(job);

        if fee_burned > 0 {
            self.emit(Event::FeeBurned(FeeBurnedEvent {
                job_id: job_id.clone(),
                amount: fee_burned,
            }));
        }
        self.emit(Event::JobPosted(JobPostedEvent {
            job_id: job_id.clone(),
            customer: msg.customer,
            threshold: msg.threshold,
            reward: net_reward,
        }));

        Ok(job_id)
    }

    /// Score a proof submission and credit the earned shares.
    ///
    /// Expiry is checked lazily against the deadline height; the stored
    /// status is not flipped here (the scheduler owns eager expiry for
    /// its own jobs).
    pub fn submit_proof(&mut self, ctx: BlockCtx, msg: SubmitProof) -> Result<i64> {
        let job = self
            .state
            .job(&msg.job_id)
            .ok_or_else(|| MiningError::JobNotFound {
                job_id: msg.job_id.clone(),
            })?;
        if job.status != JobStatus::Active {
            return Err(MiningError::JobNotActive {
                job_id: job.id,
                status: job.status.to_string(),
            });
        }
        if job.is_past_deadline(ctx.height) {
            return Err(MiningError::JobExpired {
                job_id: job.id,
                deadline: job.deadline_height,
                height: ctx.height,
            });
        }
        let miner = Address::parse(&msg.miner).map_err(MiningError::InvalidMiner)?;

        // The threshold verdict is computed locally so fail-open and
        // fail-closed deployments accept the same submissions whenever
        // they accept at all.
        let meets_threshold = msg.energy <= job.threshold;
        let request = VerifyRequest {
            job_id: msg.job_id.clone(),
            problem_commitment: job.problem_hash.clone(),
            solution_commitment: msg.solution_hash.clone(),
            claimed_energy: msg.energy,
            threshold: job.threshold,
            proof: msg.proof.clone(),
        };
        match self.verifier.verify(&request) {
            Ok(outcome) => {
                if !outcome.valid || !meets_threshold {
                    return Err(MiningError::InvalidProof { job_id: msg.job_id });
                }
            }
            Err(VerifierError::Unavailable { reason }) => match self.params.verifier_policy {
                VerifierPolicy::FailClosed => {
                    return Err(MiningError::ProofVerificationUnavailable { reason });
                }
                VerifierPolicy::FailOpen => {
                    warn!(
                        target: "hx-mining",
                        job_id = %msg.job_id, %reason,
                        "verifier unavailable, accepting unverified per fail-open policy"
                    );
                    if !meets_threshold {
                        return Err(MiningError::InvalidProof { job_id: msg.job_id });
                    }
                }
            },
        }

        let award = score_submission(job.total_shares, job.best_energy, msg.energy);
        let mut job = job;
        if award.takes_best {
            job.best_energy = msg.energy;
            job.best_solver = msg.miner.clone();
        }
        job.total_shares += award.shares;

        // A background job is solved the moment its threshold is met.
        let solved_background = job.is_background && meets_threshold;
        if solved_background {
            job.status = JobStatus::Completed;
        }
        self.state.put_job(job.clone());

        if award.shares > 0 {
            let current = self.state.shares(&miner, &job.id);
            self.state.set_shares(&miner, &job.id, current + award.shares);

            self.emit(Event::ProofAccepted(ProofAcceptedEvent {
                job_id: job.id.clone(),
                miner: msg.miner.clone(),
                energy: msg.energy,
                shares_earned: award.shares,
                proof_type: msg.proof_type.clone(),
            }));
        }

        if solved_background {
            self.finish_background_job(ctx, &job, msg.energy);
        }

        Ok(award.shares)
    }

    /// Pay out a miner's proportional cut of the job reward plus the
    /// time-accrued emission, split with the validator pool.
    pub fn claim_rewards(&mut self, ctx: BlockCtx, msg: ClaimRewards) -> Result<Amount> {
        let job = self
            .state
            .job(&msg.job_id)
            .ok_or_else(|| MiningError::JobNotFound {
                job_id: msg.job_id.clone(),
            })?;
        let claimer = Address::parse(&msg.claimer).map_err(|err| MiningError::Unauthorized {
            reason: format!("malformed claimant address: {err}"),
        })?;
        let shares = self.state.shares(&claimer, &job.id);
        if shares == 0 {
            return Err(MiningError::NoShares { job_id: job.id });
        }

        // shares <= total_shares always holds (conservation), so the
        // customer portion cannot exceed the escrowed reward.
        let customer_portion =
            (shares as u128 * job.reward as u128 / job.total_shares as u128) as Amount;
        let emission_portion = self.accrued_emission_reward(ctx, &job);

        let miner_percent = self.params.miner_share_percent as u128;
        let miner_customer = (customer_portion as u128 * miner_percent / 100) as Amount;
        let miner_emission = (emission_portion as u128 * miner_percent / 100) as Amount;
        let validator_cut =
            (customer_portion - miner_customer) + (emission_portion - miner_emission);
        let payout = miner_customer + miner_emission;

        if payout > 0 {
            self.bank
                .send_from_module_to_account(MODULE_NAME, &claimer, payout)?;
        }

        self.settle_emission_claim(ctx, &job, emission_portion);
        let pool = self.state.validator_reward_pool();
        self.state.set_validator_reward_pool(pool + validator_cut);
        self.state.set_shares(&claimer, &job.id, 0);

        info!(
            target: "hx-mining",
            job_id = %job.id, claimer = %msg.claimer, payout, validator_cut,
            "rewards claimed"
        );
        self.emit(Event::RewardsClaimed(RewardsClaimedEvent {
            job_id: job.id,
            claimer: msg.claimer,
            amount: payout,
        }));

        Ok(payout)
    }

    /// Cancel an unworked job, refunding the net escrow to its customer.
    pub fn cancel_job(&mut self, _ctx: BlockCtx, msg: CancelJob) -> Result<()> {
        let job = self
            .state
            .job(&msg.job_id)
            .ok_or_else(|| MiningError::JobNotFound {
                job_id: msg.job_id.clone(),
            })?;
        let customer = Address::parse(&msg.customer).map_err(|err| MiningError::Unauthorized {
            reason: format!("malformed customer address: {err}"),
        })?;
        if job.customer != msg.customer {
            return Err(MiningError::Unauthorized {
                reason: format!("caller is not the customer of {}", job.id),
            });
        }
        if job.status != JobStatus::Active {
            return Err(MiningError::JobNotActive {
                job_id: job.id,
                status: job.status.to_string(),
            });
        }
        if job.total_shares > 0 {
            return Err(MiningError::CannotCancel {
                job_id: job.id,
                total_shares: job.total_shares,
            });
        }

        if job.reward > 0 {
            self.bank
                .send_from_module_to_account(MODULE_NAME, &customer, job.reward)?;
        }

        let mut job = job;
        job.status = JobStatus::Cancelled;
        let refund = job.reward;
        let job_id = job.id.clone();
        self.state.put_job(job);

        self.emit(Event::JobCancelled(JobCancelledEvent {
            job_id,
            customer: msg.customer,
            refund,
        }));

        Ok(())
    }
}
