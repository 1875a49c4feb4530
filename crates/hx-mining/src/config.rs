//! Tunable parameters for the settlement subsystem
//!
//! Read-only to every handler at execution time; the host's governance
//! path is the only writer.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

use crate::error::MiningError;

/// Default miner side of the reward split, percent.
pub const DEFAULT_MINER_SHARE_PERCENT: u64 = 80;

/// Default validator side of the reward split, percent.
pub const DEFAULT_VALIDATOR_SHARE_PERCENT: u64 = 20;

/// Default checkpoint cadence in blocks.
pub const DEFAULT_CHECKPOINT_INTERVAL: u64 = 300;

/// Default percentage of a posted reward burned as a posting fee.
pub const DEFAULT_JOB_FEE_BURN_PERCENT: u64 = 2;

/// Default minimum escrow for a paid job, in uhlx.
pub const DEFAULT_MIN_JOB_REWARD: Amount = 1_000_000;

/// Default maximum job duration: 24 hours at 2-second blocks.
pub const DEFAULT_MAX_JOB_DURATION_BLOCKS: u64 = 43_200;

/// What to do when the proof verifier cannot be reached.
///
/// `FailOpen` keeps the network live through a verifier outage at the
/// cost of accepting unverified work, and logs every such acceptance.
/// `FailClosed` rejects the submission instead and is the default.
/// Both outcomes are deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifierPolicy {
    /// Reject the submission with `ProofVerificationUnavailable`.
    FailClosed,
    /// Log a warning and treat the proof as accepted.
    FailOpen,
}

/// Runtime parameters of the settlement module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Miner share of every payout, percent.
    pub miner_share_percent: u64,

    /// Validator share of every payout, percent. Must complement
    /// `miner_share_percent` to exactly 100.
    pub validator_share_percent: u64,

    /// Blocks between checkpoint records.
    pub checkpoint_interval: u64,

    /// Percentage of the gross job reward burned on posting.
    pub job_fee_burn_percent: u64,

    /// Smallest acceptable gross reward for a paid job, uhlx.
    pub min_job_reward: Amount,

    /// Longest allowed job duration, blocks.
    pub max_job_duration_blocks: u64,

    /// Behavior when the proof verifier is unreachable.
    pub verifier_policy: VerifierPolicy,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            miner_share_percent: DEFAULT_MINER_SHARE_PERCENT,
            validator_share_percent: DEFAULT_VALIDATOR_SHARE_PERCENT,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            job_fee_burn_percent: DEFAULT_JOB_FEE_BURN_PERCENT,
            min_job_reward: DEFAULT_MIN_JOB_REWARD,
            max_job_duration_blocks: DEFAULT_MAX_JOB_DURATION_BLOCKS,
            verifier_policy: VerifierPolicy::FailClosed,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), MiningError> {
        if self.miner_share_percent + self.validator_share_percent != 100 {
            return Err(MiningError::InvalidParams {
                reason: format!(
                    "miner ({}) and validator ({}) share percents must sum to 100",
                    self.miner_share_percent, self.validator_share_percent
                ),
            });
        }
        if self.checkpoint_interval == 0 {
            return Err(MiningError::InvalidParams {
                reason: "checkpoint interval must be positive".into(),
            });
        }
        if self.job_fee_burn_percent >= 100 {
            return Err(MiningError::InvalidParams {
                reason: format!(
                    "job fee burn percent must be below 100, got {}",
                    self.job_fee_burn_percent
                ),
            });
        }
        if self.max_job_duration_blocks == 0 {
            return Err(MiningError::InvalidParams {
                reason: "max job duration must be positive".into(),
            });
        }
        Ok(())
    }
}
