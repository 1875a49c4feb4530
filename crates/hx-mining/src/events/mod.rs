//! Events emitted by the settlement subsystem.
//!
//! Handlers append typed payloads to the service's event buffer; the host
//! runtime drains the buffer after each successful transaction and ships
//! the events to its indexer. A failed transaction's events are never
//! observable because handlers only emit after the last fallible step.

pub mod outbound;

pub use outbound::*;

use serde::{Deserialize, Serialize};

/// Every event the settlement subsystem can emit.
///
/// Serialized with a `type` tag matching the on-chain event name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    JobPosted(JobPostedEvent),
    FeeBurned(FeeBurnedEvent),
    ProofAccepted(ProofAcceptedEvent),
    RewardsClaimed(RewardsClaimedEvent),
    EmissionRewardClaimed(EmissionRewardClaimedEvent),
    JobCancelled(JobCancelledEvent),
    JobCompleted(JobCompletedEvent),
    JobExpired(JobExpiredEvent),
    DockingJobCreated(DockingJobCreatedEvent),
    DockingJobClaimed(DockingJobClaimedEvent),
    DockingResultSubmitted(DockingResultSubmittedEvent),
    DockingEpochEnd(DockingEpochEndEvent),
    DockingRewardPaid(DockingRewardPaidEvent),
    CheckpointCreated(CheckpointCreatedEvent),
    DifficultyAdjusted(DifficultyAdjustedEvent),
    SyntheticJobGenerated(SyntheticJobGeneratedEvent),
    PublicJobActivated(PublicJobActivatedEvent),
}
