//! Periodic checkpointing of aggregate counters.

use shared_types::BlockCtx;
use tracing::info;

use crate::domain::Checkpoint;
use crate::events::{CheckpointCreatedEvent, Event};
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::ProofVerifier;
use crate::service::MiningService;

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    /// Record a checkpoint every `checkpoint_interval` blocks.
    ///
    /// Purely additive: ids are assigned sequentially from 1 and every
    /// checkpoint's range starts one past its predecessor's end (0 for
    /// the first), so the chain is gapless by construction.
    pub(crate) fn maybe_create_checkpoint(&mut self, ctx: BlockCtx) {
        if ctx.height == 0 || ctx.height % self.params.checkpoint_interval != 0 {
            return;
        }

        let last_id = self.state.last_checkpoint_id();
        let new_id = last_id + 1;
        let start_height = if last_id > 0 {
            match self.state.checkpoint(last_id) {
                Some(previous) => previous.end_height + 1,
                None => 0,
            }
        } else {
            0
        };

        let checkpoint = Checkpoint {
            id: new_id,
            start_height,
            end_height: ctx.height,
            validator_rewards: self.state.validator_reward_pool(),
            emission_escrow: self.state.emission_escrow(),
            timestamp: ctx.time_secs,
        };

        info!(
            target: "hx-mining",
            id = new_id,
            height = ctx.height,
            validator_reward_pool = checkpoint.validator_rewards,
            emission_escrow = checkpoint.emission_escrow,
            "created checkpoint"
        );
        self.emit(Event::CheckpointCreated(CheckpointCreatedEvent {
            checkpoint_id: new_id,
            height: ctx.height,
            validator_rewards: checkpoint.validator_rewards,
            emission_escrow: checkpoint.emission_escrow,
        }));

        self.state.put_checkpoint(checkpoint);
        self.state.set_last_checkpoint_id(new_id);
    }
}
