//! Docking epoch distribution.
//!
//! Docking work is many small heterogeneous units, so instead of per-job
//! competition it pools complexity-weighted shares inside fixed
//! 10-minute epochs and settles the pool proportionally at rollover.
//! The new epoch starts at the rollover block's minute rather than
//! start+10, so epochs stretch when ticks are sparse instead of piling
//! up.

use shared_types::{Address, BlockCtx};
use tracing::{error, info};

use crate::domain::weighted_share;
use crate::events::{DockingEpochEndEvent, DockingRewardPaidEvent, Event};
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::ProofVerifier;
use crate::service::MiningService;
use crate::MODULE_NAME;

/// Epoch length in wall-clock minutes.
pub const DOCKING_EPOCH_MINUTES: i64 = 10;

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    /// Epoch start minute, captured on first access.
    pub(crate) fn epoch_start_or_init(&mut self, ctx: BlockCtx) -> i64 {
        match self.state.epoch_start_minute() {
            Some(minute) => minute,
            None => {
                self.state.set_epoch_start_minute(ctx.minute());
                ctx.minute()
            }
        }
    }

    /// Credit one docked ligand's weighted share to the current epoch.
    /// Returns the weight credited.
    pub(crate) fn add_miner_epoch_shares(&mut self, miner: &Address, rotatable_bonds: i32) -> i64 {
        let weighted = weighted_share(rotatable_bonds);
        let miner_shares = self.state.miner_epoch_shares(miner);
        self.state.set_miner_epoch_shares(miner, miner_shares + weighted);
        let total = self.state.epoch_total_shares();
        self.state.set_epoch_total_shares(total + weighted);
        weighted
    }

    /// Roll the epoch over once its 10 minutes are up.
    pub(crate) fn process_docking_epoch(&mut self, ctx: BlockCtx) {
        let epoch_start = self.epoch_start_or_init(ctx);
        if ctx.minute() - epoch_start < DOCKING_EPOCH_MINUTES {
            return;
        }
        self.end_epoch_and_distribute(ctx);
    }

    /// Settle the ending epoch and reset the accumulators.
    fn end_epoch_and_distribute(&mut self, ctx: BlockCtx) {
        let epoch = self.state.epoch_number();
        let total_shares = self.state.epoch_total_shares();

        if total_shares == 0 {
            // Nothing earned, nothing to iterate.
            self.advance_epoch(ctx);
            return;
        }

        let rate = self.current_emission_rate(ctx);
        let epoch_emission = rate * DOCKING_EPOCH_MINUTES as u64;

        // Deterministic address-ordered scan. Division truncates; the
        // remainder stays in the module account rather than being
        // redistributed, identically on every replay.
        for (miner, miner_shares) in self.state.miner_epoch_share_entries() {
            if miner_shares == 0 {
                continue;
            }
            let reward = (miner_shares as u128 * epoch_emission as u128 / total_shares as u128)
                as u64;
            if reward == 0 {
                continue;
            }
            match self
                .bank
                .send_from_module_to_account(MODULE_NAME, &miner, reward)
            {
                Ok(()) => {
                    self.emit(Event::DockingRewardPaid(DockingRewardPaidEvent {
                        miner: miner.to_string(),
                        shares: miner_shares,
                        reward,
                    }));
                }
                Err(err) => {
                    error!(
                        target: "hx-mining",
                        miner = %miner, reward, %err,
                        "failed to pay docking reward"
                    );
                }
            }
        }

        info!(
            target: "hx-mining",
            epoch, total_shares, emission = epoch_emission,
            "docking epoch ended"
        );
        self.emit(Event::DockingEpochEnd(DockingEpochEndEvent {
            epoch,
            total_shares,
            emission_distributed: epoch_emission,
        }));

        self.advance_epoch(ctx);
    }

    fn advance_epoch(&mut self, ctx: BlockCtx) {
        self.state.clear_miner_epoch_shares();
        self.state.set_epoch_total_shares(0);
        let epoch = self.state.epoch_number();
        self.state.set_epoch_number(epoch + 1);
        self.state.set_epoch_start_minute(ctx.minute());
    }
}
