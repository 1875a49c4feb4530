//! Emission accrual and release.
//!
//! Every block tick compares the block minute against the last accrual
//! minute and mints the whole gap in one closed-form step. A per-minute
//! loop would invite drift between validators that tick at different
//! block rates; `rate × minutes` cannot.

use shared_types::{Amount, BlockCtx};
use tracing::{debug, error};

use crate::domain::{emission_rate, Job};
use crate::events::{EmissionRewardClaimedEvent, Event};
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::ProofVerifier;
use crate::service::MiningService;
use crate::MODULE_NAME;

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    /// Mint the emission owed since the last tick into escrow.
    ///
    /// The first tick only records the baseline minute; minting there
    /// would back-pay from minute zero in one unbounded burst.
    pub(crate) fn process_emissions(&mut self, ctx: BlockCtx) {
        let current_minute = ctx.minute();
        let last_minute = match self.state.last_emission_minute() {
            None => {
                self.state.set_last_emission_minute(current_minute);
                self.genesis_minute_or_init(ctx);
                return;
            }
            Some(minute) => minute,
        };
        if current_minute <= last_minute {
            return;
        }

        let minutes_elapsed = current_minute - last_minute;
        let rate = self.current_emission_rate(ctx);
        let emissions_to_add =
            u128::from(rate).saturating_mul(minutes_elapsed as u128).min(u128::from(u64::MAX))
                as Amount;

        if emissions_to_add > 0 {
            if let Err(err) = self.bank.mint(MODULE_NAME, emissions_to_add) {
                // Leave the last-accrual minute untouched so the gap is
                // retried on the next tick.
                error!(target: "hx-mining", %err, "failed to mint emission");
                return;
            }
            let escrow = self.state.emission_escrow() + emissions_to_add;
            self.state.set_emission_escrow(escrow);

            debug!(
                target: "hx-mining",
                minutes_elapsed,
                rate_per_minute = rate,
                emissions_added = emissions_to_add,
                total_escrow = escrow,
                "emissions accumulated"
            );
        }

        self.state.set_last_emission_minute(current_minute);
    }

    /// Emission owed to a job at claim time: current rate times minutes
    /// since the job was created (minimum one), clamped to what the
    /// escrow actually holds.
    ///
    /// Read-only: claims must not write anything before their bank
    /// transfer, so the genesis anchor is read, never initialized here.
    pub(crate) fn accrued_emission_reward(&self, ctx: BlockCtx, job: &Job) -> Amount {
        let minutes_since_created = (ctx.minute() - job.created_time / 60).max(1);
        let genesis = self.state.genesis_minute().unwrap_or_else(|| ctx.minute());
        let rate = emission_rate(ctx.minute() - genesis);
        let full =
            u128::from(rate).saturating_mul(minutes_since_created as u128).min(u128::from(u64::MAX))
                as Amount;
        full.min(self.state.emission_escrow())
    }

    /// Deduct a claimed emission portion from escrow and record it.
    pub(crate) fn settle_emission_claim(&mut self, ctx: BlockCtx, job: &Job, amount: Amount) {
        let remaining = self.state.emission_escrow() - amount;
        self.state.set_emission_escrow(remaining);

        self.emit(Event::EmissionRewardClaimed(EmissionRewardClaimedEvent {
            job_id: job.id.clone(),
            minutes_to_solve: (ctx.time_secs - job.created_time) / 60,
            emission_reward: amount,
            remaining_escrow: remaining,
        }));
    }
}
