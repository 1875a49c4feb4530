//! Halving emission schedule
//!
//! Eight stages anchored at the genesis minute (captured once, on first
//! access). Stages 1..=7 each span two calendar years; stage 8 runs
//! forever at the 1.5 % floor. Rates are per-mille of the base so the
//! whole schedule stays in integer arithmetic.
//!
//! ```text
//! stage 1   100%      35_950_000_000 uhlx/min
//! stage 2    50%      17_975_000_000
//! stage 3    25%       8_987_500_000
//! stage 4    12.5%     4_493_750_000
//! stage 5    6.2%      2_228_900_000
//! stage 6    3.1%      1_114_450_000
//! stage 7    1.5%        539_250_000
//! stage 8+   1.5%        539_250_000   (perpetual)
//! ```
//!
//! Per-mille truncation makes stages 5..=7 land a hair below the nominal
//! halvings (62 instead of 62.5, and so on); the truncated values are the
//! consensus schedule.

use shared_types::Amount;

/// Starting emission rate: 35.95 HLX per minute in uhlx.
pub const BASE_EMISSION_PER_MINUTE: Amount = 35_950_000_000;

/// Stage length: two calendar years, 2 × 365.25 × 24 × 60 minutes.
pub const STAGE_DURATION_MINUTES: i64 = 1_051_920;

/// Perpetual floor, per-mille of base (stage 8 onward).
pub const PERPETUAL_RATE_PERMILLE: u64 = 15;

/// Per-mille of the base rate for stages 1..=8.
pub const STAGE_RATES_PERMILLE: [u64; 8] = [1000, 500, 250, 125, 62, 31, 15, PERPETUAL_RATE_PERMILLE];

/// One row of the emission schedule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EmissionStage {
    /// Minutes since genesis this stage starts at (inclusive).
    pub start_minute: i64,
    /// Minutes since genesis this stage ends at (exclusive); `None` for
    /// the perpetual tail.
    pub end_minute: Option<i64>,
    /// Rate as per-mille of [`BASE_EMISSION_PER_MINUTE`].
    pub rate_permille: u64,
}

/// The full 8-stage schedule.
pub fn emission_stages() -> [EmissionStage; 8] {
    let mut stages = [EmissionStage {
        start_minute: 0,
        end_minute: None,
        rate_permille: 0,
    }; 8];
    for (i, rate) in STAGE_RATES_PERMILLE.iter().enumerate() {
        let start = STAGE_DURATION_MINUTES * i as i64;
        stages[i] = EmissionStage {
            start_minute: start,
            end_minute: if i == STAGE_RATES_PERMILLE.len() - 1 {
                None
            } else {
                Some(start + STAGE_DURATION_MINUTES)
            },
            rate_permille: *rate,
        };
    }
    stages
}

/// Emission rate in uhlx per minute at `minutes_since_genesis`.
///
/// Negative input (a block timestamp before the recorded genesis minute)
/// clamps to stage 1 rather than underflowing the table.
pub fn emission_rate(minutes_since_genesis: i64) -> Amount {
    let minutes = minutes_since_genesis.max(0);
    for stage in emission_stages() {
        match stage.end_minute {
            Some(end) if minutes >= end => continue,
            _ => return BASE_EMISSION_PER_MINUTE * stage.rate_permille / 1000,
        }
    }
    BASE_EMISSION_PER_MINUTE * PERPETUAL_RATE_PERMILLE / 1000
}

/// Stage number (1..=8) at `minutes_since_genesis`.
pub fn emission_stage_number(minutes_since_genesis: i64) -> u8 {
    let minutes = minutes_since_genesis.max(0);
    for (i, stage) in emission_stages().iter().enumerate() {
        match stage.end_minute {
            Some(end) if minutes >= end => continue,
            _ => return (i + 1) as u8,
        }
    }
    8
}
