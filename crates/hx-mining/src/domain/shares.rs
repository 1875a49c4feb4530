//! Universal Share Formula
//!
//! Shares measure a miner's contribution to driving a job's energy down.
//! The first accepted proof is the *bootstrap*: it sets the baseline and
//! earns `abs(energy)` shares, so harder starting problems (larger energy
//! magnitudes) seed proportionally more credit. Every later proof is
//! *competition*: it earns exactly the improvement it delivers over the
//! best known energy, or nothing.
//!
//! Worse-than-best submissions cost nothing. Submitting is already gated
//! by proof verification, so there is no spam to punish here.

/// Outcome of scoring one accepted submission against a job.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShareAward {
    /// Shares earned by the submitter. Zero when the submission did not
    /// improve on the best known energy.
    pub shares: i64,
    /// Whether the submission becomes the job's best energy/solver.
    pub takes_best: bool,
}

/// Score a verified submission.
///
/// `total_shares` and `best_energy` are the job's values before this
/// submission; `claimed_energy` is the submission's.
pub fn score_submission(total_shares: i64, best_energy: i64, claimed_energy: i64) -> ShareAward {
    if total_shares == 0 {
        // Bootstrap: first solver earns the full energy magnitude.
        return ShareAward {
            shares: claimed_energy.saturating_abs(),
            takes_best: true,
        };
    }
    let improvement = best_energy.saturating_sub(claimed_energy);
    if improvement > 0 {
        ShareAward {
            shares: improvement,
            takes_best: true,
        }
    } else {
        ShareAward {
            shares: 0,
            takes_best: false,
        }
    }
}
