//! Synthetic problem generation and adaptive sizing
//!
//! When no customer work is queued, the scheduler keeps miners busy with
//! network-generated Ising-style problems. Coupling bytes are expanded
//! from a seed by chained SHA-256, so every validator derives the exact
//! same problem from the block context.
//!
//! Problem size self-tunes toward a ~10-minute solve time: a rolling
//! window of recent solve times grows the lattice when jobs fall too
//! fast and shrinks it when they drag.

use sha2::{Digest, Sha256};

/// Smallest lattice edge the network will pose.
pub const MIN_PROBLEM_SIZE: u64 = 64;

/// Largest lattice edge the network will pose.
pub const MAX_PROBLEM_SIZE: u64 = 2048;

/// Lattice growth/shrink step per adjustment.
pub const SIZE_INCREMENT: u64 = 16;

/// Solve times faster than this trigger growth (seconds).
pub const MIN_SOLVE_TIME_SECS: i64 = 8 * 60;

/// Solve times slower than this trigger shrinking (seconds).
pub const MAX_SOLVE_TIME_SECS: i64 = 12 * 60;

/// Number of solve-time samples per adjustment window.
pub const ADJUSTMENT_WINDOW: usize = 3;

/// Expand a seed into `size * size` coupling bytes plus the problem's
/// content commitment.
///
/// The byte stream is sha256(seed), sha256(sha256(seed)), ... truncated
/// to the coupling count; the commitment binds both seed and size.
pub fn generate_couplings(seed: &[u8], size: u64) -> (Vec<u8>, String) {
    let coupling_count = (size * size) as usize;
    let mut couplings = Vec::with_capacity(coupling_count);

    let mut block: [u8; 32] = Sha256::digest(seed).into();
    while couplings.len() < coupling_count {
        let take = (coupling_count - couplings.len()).min(block.len());
        couplings.extend_from_slice(&block[..take]);
        block = Sha256::digest(block).into();
    }

    let mut commitment = Sha256::new();
    commitment.update(seed);
    commitment.update(format!("size:{size}").as_bytes());
    let problem_hash = hex::encode(commitment.finalize());

    (couplings, problem_hash)
}

/// Energy threshold a solution must reach for a lattice of `size`.
pub fn threshold_for_size(size: u64) -> i64 {
    -(size as i64) / 2
}

/// Next problem size given the average solve time over a full window.
///
/// Returns the current size unchanged while the average sits inside the
/// 8-12 minute target band, and clamps at the size bounds.
pub fn adjust_problem_size(current: u64, avg_solve_secs: i64) -> u64 {
    if avg_solve_secs < MIN_SOLVE_TIME_SECS {
        (current + SIZE_INCREMENT).min(MAX_PROBLEM_SIZE)
    } else if avg_solve_secs > MAX_SOLVE_TIME_SECS {
        current.saturating_sub(SIZE_INCREMENT).max(MIN_PROBLEM_SIZE)
    } else {
        current
    }
}
