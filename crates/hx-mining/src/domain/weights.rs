//! Ligand complexity weighting
//!
//! Docking one flexible, many-rotatable-bond ligand is more compute than
//! docking a rigid fragment. Rotatable-bond count is the complexity proxy:
//! it maps through a fixed per-mille table to a weight in [0.5x, 3.0x],
//! stored as 500..=3000 so epoch accounting never touches a float.
//!
//! The weighted share a submission adds to its epoch IS the per-mille
//! weight (the 1000x scale is the fractional headroom).

use shared_types::Amount;

/// Per-mille complexity weight by rotatable-bond count (index 0..=13).
pub const BOND_WEIGHTS_PERMILLE: [u64; 14] = [
    500, 600, 700, 800, 900, 1000, 1200, 1400, 1600, 1800, 2000, 2300, 2600, 3000,
];

/// Base reward credited per docked ligand before weighting, uhlx.
pub const DOCKING_BASE_REWARD: Amount = 1000;

/// Binding scores below this are hits: -7.0 kcal/mol in milli-units.
pub const DOCKING_HIT_THRESHOLD_MILLI: i64 = -7_000;

/// Complexity weight for a rotatable-bond count, per-mille.
///
/// Out-of-range counts clamp to the table ends.
pub fn bond_weight_permille(rotatable_bonds: i32) -> u64 {
    let idx = rotatable_bonds.clamp(0, BOND_WEIGHTS_PERMILLE.len() as i32 - 1) as usize;
    BOND_WEIGHTS_PERMILLE[idx]
}

/// Epoch share weight contributed by one docked ligand.
pub fn weighted_share(rotatable_bonds: i32) -> i64 {
    bond_weight_permille(rotatable_bonds) as i64
}

/// Complexity-weighted reward for one docked ligand, uhlx.
pub fn docking_reward(rotatable_bonds: i32) -> Amount {
    DOCKING_BASE_REWARD * bond_weight_permille(rotatable_bonds) / 1000
}

/// Whether a binding score counts as a drug-candidate hit.
pub fn is_hit(binding_score_milli: i64) -> bool {
    binding_score_milli < DOCKING_HIT_THRESHOLD_MILLI
}
