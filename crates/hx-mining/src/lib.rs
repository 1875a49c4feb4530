//! # hx-mining
//!
//! Reward-settlement subsystem for Helix-Chain.
//!
//! ## Role in System
//!
//! - **Work Ledger**: tracks optimization jobs and molecular-docking
//!   campaigns from posting to terminal state
//! - **Proof Competition**: scores verified proof submissions into shares
//!   (bootstrap solver earns `abs(energy)`, later solvers earn their
//!   improvement over the best known energy)
//! - **Emission Scheduler**: mints uhlx into escrow every elapsed minute
//!   under an 8-stage halving schedule anchored at the genesis minute
//! - **Docking Epoch Distributor**: pools weighted ligand work inside
//!   10-minute epochs and settles it proportionally at rollover
//! - **Checkpoint Manager**: snapshots aggregate counters every
//!   `checkpoint_interval` blocks into a gapless checkpoint chain
//!
//! ## Determinism
//!
//! Every operation here must produce bit-identical results when the same
//! transaction log is replayed on another machine. Consequences:
//!
//! - execution is strictly serial; nothing suspends or spawns
//! - no wall clock: all time comes from [`shared_types::BlockCtx`]
//! - no floating point: binding scores and box geometry are milli-unit
//!   integers, bond weights are per-mille lookups
//! - all iterated state lives in ordered maps
//!
//! The host runtime supplies persistence, the bank, and transaction
//! routing; this crate plugs into them through the traits in [`ports`].

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use events::*;
pub use service::*;

/// Module account name the bank ledger escrows under.
pub const MODULE_NAME: &str = "mining";
