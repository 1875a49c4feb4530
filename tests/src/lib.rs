//! # Helix-Chain Test Suite
//!
//! Unified test crate exercising the settlement module end to end
//! through its public actions, the way the host runtime drives it:
//! `begin_block`, a batch of actions, `end_block`, repeat.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── token_flow.rs           # post → prove → claim, burn + split vectors
//!     ├── docking_flow.rs         # campaign lifecycle + epoch settlement
//!     ├── emission_schedule.rs    # halving schedule, catch-up, escrow caps
//!     ├── checkpoints.rs          # gapless checkpoint chains
//!     ├── background_scheduler.rs # synthetic jobs, queues, expiry paths
//!     └── genesis_roundtrip.rs    # export/import state fidelity
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hx-tests
//! cargo test -p hx-tests integration::token_flow::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
