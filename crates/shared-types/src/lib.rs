//! # shared-types
//!
//! Chain-wide primitive types for Helix-Chain.
//!
//! ## Role in System
//!
//! - **Single Vocabulary**: every subsystem speaks in the same `Address`,
//!   `Amount`, and `BlockCtx` types
//! - **Boundary Validation**: addresses are parsed once at the message
//!   boundary and carried as proven-valid values afterwards
//!
//! Nothing in this crate touches I/O or the wall clock; block height and
//! block time always arrive from the host runtime via [`BlockCtx`].

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
