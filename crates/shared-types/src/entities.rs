//! # Core Primitive Types
//!
//! ## Type Decisions
//!
//! - `Amount = u64` - token amounts in uhlx (smallest unit). The largest
//!   value the settlement core produces is one full emission stage,
//!   ~3.8e16 uhlx, well inside u64; proportional math widens to u128
//!   before multiplying.
//! - `Address` - validated bech32-style account string. Validation happens
//!   once, at the message boundary; stores and the bank ledger only ever
//!   see parsed addresses.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::errors::AddressError;

/// Token amount in uhlx, the smallest on-chain unit.
pub type Amount = u64;

/// On-chain denomination of the Helix token.
pub const DENOM: &str = "uhlx";

/// Display denomination. 1 HLX = 10^9 uhlx.
pub const DISPLAY_DENOM: &str = "HLX";

/// Human-readable part all Helix account addresses start with.
pub const ADDRESS_PREFIX: &str = "helix1";

/// Maximum total address length (bech32 limit).
pub const ADDRESS_MAX_LEN: usize = 90;

/// Minimum data-part length after the prefix.
pub const ADDRESS_MIN_DATA_LEN: usize = 8;

/// Bech32 data charset. Excludes `1`, `b`, `i`, `o`.
const ADDRESS_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// A validated Helix account address.
///
/// Constructed only through [`Address::parse`] (or `FromStr`), so holding
/// an `Address` is proof the string passed boundary validation. Entities
/// persist the raw string; code paths that move tokens parse first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Validate a raw account string.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        if raw.is_empty() {
            return Err(AddressError::Empty);
        }
        if raw.len() > ADDRESS_MAX_LEN {
            return Err(AddressError::TooLong {
                length: raw.len(),
                max: ADDRESS_MAX_LEN,
            });
        }
        let data = raw
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or_else(|| AddressError::BadPrefix {
                address: raw.to_string(),
                expected: ADDRESS_PREFIX.to_string(),
            })?;
        if data.len() < ADDRESS_MIN_DATA_LEN {
            return Err(AddressError::TooShort {
                address: raw.to_string(),
            });
        }
        if let Some(bad) = data.chars().find(|c| !ADDRESS_CHARSET.contains(*c)) {
            return Err(AddressError::BadCharacter {
                address: raw.to_string(),
                character: bad,
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block execution context handed to every action by the host runtime.
///
/// The settlement core never reads the wall clock; all time derives from
/// the block timestamp agreed on by consensus, which keeps re-execution of
/// the same transaction log bit-identical.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCtx {
    /// Current block height.
    pub height: u64,
    /// Block timestamp, unix seconds.
    pub time_secs: i64,
}

impl BlockCtx {
    pub fn new(height: u64, time_secs: i64) -> Self {
        Self { height, time_secs }
    }

    /// Block timestamp truncated to whole minutes since the unix epoch.
    pub fn minute(&self) -> i64 {
        self.time_secs / 60
    }
}

/// SHA-256 content commitment, hex-encoded.
///
/// Used for problem descriptors and synthetic problem seeds.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
