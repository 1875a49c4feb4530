//! Proof verification capability
//!
//! Proof verification runs outside consensus, in a zero-knowledge
//! verifier service reached with a 30-second request timeout. The
//! settlement core talks to it through this synchronous interface; a
//! transport failure or timeout surfaces as [`VerifierError::Unavailable`]
//! and the configured [`crate::config::VerifierPolicy`] decides what that
//! means for the submission. Both outcomes are deterministic functions of
//! the response, never of timing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verification request for one proof submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub job_id: String,
    /// Commitment over the problem the job was posted with, hex.
    pub problem_commitment: String,
    /// Commitment over the submitted solution, hex.
    pub solution_commitment: String,
    pub claimed_energy: i64,
    pub threshold: i64,
    /// Opaque proof bytes.
    #[serde(with = "hex_bytes")]
    pub proof: Vec<u8>,
}

/// Verifier verdict on one submission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOutcome {
    /// Proof checks out against the commitments.
    pub valid: bool,
    /// Energy the verifier extracted from the proof.
    pub energy: i64,
    /// Whether that energy clears the job threshold.
    pub meets_threshold: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifierError {
    /// The verifier could not be reached or did not answer in time.
    #[error("Verifier unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Synchronous proof-verification capability.
pub trait ProofVerifier {
    fn verify(&self, request: &VerifyRequest) -> Result<VerifyOutcome, VerifierError>;
}

/// Hex (de)serialization for proof bytes, matching the verifier wire form.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}
