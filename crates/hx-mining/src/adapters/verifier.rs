//! Test verifiers
//!
//! The production verifier is an external zero-knowledge service behind
//! the host's transport. These adapters let the settlement logic be
//! exercised without network access: one fixed response, or a script of
//! per-request responses.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::ports::verifier::{ProofVerifier, VerifierError, VerifyOutcome, VerifyRequest};

/// Always answers with the same verdict.
#[derive(Clone, Debug)]
pub struct StaticVerifier {
    response: Result<VerifyOutcome, VerifierError>,
}

impl StaticVerifier {
    /// Accept every proof, echoing the claimed energy.
    pub fn accepting() -> Self {
        Self {
            response: Ok(VerifyOutcome {
                valid: true,
                energy: 0,
                meets_threshold: true,
            }),
        }
    }

    /// Reject every proof as invalid.
    pub fn rejecting() -> Self {
        Self {
            response: Ok(VerifyOutcome {
                valid: false,
                energy: 0,
                meets_threshold: false,
            }),
        }
    }

    /// Simulate an unreachable verifier service.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            response: Err(VerifierError::Unavailable {
                reason: reason.to_string(),
            }),
        }
    }
}

impl ProofVerifier for StaticVerifier {
    fn verify(&self, request: &VerifyRequest) -> Result<VerifyOutcome, VerifierError> {
        self.response.clone().map(|mut outcome| {
            outcome.energy = request.claimed_energy;
            outcome
        })
    }
}

/// Answers from a queue of scripted responses, then goes unavailable.
#[derive(Debug, Default)]
pub struct ScriptedVerifier {
    script: RefCell<VecDeque<Result<VerifyOutcome, VerifierError>>>,
}

impl ScriptedVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<VerifyOutcome, VerifierError>) {
        self.script.borrow_mut().push_back(response);
    }
}

impl ProofVerifier for ScriptedVerifier {
    fn verify(&self, _request: &VerifyRequest) -> Result<VerifyOutcome, VerifierError> {
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Err(VerifierError::Unavailable {
                    reason: "script exhausted".to_string(),
                })
            })
    }
}
