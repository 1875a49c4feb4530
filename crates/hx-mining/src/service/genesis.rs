//! Genesis import/export.
//!
//! The host calls `init_genesis` once at chain start (or state-sync
//! import) and `export_genesis` when writing a state snapshot. Export
//! iterates every store in key order, so two nodes at the same height
//! serialize byte-identical documents.

use tracing::info;

use crate::domain::GenesisState;
use crate::error::Result;
use crate::ports::bank::BankLedger;
use crate::ports::stores::SettlementStore;
use crate::ports::verifier::ProofVerifier;
use crate::service::MiningService;

impl GenesisState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl<S, B, V> MiningService<S, B, V>
where
    S: SettlementStore,
    B: BankLedger,
    V: ProofVerifier,
{
    /// Load module state from a genesis document.
    pub fn init_genesis(&mut self, genesis: GenesisState) -> Result<()> {
        if let Some(params) = genesis.params {
            params.validate()?;
            self.params = params;
        }

        for job in genesis.jobs {
            self.state.put_job(job);
        }
        for docking_job in genesis.docking_jobs {
            self.state.put_docking_job(docking_job);
        }
        for checkpoint in genesis.checkpoints {
            self.state.put_checkpoint(checkpoint);
        }
        self.state
            .set_last_checkpoint_id(genesis.last_checkpoint_id);
        self.state
            .set_validator_reward_pool(genesis.validator_reward_pool);
        self.state.set_emission_escrow(genesis.emission_escrow);
        if genesis.current_problem_size > 0 {
            self.state.set_problem_size(genesis.current_problem_size);
        }
        self.state
            .set_background_job_count(genesis.background_job_count);

        info!(
            target: "hx-mining",
            problem_size = self.state.problem_size(),
            escrow = self.state.emission_escrow(),
            "mining module initialized"
        );
        Ok(())
    }

    /// Serialize module state for a chain export.
    pub fn export_genesis(&self) -> GenesisState {
        let last_checkpoint_id = self.state.last_checkpoint_id();
        let checkpoints = (1..=last_checkpoint_id)
            .filter_map(|id| self.state.checkpoint(id))
            .collect();

        GenesisState {
            params: Some(self.params.clone()),
            jobs: self.state.jobs(),
            docking_jobs: self.state.docking_jobs(),
            checkpoints,
            last_checkpoint_id,
            validator_reward_pool: self.state.validator_reward_pool(),
            emission_escrow: self.state.emission_escrow(),
            current_problem_size: self.state.problem_size(),
            background_job_count: self.state.background_job_count(),
        }
    }
}
