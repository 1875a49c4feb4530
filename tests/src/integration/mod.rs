//! Cross-module settlement flows.

pub mod background_scheduler;
pub mod docking_flow;
pub mod emission_schedule;
pub mod token_flow;

use std::sync::Once;

use hx_mining::adapters::{InMemoryBank, InMemoryState, StaticVerifier};
use hx_mining::{MiningService, Params};
use shared_types::{Address, Amount, BlockCtx};

static TRACING: Once = Once::new();

/// Opt-in log capture: `HX_TEST_LOG=debug cargo test -p hx-tests`.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_env("HX_TEST_LOG"))
            .try_init();
    });
}

pub type TestService = MiningService<InMemoryState, InMemoryBank, StaticVerifier>;

pub const CUSTOMER: &str = "helix1w8n0qfhyu4ywufc9dpe2mpx48kyz4lhz";
pub const MINER_1: &str = "helix109vzpgxnm8mjye50yaf4vj8yp59he3ac";
pub const MINER_2: &str = "helix1qpzry9x8gf2tvdw0s3jn54khce6mua7l";
pub const MINER_3: &str = "helix1zzzzry9x8gf2tvdw0s3jn54khce6mua7";

pub fn addr(raw: &str) -> Address {
    Address::parse(raw).expect("test addresses are valid")
}

/// Service over fresh in-memory adapters with funded accounts.
pub fn service_with_balances(balances: &[(&str, Amount)]) -> TestService {
    init_tracing();
    let mut bank = InMemoryBank::new();
    for (account, amount) in balances {
        bank.set_balance(&addr(account), *amount);
    }
    MiningService::new(
        InMemoryState::new(),
        bank,
        StaticVerifier::accepting(),
        Params::default(),
    )
    .expect("default params are valid")
}

pub fn service() -> TestService {
    service_with_balances(&[(CUSTOMER, 10_000_000)])
}

/// Block context at two-second blocks from a fixed chain start.
pub fn block(height: u64) -> BlockCtx {
    BlockCtx::new(height, 1_700_000_000 + height as i64 * 2)
}
