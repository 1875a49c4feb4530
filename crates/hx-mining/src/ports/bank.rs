//! Bank ledger capability
//!
//! The host chain owns account balances; the settlement core only moves
//! value between user accounts and its module account, and mints/burns
//! against the module account. All methods are synchronous and either
//! fully apply or fail without effect.

use shared_types::{Address, Amount};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Insufficient funds for {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: String,
        required: Amount,
        available: Amount,
    },

    #[error("Unknown module account: {module}")]
    UnknownModule { module: String },
}

/// Token movement capability scoped to one module account.
pub trait BankLedger {
    /// Escrow: debit a user account, credit the module account.
    fn send_from_account_to_module(
        &mut self,
        from: &Address,
        module: &str,
        amount: Amount,
    ) -> Result<(), BankError>;

    /// Payout: debit the module account, credit a user account.
    fn send_from_module_to_account(
        &mut self,
        module: &str,
        to: &Address,
        amount: Amount,
    ) -> Result<(), BankError>;

    /// Create new supply in the module account.
    fn mint(&mut self, module: &str, amount: Amount) -> Result<(), BankError>;

    /// Destroy supply held by the module account.
    fn burn(&mut self, module: &str, amount: Amount) -> Result<(), BankError>;

    fn balance_of(&self, account: &Address) -> Amount;

    fn module_balance(&self, module: &str) -> Amount;
}
