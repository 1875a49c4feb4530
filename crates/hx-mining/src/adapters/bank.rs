//! In-memory bank ledger
//!
//! Account and module balances as ordered maps. Matches the host bank's
//! semantics where the settlement core can observe them: transfers are
//! all-or-nothing, minting creates supply, burning destroys it.

use std::collections::BTreeMap;

use shared_types::{Address, Amount};

use crate::ports::bank::{BankError, BankLedger};

#[derive(Clone, Debug, Default)]
pub struct InMemoryBank {
    accounts: BTreeMap<Address, Amount>,
    modules: BTreeMap<String, Amount>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account balance (test fixture setup).
    pub fn set_balance(&mut self, account: &Address, amount: Amount) {
        self.accounts.insert(account.clone(), amount);
    }

    /// Sum of every account and module balance.
    pub fn total_supply(&self) -> Amount {
        self.accounts.values().sum::<Amount>() + self.modules.values().sum::<Amount>()
    }
}

impl BankLedger for InMemoryBank {
    fn send_from_account_to_module(
        &mut self,
        from: &Address,
        module: &str,
        amount: Amount,
    ) -> Result<(), BankError> {
        let balance = self.accounts.get(from).copied().unwrap_or(0);
        if balance < amount {
            return Err(BankError::InsufficientFunds {
                account: from.to_string(),
                required: amount,
                available: balance,
            });
        }
        self.accounts.insert(from.clone(), balance - amount);
        *self.modules.entry(module.to_string()).or_insert(0) += amount;
        Ok(())
    }

    fn send_from_module_to_account(
        &mut self,
        module: &str,
        to: &Address,
        amount: Amount,
    ) -> Result<(), BankError> {
        let balance = self.modules.get(module).copied().unwrap_or(0);
        if balance < amount {
            return Err(BankError::InsufficientFunds {
                account: module.to_string(),
                required: amount,
                available: balance,
            });
        }
        self.modules.insert(module.to_string(), balance - amount);
        *self.accounts.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }

    fn mint(&mut self, module: &str, amount: Amount) -> Result<(), BankError> {
        *self.modules.entry(module.to_string()).or_insert(0) += amount;
        Ok(())
    }

    fn burn(&mut self, module: &str, amount: Amount) -> Result<(), BankError> {
        let balance = self.modules.get(module).copied().unwrap_or(0);
        if balance < amount {
            return Err(BankError::InsufficientFunds {
                account: module.to_string(),
                required: amount,
                available: balance,
            });
        }
        self.modules.insert(module.to_string(), balance - amount);
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.accounts.get(account).copied().unwrap_or(0)
    }

    fn module_balance(&self, module: &str) -> Amount {
        self.modules.get(module).copied().unwrap_or(0)
    }
}
