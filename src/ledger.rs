use crate::account::Account;
use crate::error::SeedError;
use crate::seed::SeedAccount;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sole owner of every account for the run. The set is fixed once seeded.
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: BTreeMap<String, Account>,
}

impl Ledger {
    pub fn from_seed<I>(seed: I) -> Result<Self, SeedError>
    where
        I: IntoIterator<Item = SeedAccount>,
    {
        let mut accounts = BTreeMap::new();

        for entry in seed {
            if entry.account_number.is_empty() || entry.pin.is_empty() {
                return Err(SeedError::MissingCredential);
            }

            if entry.initial_balance < Decimal::ZERO {
                return Err(SeedError::NegativeBalance(entry.account_number));
            }

            if accounts.contains_key(&entry.account_number) {
                return Err(SeedError::DuplicateAccount(entry.account_number));
            }

            let account = Account::new(
                &entry.account_number,
                &entry.pin,
                &entry.holder_name,
                entry.initial_balance,
            );
            accounts.insert(entry.account_number, account);
        }

        Ok(Self { accounts })
    }

    pub fn find(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn find_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    /// Accounts in ascending account-number order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.values()
    }
}
