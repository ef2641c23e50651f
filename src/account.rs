use crate::error::{Error, Result};
use crate::transaction::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: String,
    pin: String,
    holder: String,
    opening_balance: Decimal,
    balance: Decimal,
    history: Vec<Transaction>,
}

impl Account {
    pub fn new(number: &str, pin: &str, holder: &str, opening_balance: Decimal) -> Self {
        Self {
            number: number.to_owned(),
            pin: pin.to_owned(),
            holder: holder.to_owned(),
            opening_balance,
            balance: opening_balance,
            history: Vec::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Plaintext comparison, no timing guarantees.
    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin == pin
    }

    pub fn deposit(&mut self, amount: Decimal, details: Option<String>) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            debug!(account = %self.number, %amount, "deposit rejected");
            return Err(Error::InvalidAmount);
        }

        let Some(balance) = self.balance.checked_add(amount) else {
            debug!(account = %self.number, %amount, "deposit overflows balance");
            return Err(Error::InvalidAmount);
        };

        self.balance = balance;
        self.history.push(Transaction::new(
            TransactionKind::Deposit,
            amount,
            self.balance,
            details,
        ));

        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: Decimal, details: Option<String>) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            debug!(account = %self.number, %amount, "withdrawal rejected");
            return Err(Error::InvalidAmount);
        }

        if amount > self.balance {
            debug!(account = %self.number, %amount, "withdrawal exceeds balance");
            return Err(Error::InsufficientFunds);
        }

        self.balance -= amount;
        self.history.push(Transaction::new(
            TransactionKind::Withdrawal,
            amount,
            self.balance,
            details,
        ));

        Ok(self.balance)
    }

    /// Entries in the order they were recorded. Borrowing, so it can be called again.
    pub fn history(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.history.iter()
    }

    /// Drops the most recent entry and restores the balance recorded before it.
    pub(crate) fn undo_last(&mut self) -> Option<Transaction> {
        let undone = self.history.pop()?;
        self.balance = self
            .history
            .last()
            .map_or(self.opening_balance, |previous| previous.balance_after);

        Some(undone)
    }
}
