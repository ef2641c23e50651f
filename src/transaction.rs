use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.pad("Deposit"),
            TransactionKind::Withdrawal => f.pad("Withdrawal"),
        }
    }
}

/// A completed deposit or withdrawal. Only [`crate::account::Account`] creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub timestamp: DateTime<Local>,
    pub details: Option<String>,
}

impl Transaction {
    pub(crate) fn new(
        kind: TransactionKind,
        amount: Decimal,
        balance_after: Decimal,
        details: Option<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            balance_after,
            timestamp: Local::now(),
            details,
        }
    }

    /// Timestamp in the layout of C's `ctime`, e.g. `Fri Oct 16 09:07:00 2026`.
    pub fn timestamp_display(&self) -> String {
        self.timestamp.format("%a %b %e %H:%M:%S %Y").to_string()
    }
}
