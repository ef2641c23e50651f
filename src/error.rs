use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid amount entered")]
    InvalidAmount,

    #[error("Insufficient funds in account")]
    InsufficientFunds,

    /// Unknown account and wrong PIN are deliberately the same variant.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Recipient account not found")]
    AccountNotFound,

    #[error("Cannot transfer to the same account")]
    SameAccount,

    #[error("Please log in first")]
    NotAuthenticated,

    /// The deposit leg of a transfer failed after the withdrawal leg succeeded,
    /// which only happens when the recipient's balance would overflow. The
    /// withdrawal has been rolled back.
    #[error("Transfer could not be completed")]
    TransferIncomplete,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("could not read account seed: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate account number {0}")]
    DuplicateAccount(String),

    #[error("account {0} has a negative opening balance")]
    NegativeBalance(String),

    #[error("account number and PIN must not be empty")]
    MissingCredential,
}
