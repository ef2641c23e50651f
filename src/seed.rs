use crate::error::SeedError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

/// One pre-provisioned account, as read from the seed list.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub account_number: String,
    pub pin: String,
    pub holder_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_balance: Decimal,
}

impl SeedAccount {
    pub fn new(
        account_number: &str,
        pin: &str,
        holder_name: &str,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            account_number: account_number.to_owned(),
            pin: pin.to_owned(),
            holder_name: holder_name.to_owned(),
            initial_balance,
        }
    }
}

/// Accounts the terminal starts with when no seed file is given.
pub fn default_seed() -> Vec<SeedAccount> {
    vec![
        SeedAccount::new(
            "1001",
            "1234",
            "Ehindero Henry",
            Decimal::new(500_000_000, 2),
        ),
        SeedAccount::new("1002", "5678", "Juria Momoh", Decimal::new(300_000, 2)),
        SeedAccount::new("1003", "9999", "Stephen", Decimal::new(1_000_000, 2)),
        SeedAccount::new("1004", "3829", "Ajao Michael", Decimal::new(10_000, 2)),
        SeedAccount::new("1005", "4783", "Deji", Decimal::new(1_000_000, 2)),
        SeedAccount::new("1006", "2378", "Omotola", Decimal::new(0, 2)),
    ]
}

/// Reads `account_number,pin,holder_name,initial_balance` rows.
///
/// Any malformed row fails the whole load; a terminal must not start with a
/// partial set of accounts.
pub fn load_seed<P>(path: P) -> Result<Vec<SeedAccount>, SeedError>
where
    P: AsRef<Path>,
{
    let file = File::open(path).map_err(csv::Error::from)?;
    read_seed(file)
}

pub fn read_seed<R: Read>(reader: R) -> Result<Vec<SeedAccount>, SeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seed = Vec::new();
    for account in reader.deserialize::<SeedAccount>() {
        seed.push(account?);
    }

    Ok(seed)
}
