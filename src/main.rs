mod account;
mod error;
mod ledger;
mod logging;
mod seed;
mod session;
mod shell;
mod transaction;
mod transfer;

use anyhow::Context;
use ledger::Ledger;
use shell::Shell;
use std::io;

fn main() -> anyhow::Result<()> {
    logging::init();

    let seed = match std::env::args().nth(1) {
        Some(path) => seed::load_seed(&path)
            .with_context(|| format!("failed to load accounts from {path}"))?,
        None => seed::default_seed(),
    };
    let ledger = Ledger::from_seed(seed.clone()).context("invalid account seed")?;

    Shell::new(ledger, io::stdin().lock(), io::stdout().lock())
        .with_test_accounts(seed)
        .run()
        .context("terminal input/output failed")?;

    Ok(())
}
