use crate::error::{Error, Result};
use crate::ledger::Ledger;
use rust_decimal::Decimal;
use tracing::{error, info};

/// Moves `amount` from account `from` to account `to` as one unit.
///
/// Either both legs are recorded or neither is: every failure leaves both
/// accounts exactly as they were.
pub fn transfer(ledger: &mut Ledger, from: &str, to: &str, amount: Decimal) -> Result<()> {
    let recipient = ledger.find(to).ok_or(Error::AccountNotFound)?;
    let sender = ledger.find(from).ok_or(Error::AccountNotFound)?;

    if recipient.number() == sender.number() {
        return Err(Error::SameAccount);
    }

    let sender_details = format!(
        "Transfer to {} (Acc: {})",
        recipient.holder(),
        recipient.number()
    );
    let recipient_details = format!(
        "Transfer from {} (Acc: {})",
        sender.holder(),
        sender.number()
    );

    ledger
        .find_mut(from)
        .ok_or(Error::AccountNotFound)?
        .withdraw(amount, Some(sender_details))?;

    let deposited = ledger
        .find_mut(to)
        .ok_or(Error::AccountNotFound)
        .and_then(|recipient| recipient.deposit(amount, Some(recipient_details)));

    if let Err(e) = deposited {
        // Only reachable when the recipient's balance would overflow.
        error!(from, to, %amount, error = %e, "deposit leg failed, rolling back transfer");
        if let Some(sender) = ledger.find_mut(from) {
            sender.undo_last();
        }
        return Err(Error::TransferIncomplete);
    }

    info!(from, to, %amount, "transfer completed");
    Ok(())
}
