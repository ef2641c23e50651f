use crate::error::Error;
use crate::ledger::Ledger;
use crate::seed::SeedAccount;
use crate::session::Session;
use rust_decimal::Decimal;
use std::io::{self, BufRead, ErrorKind, Write};
use std::str::FromStr;

/// Interactive menu front end. Holds the ledger and the one session of the run.
pub struct Shell<R, W> {
    ledger: Ledger,
    session: Session,
    test_accounts: Vec<SeedAccount>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ledger: Ledger, input: R, output: W) -> Self {
        Self {
            ledger,
            session: Session::new(),
            test_accounts: Vec::new(),
            input,
            output,
        }
    }

    /// Credentials shown on the welcome screen.
    pub fn with_test_accounts(mut self, accounts: Vec<SeedAccount>) -> Self {
        self.test_accounts = accounts;
        self
    }

    /// Runs until the user declines another login or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        match self.login_loop() {
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                self.session.logout();
                writeln!(self.output, "\n\nThank you for using our ATM system!")?;
                self.output.flush()
            }
            other => other,
        }
    }

    fn login_loop(&mut self) -> io::Result<()> {
        writeln!(self.output, "========================================")?;
        writeln!(self.output, "   WELCOME TO ATM SIMULATION SYSTEM")?;
        writeln!(self.output, "========================================")?;
        self.show_test_accounts()?;

        loop {
            if self.authenticate()? {
                self.menu()?;
            }

            let choice = self.prompt("\nDo you want to login with another account? (y/n): ")?;
            if !choice.eq_ignore_ascii_case("y") {
                writeln!(self.output, "\nThank you for using our ATM system!")?;
                return self.output.flush();
            }
        }
    }

    fn show_test_accounts(&mut self) -> io::Result<()> {
        if self.test_accounts.is_empty() {
            return Ok(());
        }

        writeln!(self.output, "\n========== TEST ACCOUNTS ==========")?;
        for account in &self.test_accounts {
            writeln!(
                self.output,
                "Account: {}, PIN: {}, Balance: ${:.2}",
                account.account_number, account.pin, account.initial_balance
            )?;
        }
        writeln!(self.output, "===================================")
    }

    fn authenticate(&mut self) -> io::Result<bool> {
        writeln!(self.output, "\n========== ATM LOGIN ==========")?;
        let number = self.prompt("Enter Account Number: ")?;
        let pin = self.prompt("Enter PIN: ")?;

        match self.session.login(&self.ledger, &number, &pin) {
            Ok(account) => {
                writeln!(self.output, "\nLogin successful! Welcome, {}!", account.holder())?;
                Ok(true)
            }
            Err(e) => {
                writeln!(self.output, "\nError: {e}")?;
                writeln!(self.output, "Please try again.")?;
                Ok(false)
            }
        }
    }

    fn menu(&mut self) -> io::Result<()> {
        while self.session.is_logged_in() {
            writeln!(self.output, "\n========== ATM MAIN MENU ==========")?;
            writeln!(self.output, "1. Balance Inquiry")?;
            writeln!(self.output, "2. Deposit")?;
            writeln!(self.output, "3. Withdrawal")?;
            writeln!(self.output, "4. Transfer Money")?;
            writeln!(self.output, "5. Transaction History")?;
            writeln!(self.output, "6. Logout")?;
            writeln!(self.output, "===================================")?;

            let choice = self.prompt("Enter your choice: ")?;
            match choice.parse::<u8>() {
                Ok(1) => self.check_balance()?,
                Ok(2) => self.deposit()?,
                Ok(3) => self.withdraw()?,
                Ok(4) => self.transfer()?,
                Ok(5) => self.history()?,
                Ok(6) => {
                    writeln!(self.output, "\nThank you for using our ATM. Goodbye!")?;
                    self.session.logout();
                }
                Ok(_) => writeln!(self.output, "\nInvalid choice! Please try again.")?,
                Err(_) => writeln!(self.output, "Invalid input! Please enter a number.")?,
            }
        }

        Ok(())
    }

    fn check_balance(&mut self) -> io::Result<()> {
        let account = match self.session.current(&self.ledger) {
            Ok(account) => account,
            Err(e) => return self.report(e),
        };

        writeln!(self.output, "\n========== BALANCE INQUIRY ==========")?;
        writeln!(self.output, "Account Holder: {}", account.holder())?;
        writeln!(self.output, "Account Number: {}", account.number())?;
        writeln!(self.output, "Current Balance: ${:.2}", account.balance())?;
        writeln!(self.output, "=====================================")
    }

    fn deposit(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n========== DEPOSIT ==========")?;
        let Some(amount) = self.read_amount("Enter deposit amount: $")? else {
            return Ok(());
        };

        match self.session.deposit(&mut self.ledger, amount) {
            Ok(balance) => {
                writeln!(self.output, "\nDeposit successful!")?;
                writeln!(self.output, "New Balance: ${balance:.2}")
            }
            Err(e) => self.report(e),
        }
    }

    fn withdraw(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n========== WITHDRAWAL ==========")?;
        self.show_current_balance()?;
        let Some(amount) = self.read_amount("Enter withdrawal amount: $")? else {
            return Ok(());
        };

        match self.session.withdraw(&mut self.ledger, amount) {
            Ok(balance) => {
                writeln!(self.output, "\nWithdrawal successful!")?;
                writeln!(self.output, "New Balance: ${balance:.2}")
            }
            Err(e) => self.report(e),
        }
    }

    fn transfer(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n========== TRANSFER MONEY ==========")?;
        self.show_current_balance()?;
        let to = self.prompt("Enter recipient account number: ")?;

        // Recipient problems are reported before asking for an amount.
        let current = match self.session.current(&self.ledger) {
            Ok(account) => account.number().to_owned(),
            Err(e) => return self.report(e),
        };
        let recipient = match self.ledger.find(&to) {
            Some(recipient) if recipient.number() == current => {
                return self.report(Error::SameAccount)
            }
            Some(recipient) => recipient.holder().to_owned(),
            None => return self.report(Error::AccountNotFound),
        };

        writeln!(self.output, "Recipient: {recipient}")?;
        let Some(amount) = self.read_amount("Enter transfer amount: $")? else {
            return Ok(());
        };

        if let Err(e) = self.session.transfer(&mut self.ledger, &to, amount) {
            return self.report(e);
        }

        let balance = match self.session.balance(&self.ledger) {
            Ok(balance) => balance,
            Err(e) => return self.report(e),
        };
        writeln!(self.output, "\n========== TRANSFER SUCCESSFUL ==========")?;
        writeln!(self.output, "Transferred: ${amount:.2}")?;
        writeln!(self.output, "To: {recipient}")?;
        writeln!(self.output, "Your New Balance: ${balance:.2}")?;
        writeln!(self.output, "=========================================")
    }

    fn history(&mut self) -> io::Result<()> {
        let entries = self
            .session
            .history(&self.ledger)
            .map(Iterator::collect::<Vec<_>>);
        let entries = match entries {
            Ok(entries) => entries,
            Err(e) => return self.report(e),
        };

        if entries.is_empty() {
            return writeln!(self.output, "\n=== No transactions found ===");
        }

        writeln!(self.output, "\n========== TRANSACTION HISTORY ==========")?;
        writeln!(
            self.output,
            "{:<15}{:<15}{:<15}Details",
            "Type", "Amount", "Balance"
        )?;
        writeln!(self.output, "{}", "-".repeat(70))?;

        for entry in entries {
            writeln!(
                self.output,
                "{:<15}${:<14}${:<14}{}",
                entry.kind,
                format!("{:.2}", entry.amount),
                format!("{:.2}", entry.balance_after),
                entry.details.as_deref().unwrap_or_default()
            )?;
            writeln!(self.output, "{:45}{}", "", entry.timestamp_display())?;
        }

        writeln!(self.output, "=========================================")
    }

    fn show_current_balance(&mut self) -> io::Result<()> {
        match self.session.balance(&self.ledger) {
            Ok(balance) => writeln!(self.output, "Current Balance: ${balance:.2}"),
            Err(e) => self.report(e),
        }
    }

    /// `None` when the input is not a number; the user has already been told.
    fn read_amount(&mut self, text: &str) -> io::Result<Option<Decimal>> {
        let input = self.prompt(text)?;

        match Decimal::from_str(&input) {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                writeln!(self.output, "Error: Invalid input. Please enter a valid number.")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, e: Error) -> io::Result<()> {
        writeln!(self.output, "\nError: {e}")
    }

    /// Next trimmed input line. End of input surfaces as `UnexpectedEof`.
    fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "end of input"));
        }

        Ok(line.trim().to_owned())
    }
}
