use crate::account::Account;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::transaction::Transaction;
use crate::transfer;
use rust_decimal::Decimal;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    /// Holds the account number; the ledger keeps ownership of the account.
    LoggedIn(String),
}

/// Which account, if any, the terminal is currently acting for.
///
/// Every ledger operation goes through here so that nothing can touch an
/// account while logged out.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    /// Unknown account and wrong PIN produce the same error, and either one
    /// ends any session that was active.
    pub fn login<'a>(
        &mut self,
        ledger: &'a Ledger,
        number: &str,
        pin: &str,
    ) -> Result<&'a Account> {
        match ledger.find(number) {
            Some(account) if account.verify_pin(pin) => {
                info!(account = number, "logged in");
                self.state = SessionState::LoggedIn(account.number().to_owned());
                Ok(account)
            }
            _ => {
                warn!("authentication failed");
                self.state = SessionState::LoggedOut;
                Err(Error::AuthenticationFailed)
            }
        }
    }

    pub fn logout(&mut self) {
        if let SessionState::LoggedIn(number) = &self.state {
            info!(account = %number, "logged out");
        }
        self.state = SessionState::LoggedOut;
    }

    pub fn current<'a>(&self, ledger: &'a Ledger) -> Result<&'a Account> {
        ledger
            .find(self.current_number()?)
            .ok_or(Error::NotAuthenticated)
    }

    pub fn balance(&self, ledger: &Ledger) -> Result<Decimal> {
        self.current(ledger).map(Account::balance)
    }

    pub fn deposit(&self, ledger: &mut Ledger, amount: Decimal) -> Result<Decimal> {
        let number = self.current_number()?;
        let balance = ledger
            .find_mut(number)
            .ok_or(Error::NotAuthenticated)?
            .deposit(amount, None)?;

        info!(account = number, %amount, "deposit");
        Ok(balance)
    }

    pub fn withdraw(&self, ledger: &mut Ledger, amount: Decimal) -> Result<Decimal> {
        let number = self.current_number()?;
        let balance = ledger
            .find_mut(number)
            .ok_or(Error::NotAuthenticated)?
            .withdraw(amount, None)?;

        info!(account = number, %amount, "withdrawal");
        Ok(balance)
    }

    pub fn transfer(&self, ledger: &mut Ledger, to: &str, amount: Decimal) -> Result<()> {
        let from = self.current_number()?;
        transfer::transfer(ledger, from, to, amount)
    }

    pub fn history<'a>(
        &self,
        ledger: &'a Ledger,
    ) -> Result<impl Iterator<Item = &'a Transaction> + 'a> {
        self.current(ledger).map(|account| account.history())
    }

    fn current_number(&self) -> Result<&str> {
        match &self.state {
            SessionState::LoggedIn(number) => Ok(number),
            SessionState::LoggedOut => Err(Error::NotAuthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_seed;
    use rust_decimal_macros::dec;

    #[test]
    fn login() {
        let mut test = SessionTest::default();

        test.login("1001", "1234", Ok(()));

        test.expect_logged_in("1001");

        test.run();
    }

    #[test]
    fn login_wrong_pin() {
        let mut test = SessionTest::default();

        test.login("1001", "0000", Err(Error::AuthenticationFailed));

        test.expect_logged_out();

        test.run();
    }

    #[test]
    fn login_unknown_account_is_indistinguishable_from_wrong_pin() {
        let ledger = Ledger::from_seed(default_seed()).unwrap();
        let mut session = Session::new();

        let unknown = session.login(&ledger, "9999", "wrong").unwrap_err();
        let wrong_pin = session.login(&ledger, "1003", "wrong").unwrap_err();

        assert_eq!(unknown, wrong_pin);
        assert_eq!(unknown.to_string(), wrong_pin.to_string());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn failed_login_ends_active_session() {
        let mut test = SessionTest::default();

        test.login("1001", "1234", Ok(()));
        test.login("1002", "1234", Err(Error::AuthenticationFailed));
        test.deposit(dec!(10), Err(Error::NotAuthenticated));

        test.expect_logged_out();

        test.run();
    }

    #[test]
    fn logout_is_idempotent() {
        let mut test = SessionTest::default();

        test.login("1001", "1234", Ok(()));
        test.logout();
        test.logout();

        test.expect_logged_out();

        test.run();
    }

    #[test]
    fn relogin_after_logout_reuses_ledger() {
        let mut test = SessionTest::default();

        test.login("1004", "3829", Ok(()));
        test.deposit(dec!(50), Ok(dec!(150.00)));
        test.logout();
        test.login("1004", "3829", Ok(()));
        test.balance(Ok(dec!(150.00)));

        test.expect_logged_in("1004");

        test.run();
    }

    #[test]
    fn operations_require_login() {
        let mut test = SessionTest::default();

        test.balance(Err(Error::NotAuthenticated));
        test.deposit(dec!(10), Err(Error::NotAuthenticated));
        test.withdraw(dec!(10), Err(Error::NotAuthenticated));
        test.transfer("1002", dec!(10), Err(Error::NotAuthenticated));
        test.history(Err(Error::NotAuthenticated));

        test.expect_logged_out();

        test.run();
    }

    #[test]
    fn withdraw_more_than_balance() {
        let mut test = SessionTest::default();

        test.login("1002", "5678", Ok(()));
        test.withdraw(dec!(5000), Err(Error::InsufficientFunds));
        test.balance(Ok(dec!(3000.00)));
        test.history(Ok(0));

        test.run();
    }

    #[test]
    fn negative_deposit() {
        let mut test = SessionTest::default();

        test.login("1004", "3829", Ok(()));
        test.deposit(dec!(-5), Err(Error::InvalidAmount));
        test.balance(Ok(dec!(100.00)));

        test.run();
    }

    #[test]
    fn transfer_to_self() {
        let mut test = SessionTest::default();

        test.login("1001", "1234", Ok(()));
        test.transfer("1001", dec!(10), Err(Error::SameAccount));
        test.balance(Ok(dec!(5000000.00)));

        test.run();
    }

    #[test]
    fn transfer_from_current_account() {
        let mut test = SessionTest::default();

        test.login("1001", "1234", Ok(()));
        test.transfer("1002", dec!(1000.00), Ok(()));
        test.balance(Ok(dec!(4999000.00)));
        test.history(Ok(1));
        test.login("1002", "5678", Ok(()));
        test.balance(Ok(dec!(4000.00)));
        test.history(Ok(1));

        test.run();
    }

    #[test]
    fn deposit_and_withdraw() {
        let mut test = SessionTest::default();

        test.login("1006", "2378", Ok(()));
        test.deposit(dec!(20.25), Ok(dec!(20.25)));
        test.withdraw(dec!(20.25), Ok(Decimal::ZERO));
        test.history(Ok(2));

        test.run();
    }

    #[derive(Debug, Clone)]
    enum Step {
        Login(&'static str, &'static str, Result<()>),
        Logout,
        Balance(Result<Decimal>),
        Deposit(Decimal, Result<Decimal>),
        Withdraw(Decimal, Result<Decimal>),
        Transfer(&'static str, Decimal, Result<()>),
        History(Result<usize>),
    }

    #[derive(Debug, Default)]
    struct SessionTest {
        steps: Vec<Step>,
        expected_state: Option<SessionState>,
    }

    impl SessionTest {
        fn login(&mut self, number: &'static str, pin: &'static str, result: Result<()>) {
            self.steps.push(Step::Login(number, pin, result));
        }

        fn logout(&mut self) {
            self.steps.push(Step::Logout);
        }

        fn balance(&mut self, result: Result<Decimal>) {
            self.steps.push(Step::Balance(result));
        }

        fn deposit(&mut self, amount: Decimal, result: Result<Decimal>) {
            self.steps.push(Step::Deposit(amount, result));
        }

        fn withdraw(&mut self, amount: Decimal, result: Result<Decimal>) {
            self.steps.push(Step::Withdraw(amount, result));
        }

        fn transfer(&mut self, to: &'static str, amount: Decimal, result: Result<()>) {
            self.steps.push(Step::Transfer(to, amount, result));
        }

        fn history(&mut self, result: Result<usize>) {
            self.steps.push(Step::History(result));
        }

        fn expect_logged_in(&mut self, number: &str) {
            self.expected_state = Some(SessionState::LoggedIn(number.to_owned()));
        }

        fn expect_logged_out(&mut self) {
            self.expected_state = Some(SessionState::LoggedOut);
        }

        fn run(&self) {
            let mut ledger = Ledger::from_seed(default_seed()).unwrap();
            let mut session = Session::new();

            for step in &self.steps {
                match step {
                    Step::Login(number, pin, expected) => {
                        let actual = session.login(&ledger, number, pin).map(|account| {
                            assert_eq!(account.number(), *number);
                        });
                        assert_eq!(&actual, expected);
                    }
                    Step::Logout => {
                        session.logout();
                        assert_eq!(session.state(), &SessionState::LoggedOut);
                    }
                    Step::Balance(expected) => {
                        assert_eq!(&session.balance(&ledger), expected);
                    }
                    Step::Deposit(amount, expected) => {
                        assert_eq!(&session.deposit(&mut ledger, *amount), expected);
                    }
                    Step::Withdraw(amount, expected) => {
                        assert_eq!(&session.withdraw(&mut ledger, *amount), expected);
                    }
                    Step::Transfer(to, amount, expected) => {
                        assert_eq!(&session.transfer(&mut ledger, to, *amount), expected);
                    }
                    Step::History(expected) => {
                        let actual = session.history(&ledger).map(Iterator::count);
                        assert_eq!(&actual, expected);
                    }
                }
            }

            if let Some(state) = &self.expected_state {
                assert_eq!(session.state(), state);
            }
        }
    }
}
