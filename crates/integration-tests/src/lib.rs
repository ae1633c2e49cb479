//! Integration tests for the kitchen account system.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kitchen-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `account_lifecycle` - Registration through login, reset and administration
//! - `orders_and_receipts` - Orders, receipts and the email gateway

#![cfg_attr(not(test), forbid(unsafe_code))]

use kitchen_accounts::{
    Account, AccountManager, AccountsConfig, InMemoryAccountStore, MemoryMailer, OutgoingEmail,
    Registration,
};
use kitchen_core::{Email, Role};

/// Account manager over an in-memory store and outbox.
pub type TestManager = AccountManager<InMemoryAccountStore, MemoryMailer>;

/// Shared fixture for integration tests.
pub struct TestContext {
    pub manager: TestManager,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Fresh context with no accounts and an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            manager: AccountManager::in_memory(AccountsConfig::default()),
        }
    }

    /// Sign-up details for Greg, the customer used throughout the tests.
    #[must_use]
    pub const fn greg() -> Registration<'static> {
        Registration {
            first_name: Some("Greg"),
            last_name: Some("Gregton"),
            email: "greg.ton@example.com",
            home_address: Some("46 Greg Ave"),
            password: "Password1",
        }
    }

    /// The most recent email sent to `to`.
    ///
    /// # Panics
    ///
    /// Panics if nothing was sent to `to`.
    #[must_use]
    pub fn last_email_to(&self, to: &str) -> OutgoingEmail {
        self.manager
            .mailer()
            .last_sent_to(to)
            .unwrap_or_else(|| panic!("no email sent to {to}"))
    }

    /// Extract the `code` query parameter from the first link in `email`.
    ///
    /// # Panics
    ///
    /// Panics if the email carries no code.
    #[must_use]
    pub fn code_from(email: &OutgoingEmail) -> String {
        email
            .body
            .split_whitespace()
            .find_map(|word| word.split_once("?code=").map(|(_, code)| code.to_owned()))
            .unwrap_or_else(|| panic!("no code in email: {}", email.body))
    }

    /// Add an active account with `password` and `role`.
    ///
    /// # Panics
    ///
    /// Panics if `email` is invalid or the password cannot be hashed.
    pub fn add_active(&mut self, email: &str, password: &str, role: Role) {
        let email = Email::parse(email).unwrap_or_else(|e| panic!("invalid email {email}: {e}"));
        let mut account = Account::new(email)
            .with_password(password)
            .unwrap_or_else(|e| panic!("hashing failed: {e}"));
        account.is_locked = false;
        account.role = role;
        self.manager.add_account(account);
    }
}
