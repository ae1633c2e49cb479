//! Account storage.
//!
//! The account manager only talks to storage through [`AccountStore`], so a
//! deployment can back accounts with whatever it likes. The crate ships an
//! in-memory implementation, which is what tests and the CLI use.
//!
//! Accounts are keyed by email address: a store never holds two accounts
//! with the same address.

pub mod memory;

pub use memory::InMemoryAccountStore;

use crate::models::Account;

/// Registry of accounts keyed by email address.
pub trait AccountStore {
    /// Insert an account under its email address.
    ///
    /// Returns the account previously stored under that address, if any.
    fn add(&mut self, account: Account) -> Option<Account>;

    /// Look up an account by email address.
    fn find_by_email(&self, email: &str) -> Option<&Account>;

    /// Look up an account by email address for modification.
    fn find_by_email_mut(&mut self, email: &str) -> Option<&mut Account>;

    /// Find the account whose pending activation code is `code`.
    fn find_by_activation_code(&self, code: &str) -> Option<&Account>;

    /// Find the account whose pending activation code is `code`, for modification.
    fn find_by_activation_code_mut(&mut self, code: &str) -> Option<&mut Account>;

    /// Find the account whose pending reset code is `code`, for modification.
    fn find_by_reset_code_mut(&mut self, code: &str) -> Option<&mut Account>;

    /// Remove and return the account stored under `email`.
    fn remove(&mut self, email: &str) -> Option<Account>;

    /// All stored accounts, ordered by email address.
    fn list_all(&self) -> Vec<&Account>;

    /// Whether an account is stored under `email`.
    fn contains(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    /// Number of stored accounts.
    fn len(&self) -> usize {
        self.list_all().len()
    }

    /// Whether the store holds no accounts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
