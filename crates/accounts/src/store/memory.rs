//! In-memory account store.

use std::collections::BTreeMap;

use crate::models::Account;

use super::AccountStore;

/// Account store backed by a sorted map.
///
/// Iteration order is by email address, so listings are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryAccountStore {
    accounts: BTreeMap<String, Account>,
}

impl InMemoryAccountStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }
}

impl FromIterator<Account> for InMemoryAccountStore {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        let mut store = Self::new();
        for account in iter {
            store.add(account);
        }
        store
    }
}

impl AccountStore for InMemoryAccountStore {
    fn add(&mut self, account: Account) -> Option<Account> {
        self.accounts
            .insert(account.email_address().as_str().to_owned(), account)
    }

    fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.get(email)
    }

    fn find_by_email_mut(&mut self, email: &str) -> Option<&mut Account> {
        self.accounts.get_mut(email)
    }

    fn find_by_activation_code(&self, code: &str) -> Option<&Account> {
        self.accounts.values().find(|account| {
            account
                .activation_code
                .as_ref()
                .is_some_and(|pending| pending.matches(code))
        })
    }

    fn find_by_activation_code_mut(&mut self, code: &str) -> Option<&mut Account> {
        self.accounts.values_mut().find(|account| {
            account
                .activation_code
                .as_ref()
                .is_some_and(|pending| pending.matches(code))
        })
    }

    fn find_by_reset_code_mut(&mut self, code: &str) -> Option<&mut Account> {
        self.accounts.values_mut().find(|account| {
            account
                .reset_code
                .as_ref()
                .is_some_and(|pending| pending.matches(code))
        })
    }

    fn remove(&mut self, email: &str) -> Option<Account> {
        self.accounts.remove(email)
    }

    fn list_all(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}
