//! Account domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kitchen_core::{AccountStatus, ActivationCode, Email, ResetCode, Role};

use crate::password::{self, PasswordHashError};

/// A registered account.
///
/// New accounts start locked, with no password, as a [`Role::Customer`].
/// The email address identifies the account in the store and can only be
/// changed through the account manager, which re-keys the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier of the account.
    email_address: Email,
    /// Argon2id PHC string, `None` until a password is set.
    #[serde(default)]
    password_hash: Option<String>,
    /// `true` until the account is activated.
    pub is_locked: bool,
    /// Whether the account has been administratively disabled.
    #[serde(default)]
    pub is_banned: bool,
    /// Pending activation token, cleared on activation.
    #[serde(default)]
    pub activation_code: Option<ActivationCode>,
    /// Pending password-reset token, cleared when used.
    #[serde(default)]
    pub reset_code: Option<ResetCode>,
    /// Permission level.
    #[serde(default)]
    pub role: Role,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Home address given at registration.
    #[serde(default)]
    pub home_address: Option<String>,
    /// Shipping address used for orders.
    #[serde(default)]
    pub address: Option<String>,
    /// Preferred payment method (e.g. "visa").
    #[serde(default)]
    pub payment_method: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a locked customer account with no password or profile.
    #[must_use]
    pub fn new(email_address: Email) -> Self {
        let now = Utc::now();
        Self {
            email_address,
            password_hash: None,
            is_locked: true,
            is_banned: false,
            activation_code: None,
            reset_code: None,
            role: Role::Customer,
            first_name: None,
            last_name: None,
            home_address: None,
            address: None,
            payment_method: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The account's email address.
    #[must_use]
    pub const fn email_address(&self) -> &Email {
        &self.email_address
    }

    /// Whether a password has been set.
    #[must_use]
    pub const fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Replace the password, storing only its hash.
    ///
    /// # Errors
    ///
    /// Returns `PasswordHashError` if hashing fails; the old password is kept.
    pub fn set_password(&mut self, password: &str) -> Result<(), PasswordHashError> {
        self.password_hash = Some(password::hash_password(password)?);
        self.touch();
        Ok(())
    }

    /// Builder-style [`Account::set_password`].
    ///
    /// # Errors
    ///
    /// Returns `PasswordHashError` if hashing fails.
    pub fn with_password(mut self, password: &str) -> Result<Self, PasswordHashError> {
        self.set_password(password)?;
        Ok(self)
    }

    /// Whether `password` matches the stored credential.
    ///
    /// Always `false` when no password has been set.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| password::verify_password(password, hash))
    }

    /// Current lifecycle status derived from the lock and ban flags.
    #[must_use]
    pub const fn status(&self) -> AccountStatus {
        AccountStatus::from_flags(self.is_locked, self.is_banned)
    }

    /// Full name, when both parts are known.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        }
    }

    /// Record a modification.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub(crate) fn set_email_address(&mut self, email_address: Email) {
        self.email_address = email_address;
        self.touch();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_default_account_is_locked() {
        let account = Account::new(email("test@gmail.com"));
        assert!(account.is_locked);
        assert!(!account.is_banned);
        assert!(!account.has_password());
        assert_eq!(account.role, Role::Customer);
        assert_eq!(account.status(), AccountStatus::Locked);
    }

    #[test]
    fn test_password_is_stored_hashed() {
        let account = Account::new(email("cool@man.com"))
            .with_password("Coolio123")
            .unwrap();

        assert!(account.password_matches("Coolio123"));
        assert!(!account.password_matches("coolio123"));

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("Coolio123"));
    }

    #[test]
    fn test_account_without_password_never_matches() {
        let account = Account::new(email("cool@man.com"));
        assert!(!account.password_matches(""));
    }

    #[test]
    fn test_full_name() {
        let mut account = Account::new(email("greg.ton@example.com"));
        assert_eq!(account.full_name(), None);
        account.first_name = Some("Greg".to_owned());
        account.last_name = Some("Gregton".to_owned());
        assert_eq!(account.full_name().as_deref(), Some("Greg Gregton"));
    }

    #[test]
    fn test_serde_round_trip_keeps_credentials() {
        let mut account = Account::new(email("hey@example.com"))
            .with_password("Password1")
            .unwrap();
        account.activation_code = Some(ActivationCode::new("Test123"));

        let json = serde_json::to_string(&account).unwrap();
        let restored: Account = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, account);
        assert!(restored.password_matches("Password1"));
    }
}
