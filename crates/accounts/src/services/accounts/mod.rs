//! Account service.
//!
//! Registration, activation, authentication, password reset and
//! administration of accounts.
//!
//! # Lifecycle
//!
//! ```text
//! register ──► locked ──unlock_account(code)──► active
//!                 │                                │
//!                 └────────ban_account(true)───────┴──► banned
//! ```
//!
//! Banning is independent of activation: `ban_account(false)` returns an
//! account to whichever of locked/active it was in.

mod error;

pub use error::{LoginError, PasswordResetError, RegistrationError};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use tracing::{debug, info, instrument, warn};

use kitchen_core::{AccountStatus, ActivationCode, Email, ResetCode, Role};

use crate::config::AccountsConfig;
use crate::models::Account;
use crate::services::gateway::{SavedSale, StoreEmailGateway};
use crate::services::mail::{self, Delivery, MailError, Mailer, MemoryMailer};
use crate::store::{AccountStore, InMemoryAccountStore};
use crate::validation;

/// Random bytes in an activation or reset code (192 bits).
const CODE_BYTES: usize = 24;

/// Details collected by the sign-up form.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Copy)]
pub struct Registration<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: &'a str,
    pub home_address: Option<&'a str>,
    pub password: &'a str,
}

impl std::fmt::Debug for Registration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("home_address", &self.home_address)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Account service.
///
/// Owns the account store, the mailer and the log of sales recorded through
/// [`email_gateway`](Self::email_gateway). Every operation runs to
/// completion against the store before returning; the manager is the only
/// thing that mutates accounts.
pub struct AccountManager<S, M> {
    store: S,
    mailer: M,
    config: AccountsConfig,
    sales: Vec<SavedSale>,
}

impl AccountManager<InMemoryAccountStore, MemoryMailer> {
    /// Create a manager over an empty in-memory store with an in-memory outbox.
    #[must_use]
    pub const fn in_memory(config: AccountsConfig) -> Self {
        Self::new(InMemoryAccountStore::new(), MemoryMailer::new(), config)
    }
}

impl<S: AccountStore, M: Mailer> AccountManager<S, M> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(store: S, mailer: M, config: AccountsConfig) -> Self {
        Self {
            store,
            mailer,
            config,
            sales: Vec::new(),
        }
    }

    /// The underlying account store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The mailer used for account emails.
    #[must_use]
    pub const fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AccountsConfig {
        &self.config
    }

    /// Gateway for receipt and order collaborators, backed by this
    /// manager's accounts and mailer.
    ///
    /// Sales saved through the gateway are kept by the manager, so they
    /// remain visible through [`saved_sales`](Self::saved_sales) and any
    /// later gateway.
    #[must_use]
    pub const fn email_gateway(&mut self) -> StoreEmailGateway<'_, S, M> {
        StoreEmailGateway::new(&self.store, &self.mailer, &self.config, &mut self.sales)
    }

    /// Sales recorded through the email gateway, oldest first.
    #[must_use]
    pub fn saved_sales(&self) -> &[SavedSale] {
        &self.sales
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Whether no stored account uses `email`.
    #[must_use]
    pub fn verify_email_does_not_exist_in_system(&self, email: &str) -> bool {
        !self.store.contains(email)
    }

    /// Validate sign-up details, returning the parsed email address.
    ///
    /// Checks run in a fixed order and the first failure wins: required
    /// fields (first name, last name, home address), email syntax, password
    /// strength, then email uniqueness.
    ///
    /// # Errors
    ///
    /// Returns the `RegistrationError` for the first failed check.
    pub fn validate_registration(
        &self,
        registration: &Registration<'_>,
    ) -> Result<Email, RegistrationError> {
        if registration.first_name.is_none() {
            return Err(RegistrationError::MissingField("first_name"));
        }
        if registration.last_name.is_none() {
            return Err(RegistrationError::MissingField("last_name"));
        }
        if registration.home_address.is_none() {
            return Err(RegistrationError::MissingField("home_address"));
        }

        let email = Email::parse(registration.email)?;
        validation::validate_password(registration.password)?;

        if !self.verify_email_does_not_exist_in_system(email.as_str()) {
            return Err(RegistrationError::EmailAlreadyRegistered(email.into_inner()));
        }

        Ok(email)
    }

    /// Whether the sign-up details would be accepted.
    ///
    /// See [`AccountManager::validate_registration`] for the rules.
    #[must_use]
    pub fn verify_account(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: &str,
        home_address: Option<&str>,
        password: &str,
    ) -> bool {
        self.validate_registration(&Registration {
            first_name,
            last_name,
            email,
            home_address,
            password,
        })
        .is_ok()
    }

    // =========================================================================
    // Registration & Activation
    // =========================================================================

    /// Register a new customer account and send its verification email.
    ///
    /// The account is stored locked, with a fresh activation code, before
    /// the email is sent.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError` if validation fails, the password cannot
    /// be hashed, or the verification email cannot be sent (in which case
    /// the account still exists and the email can be re-sent).
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub fn register(&mut self, registration: &Registration<'_>) -> Result<Delivery, RegistrationError> {
        let email = self.validate_registration(registration)?;

        let mut account = Account::new(email.clone()).with_password(registration.password)?;
        account.first_name = registration.first_name.map(str::to_owned);
        account.last_name = registration.last_name.map(str::to_owned);
        account.home_address = registration.home_address.map(str::to_owned);
        account.activation_code = Some(ActivationCode::new(generate_code()));

        self.store.add(account);
        info!("Account registered");

        let delivery = self.send_email_verification_email(email.as_str())?;
        Ok(delivery)
    }

    /// Insert an account as-is, replacing any account with the same email.
    ///
    /// No validation is performed; use [`AccountManager::verify_account`]
    /// or [`AccountManager::register`] for user input.
    pub fn add_account(&mut self, account: Account) {
        let email = account.email_address().clone();
        if self.store.add(account).is_some() {
            warn!(email = %email, "Replaced existing account");
        } else {
            debug!(email = %email, "Account added");
        }
    }

    /// Activate the account holding `activation_code`.
    ///
    /// Returns `false`, changing nothing, if no account holds the code.
    pub fn unlock_account(&mut self, activation_code: &str) -> bool {
        let Some(account) = self.store.find_by_activation_code_mut(activation_code) else {
            debug!("Activation code not recognized");
            return false;
        };

        account.is_locked = false;
        account.activation_code = None;
        account.touch();

        info!(email = %account.email_address(), "Account activated");
        true
    }

    /// Send the activation email for the account registered under `email`.
    ///
    /// Generates an activation code first if the account has none. Active
    /// accounts are never re-armed with a code.
    ///
    /// # Errors
    ///
    /// Returns `MailError::UnknownRecipient` if no account uses `email`,
    /// `MailError::AlreadyActivated` if the account is not locked, or any
    /// error from rendering or delivery.
    pub fn send_email_verification_email(&mut self, email: &str) -> Result<Delivery, MailError> {
        let account = self
            .store
            .find_by_email_mut(email)
            .ok_or_else(|| MailError::UnknownRecipient(email.to_owned()))?;

        if !account.is_locked {
            debug!(email = %email, "Verification email skipped for active account");
            return Err(MailError::AlreadyActivated(email.to_owned()));
        }

        let code = account
            .activation_code
            .get_or_insert_with(|| ActivationCode::new(generate_code()))
            .clone();

        let message = mail::verification_email(
            &self.config,
            account.email_address(),
            account.first_name.as_deref(),
            &code,
        )?;
        let delivery = self.mailer.send(&message)?;

        info!(email = %delivery.to, message_id = %delivery.message_id, "Verification email sent");
        Ok(delivery)
    }

    // =========================================================================
    // Passwords
    // =========================================================================

    /// Start a password reset for the account registered under `email`.
    ///
    /// Returns `true` only if the account exists and the reset email was
    /// delivered. Unknown addresses send nothing.
    pub fn send_password_reset_email(&mut self, email: &str) -> bool {
        let Some(account) = self.store.find_by_email_mut(email) else {
            debug!(email = %email, "Password reset requested for unknown account");
            return false;
        };

        let code = ResetCode::new(generate_code());
        account.reset_code = Some(code.clone());

        let sent = mail::password_reset_email(
            &self.config,
            account.email_address(),
            account.first_name.as_deref(),
            &code,
        )
        .and_then(|message| self.mailer.send(&message));

        match sent {
            Ok(delivery) => {
                info!(email = %delivery.to, message_id = %delivery.message_id, "Password reset email sent");
                true
            }
            Err(e) => {
                warn!(email = %email, error = %e, "Password reset email failed");
                false
            }
        }
    }

    /// Complete a password reset.
    ///
    /// The reset code is consumed only if the new password is accepted.
    ///
    /// # Errors
    ///
    /// Returns `PasswordResetError::InvalidCode` if no account holds the code,
    /// or `PasswordResetError::WeakPassword` if the password fails the policy.
    pub fn reset_password(
        &mut self,
        reset_code: &str,
        new_password: &str,
    ) -> Result<(), PasswordResetError> {
        let account = self
            .store
            .find_by_reset_code_mut(reset_code)
            .ok_or(PasswordResetError::InvalidCode)?;

        validation::validate_password(new_password)?;
        account.set_password(new_password)?;
        account.reset_code = None;

        info!(email = %account.email_address(), "Password reset completed");
        Ok(())
    }

    /// Overwrite the password of the account registered under `email`.
    ///
    /// Returns `false` if there is no such account or hashing fails.
    pub fn change_password(&mut self, email: &str, new_password: &str) -> bool {
        let Some(account) = self.store.find_by_email_mut(email) else {
            return false;
        };

        match account.set_password(new_password) {
            Ok(()) => {
                info!(email = %email, "Password changed");
                true
            }
            Err(e) => {
                warn!(email = %email, error = %e, "Password change failed");
                false
            }
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    ///
    /// 1. `LoginError::AccountDoesNotExist` - no account uses `email`
    /// 2. `LoginError::AccountIncorrectPassword` - the password does not match
    /// 3. `LoginError::AccountLocked` - the account is not activated
    /// 4. `LoginError::AccountBanned` - the account is banned
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<&Account, LoginError> {
        let result = self.authenticate(email, password);
        match &result {
            Ok(_) => info!("Login succeeded"),
            Err(reason) => info!(reason = %reason, "Login refused"),
        }
        result
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<&Account, LoginError> {
        let account = self
            .store
            .find_by_email(email)
            .ok_or(LoginError::AccountDoesNotExist)?;

        if !account.password_matches(password) {
            return Err(LoginError::AccountIncorrectPassword);
        }
        if account.is_locked {
            return Err(LoginError::AccountLocked);
        }
        if account.is_banned {
            return Err(LoginError::AccountBanned);
        }

        Ok(account)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get the account registered under `email`.
    #[must_use]
    pub fn get_account(&self, email: &str) -> Option<&Account> {
        self.store.find_by_email(email)
    }

    /// Whether an account is registered under `email`.
    #[must_use]
    pub fn has_account(&self, email: &str) -> bool {
        self.store.contains(email)
    }

    /// Lifecycle status of the account registered under `email`.
    #[must_use]
    pub fn account_status(&self, email: &str) -> Option<AccountStatus> {
        self.store.find_by_email(email).map(Account::status)
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Every account, for privileged roles.
    ///
    /// Kitchen staff and managers see all accounts with their full profile;
    /// customers see nothing.
    #[must_use]
    pub fn view_all_accounts(&self, role: Role) -> Vec<&Account> {
        if role.is_privileged() {
            self.store.list_all()
        } else {
            debug!(role = %role, "Account listing denied");
            Vec::new()
        }
    }

    /// Set or lift a ban on the account registered under `email`.
    ///
    /// Who may ban is decided by the caller. Returns `false` if there is no
    /// such account.
    pub fn ban_account(&mut self, email: &str, banned: bool) -> bool {
        let Some(account) = self.store.find_by_email_mut(email) else {
            return false;
        };

        account.is_banned = banned;
        account.touch();

        info!(email = %email, banned, "Account ban updated");
        true
    }

    /// Whether the account registered under `email` is banned.
    ///
    /// Unknown accounts are reported as not banned.
    #[must_use]
    pub fn is_account_banned(&self, email: &str) -> bool {
        self.store
            .find_by_email(email)
            .is_some_and(|account| account.is_banned)
    }

    /// Create a management account on behalf of `creator_role`.
    ///
    /// Only kitchen managers may create accounts, and only kitchen staff or
    /// manager accounts can be created this way. The email must be valid and
    /// unused. The new account is locked, has no password, and carries a
    /// fresh activation code.
    pub fn admin_create_account(&mut self, creator_role: Role, email: &str, role: Role) -> bool {
        if !creator_role.can_create_accounts() {
            warn!(creator_role = %creator_role, "Account creation denied for role");
            return false;
        }
        if !role.is_assignable_by_admin() {
            warn!(role = %role, "Role cannot be assigned by an administrator");
            return false;
        }
        let Ok(email) = Email::parse(email) else {
            warn!(email = %email, "Account creation rejected: invalid email");
            return false;
        };
        if self.store.contains(email.as_str()) {
            warn!(email = %email, "Account creation rejected: email already registered");
            return false;
        }

        let mut account = Account::new(email);
        account.role = role;
        account.activation_code = Some(ActivationCode::new(generate_code()));

        info!(email = %account.email_address(), role = %role, "Management account created");
        self.store.add(account);
        true
    }

    /// Overwrite the name, email address and shipping address of the account
    /// registered under `email`.
    ///
    /// The new email must be valid and must not belong to another account.
    /// Returns `false`, changing nothing, otherwise.
    pub fn change_personal_information(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
        new_email: &str,
        address: &str,
    ) -> bool {
        let Ok(new_email) = Email::parse(new_email) else {
            debug!(email = %email, "New email address is invalid");
            return false;
        };
        if new_email != email && self.store.contains(new_email.as_str()) {
            debug!(email = %email, new_email = %new_email, "New email address already registered");
            return false;
        }
        let Some(mut account) = self.store.remove(email) else {
            return false;
        };

        account.first_name = Some(first_name.to_owned());
        account.last_name = Some(last_name.to_owned());
        account.address = Some(address.to_owned());
        account.set_email_address(new_email);

        info!(email = %email, new_email = %account.email_address(), "Personal information changed");
        self.store.add(account);
        true
    }
}

/// Generate a URL-safe random one-time code.
fn generate_code() -> String {
    let mut bytes = [0u8; CODE_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
