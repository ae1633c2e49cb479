//! CLI command implementations.

pub mod account;
pub mod admin;

use thiserror::Error;

use kitchen_accounts::{
    AccountManager, ConfigError, InMemoryAccountStore, LogMailer, LoginError, MailError,
    PasswordResetError, RegistrationError,
};

use crate::snapshot::StoreError;

/// Account manager as driven by the CLI.
pub type Manager = AccountManager<InMemoryAccountStore, LogMailer>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("registration failed: {0}")]
    Registration(#[from] RegistrationError),

    #[error("login failed: {0}")]
    Login(#[from] LoginError),

    #[error("password reset failed: {0}")]
    PasswordReset(#[from] PasswordResetError),

    #[error(transparent)]
    Mail(#[from] MailError),

    /// No account is registered under the email address.
    #[error("no account registered for {0}")]
    UnknownAccount(String),

    /// The activation code did not match any account.
    #[error("activation code not recognized")]
    InvalidActivationCode,

    /// The account manager refused the operation.
    #[error("{0}")]
    Refused(String),
}
