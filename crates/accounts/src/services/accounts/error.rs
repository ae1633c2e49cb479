//! Account service error types.

use kitchen_core::EmailError;
use thiserror::Error;

use crate::password::PasswordHashError;
use crate::services::mail::MailError;
use crate::validation::PasswordPolicyError;

/// Reasons a login attempt is refused, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    /// No account is registered under the email address.
    #[error("account does not exist")]
    AccountDoesNotExist,

    /// The password does not match the stored credential.
    #[error("incorrect password")]
    AccountIncorrectPassword,

    /// The account has not been activated yet.
    #[error("account is locked until its email address is verified")]
    AccountLocked,

    /// The account has been banned.
    #[error("account is banned")]
    AccountBanned,
}

/// Errors that can occur when registering an account.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A required profile field was not provided.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password does not meet the strength policy.
    #[error("password validation failed: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    /// An account already uses the email address.
    #[error("email already registered: {0}")]
    EmailAlreadyRegistered(String),

    /// Password hashing error.
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    /// The verification email could not be sent. The account was created.
    #[error("verification email failed: {0}")]
    Mail(#[from] MailError),
}

/// Errors that can occur when completing a password reset.
#[derive(Debug, Error)]
pub enum PasswordResetError {
    /// No account has a pending reset with this code.
    #[error("invalid or expired reset code")]
    InvalidCode,

    /// The new password does not meet the strength policy.
    #[error("password validation failed: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    /// Password hashing error.
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
}
