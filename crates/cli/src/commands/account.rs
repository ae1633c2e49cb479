//! Self-service account commands.
//!
//! # Usage
//!
//! ```bash
//! # Register, then activate with the code from the verification email
//! kitchen register -e greg.ton@example.com -f Greg -l Gregton -a "46 Greg Ave" -p Password1
//! kitchen activate <CODE>
//!
//! # Check credentials
//! kitchen login -e greg.ton@example.com -p Password1
//!
//! # Reset a forgotten password
//! kitchen reset-password request -e greg.ton@example.com
//! kitchen reset-password confirm <CODE> -p NewPassword2
//! ```

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use kitchen_accounts::Registration;

use super::{CliError, Manager};

/// Register a customer account and send its verification email.
///
/// # Errors
///
/// Returns `CliError::Registration` if the details are rejected or the
/// verification email cannot be sent.
pub fn register(
    manager: &mut Manager,
    email: &str,
    first_name: &str,
    last_name: &str,
    home_address: &str,
    password: &SecretString,
) -> Result<(), CliError> {
    let delivery = manager.register(&Registration {
        first_name: Some(first_name),
        last_name: Some(last_name),
        email,
        home_address: Some(home_address),
        password: password.expose_secret(),
    })?;

    info!(email = %delivery.to, "Account registered; check the verification email for the activation code");
    Ok(())
}

/// Activate the account holding `code`.
///
/// # Errors
///
/// Returns `CliError::InvalidActivationCode` if no account holds the code.
pub fn activate(manager: &mut Manager, code: &str) -> Result<(), CliError> {
    if !manager.unlock_account(code) {
        return Err(CliError::InvalidActivationCode);
    }
    info!("Account activated");
    Ok(())
}

/// Check credentials.
///
/// # Errors
///
/// Returns `CliError::Login` with the reason the login was refused.
pub fn login(manager: &Manager, email: &str, password: &SecretString) -> Result<(), CliError> {
    let account = manager.login(email, password.expose_secret())?;
    info!(
        email = %account.email_address(),
        role = %account.role,
        "Login succeeded"
    );
    Ok(())
}

/// Send a password reset email.
///
/// # Errors
///
/// Returns `CliError::UnknownAccount` if the account does not exist, or
/// `CliError::Refused` if the email could not be delivered.
pub fn request_password_reset(manager: &mut Manager, email: &str) -> Result<(), CliError> {
    if !manager.has_account(email) {
        return Err(CliError::UnknownAccount(email.to_owned()));
    }
    if !manager.send_password_reset_email(email) {
        return Err(CliError::Refused(format!(
            "password reset email to {email} could not be sent"
        )));
    }
    info!(email = %email, "Password reset email sent");
    Ok(())
}

/// Complete a password reset with the code from the reset email.
///
/// # Errors
///
/// Returns `CliError::PasswordReset` if the code is unknown or the new
/// password is too weak.
pub fn confirm_password_reset(
    manager: &mut Manager,
    code: &str,
    password: &SecretString,
) -> Result<(), CliError> {
    manager.reset_password(code, password.expose_secret())?;
    info!("Password changed");
    Ok(())
}
