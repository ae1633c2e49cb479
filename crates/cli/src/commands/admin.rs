//! Administrative account commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a kitchen staff account (sends a verification email)
//! kitchen admin create -e staff@example.com -r kitchen_staff
//!
//! # Ban and unban an account
//! kitchen ban -e greg.ton@example.com
//! kitchen unban -e greg.ton@example.com
//!
//! # List every account as kitchen staff would see it
//! kitchen list --as-role kitchen_staff
//! ```

use tracing::{info, warn};

use kitchen_core::Role;

use super::{CliError, Manager};

/// Set or lift a ban.
///
/// # Errors
///
/// Returns `CliError::UnknownAccount` if no account uses `email`.
pub fn set_banned(manager: &mut Manager, email: &str, banned: bool) -> Result<(), CliError> {
    if !manager.ban_account(email, banned) {
        return Err(CliError::UnknownAccount(email.to_owned()));
    }
    info!(email = %email, banned, "Ban updated");
    Ok(())
}

/// Log every account visible to `as_role`.
///
/// Returns the number of accounts listed.
pub fn list(manager: &Manager, as_role: Role) -> usize {
    let accounts = manager.view_all_accounts(as_role);
    if accounts.is_empty() && !as_role.is_privileged() {
        warn!(role = %as_role, "Role may not view accounts");
        return 0;
    }

    for account in &accounts {
        let name = account.full_name();
        info!(
            email = %account.email_address(),
            role = %account.role,
            status = %account.status(),
            name = name.as_deref().unwrap_or("-"),
            home_address = account.home_address.as_deref().unwrap_or("-"),
            "Account"
        );
    }
    info!(count = accounts.len(), "Listed accounts");
    accounts.len()
}

/// Create a management account acting as `as_role`, then send its
/// verification email.
///
/// # Errors
///
/// Returns `CliError::Refused` if the role may not create accounts, the
/// target role cannot be assigned, or the email is invalid or taken.
pub fn create(manager: &mut Manager, as_role: Role, email: &str, role: Role) -> Result<(), CliError> {
    if !manager.admin_create_account(as_role, email, role) {
        return Err(CliError::Refused(format!(
            "{as_role} cannot create a {role} account for {email}"
        )));
    }

    let delivery = manager.send_email_verification_email(email)?;
    info!(email = %delivery.to, role = %role, "Account created; activation code sent");
    warn!("Note: account has no password. Use 'reset-password request' after activation to set one.");
    Ok(())
}
