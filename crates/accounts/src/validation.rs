//! Input validators.
//!
//! Pure checks with no access to stored accounts. Uniqueness depends on the
//! store and lives on [`AccountManager`](crate::AccountManager).

use kitchen_core::Email;
use thiserror::Error;

/// Ways a password can fail the strength policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// No uppercase letter.
    #[error("password must contain an uppercase letter")]
    MissingUppercase,
    /// No digit.
    #[error("password must contain a digit")]
    MissingDigit,
}

/// Check a password against the strength policy.
///
/// # Errors
///
/// Returns the first rule the password breaks: uppercase first, then digit.
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyError> {
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    Ok(())
}

/// Whether `password` satisfies the strength policy.
#[must_use]
pub fn verify_password(password: &str) -> bool {
    validate_password(password).is_ok()
}

/// Whether `email` has the conventional `local@domain.tld` shape.
#[must_use]
pub fn verify_email_address(email: &str) -> bool {
    Email::parse(email).is_ok()
}

/// Whether `address` is acceptable for shipping.
///
/// A shipping address is a numeric house number followed by one or more
/// street words, with no further numbers.
#[must_use]
pub fn verify_shipping_address(address: &str) -> bool {
    let mut words = address.split_whitespace();
    let Some(number) = words.next() else {
        return false;
    };
    let street: Vec<&str> = words.collect();

    is_house_number(number)
        && !street.is_empty()
        && street.iter().all(|word| !word.chars().any(|c| c.is_ascii_digit()))
}

/// Whether `address` is acceptable as a payment (billing) address.
///
/// Billing addresses only need a numeric house number and a street word;
/// unit and suite numbers are allowed.
#[must_use]
pub fn verify_payment_address(address: &str) -> bool {
    let mut words = address.split_whitespace();
    let Some(number) = words.next() else {
        return false;
    };

    is_house_number(number) && words.any(|word| word.chars().any(char::is_alphabetic))
}

fn is_house_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}
