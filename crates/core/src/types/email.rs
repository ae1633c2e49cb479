//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Characters allowed in the local part besides ASCII alphanumerics.
const LOCAL_PART_SYMBOLS: &[char] = &['.', '_', '%', '+', '-'];

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The input contains more than one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MultipleAtSymbols,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// A character outside the accepted set was found.
    #[error("email contains illegal character {0:?}")]
    IllegalCharacter(char),
    /// The local part has a leading, trailing or doubled dot.
    #[error("email local part has a misplaced dot")]
    MisplacedDot,
    /// A domain label is empty or starts/ends with a hyphen.
    #[error("email domain label {0:?} is malformed")]
    MalformedDomainLabel(String),
    /// The domain has no top-level domain, or the TLD is not alphabetic.
    #[error("email domain must end in an alphabetic top-level domain")]
    InvalidTopLevelDomain,
}

/// An email address.
///
/// Accounts are keyed by this type, so parsing enforces the conventional
/// `local@domain.tld` shape rather than merely checking for an @ symbol.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Exactly one @ symbol
/// - Local part: ASCII alphanumerics and `. _ % + -`, no leading, trailing or doubled dot
/// - Domain: at least two dot-separated labels of ASCII alphanumerics and
///   inner hyphens; the last label is alphabetic and at least 2 characters
///
/// ## Examples
///
/// ```
/// use kitchen_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("greg.ton@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());                   // empty
/// assert!(Email::parse("ton$gregexamplecom").is_err()); // missing @
/// assert!(Email::parse("ton$greg@example.com").is_err()); // illegal character
/// assert!(Email::parse("user@localhost").is_err());     // no TLD
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input violates, checking length,
    /// then the @ separator, then the local part, then the domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        validate_local_part(local)?;
        validate_domain(domain)?;

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

fn validate_local_part(local: &str) -> Result<(), EmailError> {
    if let Some(c) = local
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !LOCAL_PART_SYMBOLS.contains(c))
    {
        return Err(EmailError::IllegalCharacter(c));
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(EmailError::MisplacedDot);
    }

    Ok(())
}

fn validate_domain(domain: &str) -> Result<(), EmailError> {
    if let Some(c) = domain
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '.')
    {
        return Err(EmailError::IllegalCharacter(c));
    }

    let labels: Vec<&str> = domain.split('.').collect();

    for label in &labels {
        if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
            return Err(EmailError::MalformedDomainLabel((*label).to_owned()));
        }
    }

    match labels.as_slice() {
        [_, .., tld] if tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) => Ok(()),
        _ => Err(EmailError::InvalidTopLevelDomain),
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Email {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Email {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("greg.ton@example.com").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
        assert!(Email::parse("user_name%x@sub-domain.example.com").is_ok());
        assert!(Email::parse("user@example.co.uk").is_ok());
        assert!(Email::parse("a@b.io").is_ok());
        assert!(Email::parse("test@exam.ple").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_missing_at() {
        assert_eq!(
            Email::parse("ton$gregexamplecom"),
            Err(EmailError::MissingAtSymbol)
        );
    }

    #[test]
    fn test_parse_multiple_at() {
        assert_eq!(
            Email::parse("a@b@example.com"),
            Err(EmailError::MultipleAtSymbols)
        );
    }

    #[test]
    fn test_parse_empty_parts() {
        assert_eq!(Email::parse("@domain.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("user@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parse_illegal_character() {
        assert_eq!(
            Email::parse("ton$greg@example.com"),
            Err(EmailError::IllegalCharacter('$'))
        );
        assert_eq!(
            Email::parse("greg@exa mple.com"),
            Err(EmailError::IllegalCharacter(' '))
        );
    }

    #[test]
    fn test_parse_misplaced_dot() {
        assert_eq!(Email::parse(".greg@example.com"), Err(EmailError::MisplacedDot));
        assert_eq!(Email::parse("greg.@example.com"), Err(EmailError::MisplacedDot));
        assert_eq!(Email::parse("gr..eg@example.com"), Err(EmailError::MisplacedDot));
    }

    #[test]
    fn test_parse_bad_domain() {
        assert!(matches!(
            Email::parse("greg@-example.com"),
            Err(EmailError::MalformedDomainLabel(_))
        ));
        assert!(matches!(
            Email::parse("greg@example..com"),
            Err(EmailError::MalformedDomainLabel(_))
        ));
        assert_eq!(
            Email::parse("greg@localhost"),
            Err(EmailError::InvalidTopLevelDomain)
        );
        assert_eq!(
            Email::parse("greg@example.c0m"),
            Err(EmailError::InvalidTopLevelDomain)
        );
        assert_eq!(
            Email::parse("greg@example.c"),
            Err(EmailError::InvalidTopLevelDomain)
        );
    }

    #[test]
    fn test_local_part_and_domain() {
        let email = Email::parse("greg.ton@example.com").unwrap();
        assert_eq!(email.local_part(), "greg.ton");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_display() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(format!("{email}"), "user@example.com");
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let email = Email::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");

        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }

    #[test]
    fn test_compare_with_str() {
        let email: Email = "user@example.com".parse().unwrap();
        assert_eq!(email, "user@example.com");
        assert_eq!(email.as_str(), "user@example.com");
    }
}
