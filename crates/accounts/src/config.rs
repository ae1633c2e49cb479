//! Accounts configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KITCHEN_BASE_URL` - Public URL that activation and reset links point at
//!   (default: `http://localhost:3000`)
//! - `KITCHEN_MAIL_FROM` - Sender address for account emails
//!   (default: `no-reply@kitchen.local`)

use kitchen_core::Email;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
const DEFAULT_MAIL_FROM: &str = "no-reply@kitchen.local";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Accounts configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountsConfig {
    /// Base URL for links embedded in account emails. Always ends in `/`.
    pub base_url: Url,
    /// Sender address for account emails.
    pub mail_from: Email,
}

impl Default for AccountsConfig {
    #[allow(clippy::expect_used)] // Constant defaults; parsing them cannot fail
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            mail_from: Email::parse(DEFAULT_MAIL_FROM).expect("default sender is valid"),
        }
    }
}

impl AccountsConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default("KITCHEN_BASE_URL", DEFAULT_BASE_URL))?;
        let mail_from = Email::parse(&get_env_or_default("KITCHEN_MAIL_FROM", DEFAULT_MAIL_FROM))
            .map_err(|e| ConfigError::InvalidEnvVar("KITCHEN_MAIL_FROM".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            mail_from,
        })
    }

    /// Build a link below the base URL carrying a one-time `code`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `path` cannot be joined onto the base URL.
    pub fn link(&self, path: &str, code: &str) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().append_pair("code", code);
        Ok(url)
    }

    /// Link that activates the account holding `code`.
    ///
    /// # Errors
    ///
    /// See [`AccountsConfig::link`].
    pub fn activation_link(&self, code: &str) -> Result<Url, url::ParseError> {
        self.link("account/activate", code)
    }

    /// Link that lets the holder of `code` choose a new password.
    ///
    /// # Errors
    ///
    /// See [`AccountsConfig::link`].
    pub fn password_reset_link(&self, code: &str) -> Result<Url, url::ParseError> {
        self.link("account/reset-password", code)
    }

    /// Link inviting a guest customer to create an account.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the registration path cannot be joined.
    pub fn signup_link(&self, email: &Email) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join("account/register")?;
        url.query_pairs_mut().append_pair("email", email.as_str());
        Ok(url)
    }
}

/// Parse a base URL, requiring an absolute http(s) URL and normalizing the
/// path to end in `/` so relative joins append rather than replace.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("KITCHEN_BASE_URL".to_string(), reason);

    let mut url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("must be an absolute http(s) URL".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
