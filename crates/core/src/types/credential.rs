//! One-time token types.
//!
//! Type-safe wrappers for the codes mailed to account holders. Keeping the
//! activation and reset codes as distinct types means a reset code can never
//! be used to unlock an account, or vice versa.

/// Macro to define a one-time token wrapper around `String`.
macro_rules! define_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing token value.
            #[must_use]
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Get the token as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this token matches a code presented by a caller.
            #[must_use]
            pub fn matches(&self, presented: &str) -> bool {
                self.0 == presented
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_owned())
            }
        }
    };
}

define_token!(
    /// Token proving control of an email address; consumed on activation.
    ActivationCode
);

define_token!(
    /// Token authorizing a single password reset.
    ResetCode
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_value_only() {
        let code = ActivationCode::new("Test123");
        assert!(code.matches("Test123"));
        assert!(!code.matches("test123"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_display_is_raw_value() {
        assert_eq!(ResetCode::from("abc").to_string(), "abc");
    }
}
