//! Identity wrapper for the personal access token.

use super::error::QuotaError;

/// Personal access token wrapper enforcing presence.
///
/// The wrapper trims surrounding whitespace and rejects blank input so the
/// rest of the crate never has to reason about empty credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `QuotaError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, QuotaError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QuotaError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::{PersonalAccessToken, QuotaError};

    #[test]
    fn new_trims_whitespace() {
        let token = PersonalAccessToken::new("  ghp_example  ").expect("token should be accepted");
        assert_eq!(token.value(), "ghp_example");
    }

    #[test]
    fn new_rejects_blank_input() {
        assert_eq!(
            PersonalAccessToken::new("   "),
            Err(QuotaError::MissingToken)
        );
        assert_eq!(PersonalAccessToken::new(""), Err(QuotaError::MissingToken));
    }
}
