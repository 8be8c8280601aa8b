//! Error types exposed by the GitHub rate-limit layer.

use thiserror::Error;

/// Errors surfaced while loading configuration or talking to GitHub.
///
/// The `Display` strings double as the user-facing messages rendered by the
/// dashboard, so they are worded for end users rather than for logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuotaError {
    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// GitHub returned 401 for the supplied token.
    #[error("Invalid token. Please check your token and try again.")]
    InvalidToken,

    /// GitHub returned a non-authentication API error.
    #[error("API Error: {status} {status_text}")]
    Api {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The response body could not be parsed as a rate-limit snapshot.
    #[error("malformed rate limit response: {message}")]
    Decode {
        /// Deserialisation error detail.
        message: String,
    },

    /// Configuration could not be loaded or was invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The local token store failed.
    #[error("token store error: {message}")]
    Storage {
        /// Error detail from the persistence layer.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl QuotaError {
    /// Returns true when the error means the credential itself was rejected.
    ///
    /// Only this class of failure forces a logout; every other failure leaves
    /// the active token in place so the user can retry.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::QuotaError;

    #[test]
    fn invalid_token_uses_the_fixed_user_message() {
        assert_eq!(
            QuotaError::InvalidToken.to_string(),
            "Invalid token. Please check your token and try again."
        );
    }

    #[test]
    fn api_error_embeds_status_and_status_text() {
        let error = QuotaError::Api {
            status: 500,
            status_text: "Internal Server Error".to_owned(),
        };
        assert_eq!(error.to_string(), "API Error: 500 Internal Server Error");
    }

    #[test]
    fn only_invalid_token_is_an_auth_error() {
        assert!(QuotaError::InvalidToken.is_auth_error());
        assert!(
            !QuotaError::Api {
                status: 500,
                status_text: "Internal Server Error".to_owned(),
            }
            .is_auth_error()
        );
        assert!(
            !QuotaError::Network {
                message: "connection reset".to_owned(),
            }
            .is_auth_error()
        );
    }
}
