//! Gateway for fetching rate-limit snapshots from the GitHub API.
//!
//! The trait-based design enables mocking in tests while the reqwest
//! implementation handles real HTTP requests. Only one endpoint is involved:
//! `GET <api base>/rate_limit` with the token as the bearer credential.

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use url::Url;

use super::error::QuotaError;
use super::models::RateLimitSnapshot;
use super::token::PersonalAccessToken;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub requires a User-Agent on every API request.
const USER_AGENT: &str = concat!("ratescope/", env!("CARGO_PKG_VERSION"));

/// Gateway that can load the current rate-limit snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimitGateway: Send + Sync {
    /// Fetches the rate-limit snapshot using the supplied token.
    async fn fetch_rate_limit(
        &self,
        token: &PersonalAccessToken,
    ) -> Result<RateLimitSnapshot, QuotaError>;
}

/// Reqwest-backed gateway talking to the real GitHub API.
#[derive(Debug, Clone)]
pub struct HttpRateLimitGateway {
    client: Client,
    endpoint: Url,
}

impl HttpRateLimitGateway {
    /// Creates a gateway for the given API base URL (e.g.
    /// `https://api.github.com` or a GitHub Enterprise `.../api/v3` base).
    ///
    /// # Errors
    ///
    /// Returns `QuotaError::Configuration` when the base URL is invalid or
    /// the HTTP client cannot be constructed.
    pub fn new(api_base: &str) -> Result<Self, QuotaError> {
        let raw_endpoint = format!("{}/rate_limit", api_base.trim_end_matches('/'));
        let endpoint = Url::parse(&raw_endpoint).map_err(|error| QuotaError::Configuration {
            message: format!("invalid API base URL '{api_base}': {error}"),
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| QuotaError::Configuration {
                message: format!("failed to build HTTP client: {error}"),
            })?;

        Ok(Self { client, endpoint })
    }

    /// Returns the resolved `/rate_limit` endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RateLimitGateway for HttpRateLimitGateway {
    async fn fetch_rate_limit(
        &self,
        token: &PersonalAccessToken,
    ) -> Result<RateLimitSnapshot, QuotaError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(
                http::header::AUTHORIZATION,
                format!("token {}", token.value()),
            )
            .header(http::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|error| QuotaError::Network {
                message: error.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("rate limit fetch rejected with 401");
            return Err(QuotaError::InvalidToken);
        }
        if !status.is_success() {
            tracing::debug!("rate limit fetch failed with status {status}");
            return Err(map_failure_status(status));
        }

        response
            .json::<RateLimitSnapshot>()
            .await
            .map_err(|error| QuotaError::Decode {
                message: error.to_string(),
            })
    }
}

/// Maps a non-2xx, non-401 status to an API error carrying the numeric code
/// and the canonical reason phrase.
fn map_failure_status(status: StatusCode) -> QuotaError {
    QuotaError::Api {
        status: status.as_u16(),
        status_text: status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::{HttpRateLimitGateway, map_failure_status};
    use crate::github::error::QuotaError;

    #[test]
    fn endpoint_is_joined_without_doubling_slashes() {
        let gateway =
            HttpRateLimitGateway::new("https://api.github.com/").expect("gateway should build");
        assert_eq!(
            gateway.endpoint().as_str(),
            "https://api.github.com/rate_limit"
        );
    }

    #[test]
    fn endpoint_preserves_enterprise_path_prefixes() {
        let gateway = HttpRateLimitGateway::new("https://ghe.example.com/api/v3")
            .expect("gateway should build");
        assert_eq!(
            gateway.endpoint().as_str(),
            "https://ghe.example.com/api/v3/rate_limit"
        );
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let result = HttpRateLimitGateway::new("not a url");
        assert!(matches!(result, Err(QuotaError::Configuration { .. })));
    }

    #[test]
    fn failure_status_carries_code_and_reason() {
        assert_eq!(
            map_failure_status(StatusCode::INTERNAL_SERVER_ERROR),
            QuotaError::Api {
                status: 500,
                status_text: "Internal Server Error".to_owned(),
            }
        );
    }
}
