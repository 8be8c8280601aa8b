//! GitHub rate-limit API client.
//!
//! This module wraps the single `/rate_limit` endpoint the dashboard depends
//! on: a token newtype, the response data model, a mockable gateway trait with
//! a reqwest implementation, and an error taxonomy that maps each failure
//! class (auth, API, transport) onto a user-facing message.

pub mod error;
pub mod gateway;
pub mod models;
pub mod token;

pub use error::QuotaError;
pub use gateway::{DEFAULT_API_BASE, HttpRateLimitGateway, RateLimitGateway};
pub use models::{RateLimitSnapshot, ResourceQuota};
pub use token::PersonalAccessToken;

#[cfg(test)]
pub use gateway::MockRateLimitGateway;
