//! Ratescope library crate providing a GitHub rate-limit dashboard.
//!
//! The library wraps the GitHub `/rate_limit` endpoint to verify personal
//! access tokens, retrieve per-resource quota data, and surface friendly
//! errors that can be displayed in the terminal dashboard.

pub mod config;
pub mod github;
pub mod persistence;
pub mod presentation;
pub mod session;
pub mod telemetry;
pub mod tui;

pub use config::RatescopeConfig;
pub use github::{
    DEFAULT_API_BASE, HttpRateLimitGateway, PersonalAccessToken, QuotaError, RateLimitGateway,
    RateLimitSnapshot, ResourceQuota,
};
pub use session::{SessionController, SessionPhase};
