//! Application configuration loaded from CLI, environment, and files.
//!
//! Values merge from command-line arguments, environment variables, and
//! configuration files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Lowest to highest:
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.ratescope.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `RATESCOPE_TOKEN`, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--api-base`, and friends
//!
//! # Configuration File
//!
//! Place `.ratescope.toml` in the current directory, home directory, or XDG
//! config directory with:
//!
//! ```toml
//! token = "ghp_example"
//! api_base = "https://github.example.com/api/v3"
//! database_url = "ratescope.sqlite"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::gateway::DEFAULT_API_BASE;

/// Filesystem path used for the token database when none is configured.
pub const DEFAULT_DATABASE_URL: &str = "ratescope.sqlite";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `RATESCOPE_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `RATESCOPE_API_BASE` or `--api-base`: GitHub API base URL
/// - `RATESCOPE_DATABASE_URL` or `--database-url`: Local sqlite database path
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use ratescope::RatescopeConfig;
///
/// let config = RatescopeConfig::load().expect("failed to load configuration");
/// let api_base = config.resolve_api_base();
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "RATESCOPE",
    discovery(
        dotfile_name = ".ratescope.toml",
        config_file_name = "ratescope.toml",
        app_name = "ratescope"
    )
)]
pub struct RatescopeConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Optional: when absent the dashboard starts on the token-entry view.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `RATESCOPE_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise deployments.
    ///
    /// Defaults to `https://api.github.com`.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base <URL>`
    /// - Environment: `RATESCOPE_API_BASE`
    /// - Config file: `api_base = "..."`
    pub api_base: Option<String>,

    /// Local sqlite database URL/path used to remember the token.
    ///
    /// Diesel uses a filesystem path for sqlite connections. The same value is
    /// also used by the Diesel CLI via `DATABASE_URL` when running migrations.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>`
    /// - Environment: `RATESCOPE_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    ///
    /// When set, Ratescope initializes the database at `database_url`, applies
    /// any pending Diesel migrations, records the schema version in telemetry,
    /// and exits without contacting GitHub.
    pub migrate_db: bool,

    /// Removes the remembered token and exits.
    pub logout: bool,

    /// Emits telemetry events to stderr as JSON lines.
    ///
    /// Off by default so the alternate-screen interface stays clean; redirect
    /// stderr to a file when enabling this.
    ///
    /// Can be provided via:
    /// - CLI: `--telemetry`
    /// - Environment: `RATESCOPE_TELEMETRY`
    /// - Config file: `telemetry = true`
    pub telemetry: bool,
}

impl RatescopeConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// Unlike the other resolvers this returns an `Option`: a missing token is
    /// not an error, the dashboard prompts for one interactively.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Returns the configured API base URL, or the public GitHub API.
    #[must_use]
    pub fn resolve_api_base(&self) -> String {
        self.api_base
            .clone()
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
    }

    /// Returns the configured database path, or the default in the current
    /// directory.
    #[must_use]
    pub fn resolve_database_url(&self) -> String {
        self.database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned())
    }
}
