//! Startup context storage for the dashboard TUI.
//!
//! This module owns the global `OnceLock` values used during TUI
//! bootstrapping and provides the setter/getter functions consumed by the
//! CLI wiring and app handlers. The bubbletea-rs `Model` trait requires
//! `init()` to be a static function, so the collaborators the app needs are
//! parked here before the program starts.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use crossterm::terminal;

use crate::github::error::QuotaError;
use crate::github::gateway::RateLimitGateway;
use crate::github::models::RateLimitSnapshot;
use crate::github::token::PersonalAccessToken;
use crate::persistence::{InMemoryTokenStore, TokenStore};
use crate::session::SessionController;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Global storage for the session collaborators and initial token.
///
/// This is set before the TUI program starts and read by
/// `DashboardApp::init()`.
static SESSION_CONTEXT: OnceLock<SessionContext> = OnceLock::new();

/// Global storage for initial terminal dimensions.
///
/// This is set before the TUI program starts and read by
/// `DashboardApp::init()` so the first frame uses the actual terminal size.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Global storage for the telemetry sink.
///
/// This is set before the TUI program starts to enable fetch metrics.
static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Static fallback telemetry sink to avoid allocations on each call.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Collaborators the dashboard needs to verify tokens and remember them.
struct SessionContext {
    gateway: Arc<dyn RateLimitGateway>,
    store: Arc<dyn TokenStore>,
    initial_token: Option<String>,
}

/// Gateway used when no session context has been configured.
///
/// Every fetch fails with a configuration error, which surfaces in the
/// status bar instead of panicking inside the update loop.
struct UnconfiguredGateway;

#[async_trait]
impl RateLimitGateway for UnconfiguredGateway {
    async fn fetch_rate_limit(
        &self,
        _token: &PersonalAccessToken,
    ) -> Result<RateLimitSnapshot, QuotaError> {
        Err(QuotaError::Configuration {
            message: "session context not configured".to_owned(),
        })
    }
}

/// Sets the session context for the TUI application.
///
/// This must be called before starting the bubbletea-rs program. The gateway
/// and store are read by `DashboardApp::init()`; `initial_token`, when
/// present, is submitted automatically on startup.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_session_context(
    gateway: Arc<dyn RateLimitGateway>,
    store: Arc<dyn TokenStore>,
    initial_token: Option<String>,
) -> bool {
    SESSION_CONTEXT
        .set(SessionContext {
            gateway,
            store,
            initial_token,
        })
        .is_ok()
}

/// Sets the initial terminal dimensions for the TUI application.
///
/// This should be called before starting the bubbletea-rs program so the
/// initial render can use the actual terminal size instead of fallbacks.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the telemetry sink for the TUI application.
///
/// This must be called before starting the bubbletea-rs program to enable
/// fetch metrics. Without this, a no-op sink is used.
///
/// # Returns
///
/// `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Builds a session controller from the stored context.
///
/// Called internally by `DashboardApp::init()`. When no context was set the
/// controller is wired to collaborators that keep the app usable but fail
/// any fetch with a configuration error.
pub(crate) fn session_controller() -> SessionController {
    SESSION_CONTEXT.get().map_or_else(
        || {
            SessionController::new(
                Arc::new(UnconfiguredGateway),
                Arc::new(InMemoryTokenStore::default()),
            )
        },
        |context| {
            SessionController::new(Arc::clone(&context.gateway), Arc::clone(&context.store))
        },
    )
}

/// Returns the startup token, if one was configured and is usable.
pub(crate) fn initial_token() -> Option<PersonalAccessToken> {
    SESSION_CONTEXT
        .get()
        .and_then(|context| context.initial_token.as_deref())
        .and_then(|value| PersonalAccessToken::new(value).ok())
}

/// Gets the initial terminal dimensions from storage.
///
/// Called internally by `DashboardApp::init()`. Returns the stored
/// dimensions or fallback dimensions if none were set.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

/// Fetches a fresh rate-limit snapshot with the given token.
///
/// Uses the gateway set by [`set_session_context`]. Returns an error if the
/// context was not set or if the API call fails.
pub(crate) async fn fetch_snapshot(
    token: &PersonalAccessToken,
) -> Result<RateLimitSnapshot, QuotaError> {
    let context = SESSION_CONTEXT
        .get()
        .ok_or_else(|| QuotaError::Configuration {
            message: "session context not configured".to_owned(),
        })?;
    context.gateway.fetch_rate_limit(token).await
}

/// Gets the telemetry sink, returning a no-op sink if not configured.
///
/// Uses a static fallback sink to avoid allocating a new `Arc` on each call
/// when no sink has been configured.
fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Records telemetry for a completed fetch.
///
/// Called internally by the app after a successful fetch.
pub(crate) fn record_fetch_telemetry(resource_count: usize) {
    get_telemetry_sink().record(TelemetryEvent::RateLimitFetched { resource_count });
}
