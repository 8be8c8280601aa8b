//! Token lifecycle and data-refresh state machine.
//!
//! The session controller owns the active token and the fetched snapshot and
//! drives every transition between them: submitting a token, refreshing,
//! handling auth failure, and logging out. The rate-limit gateway and the
//! token store are injected at construction so tests can substitute doubles.
//!
//! The state is an explicit tagged union ([`SessionPhase`]) rather than a set
//! of independent `loading`/`error` flags, which keeps illegal combinations
//! unrepresentable. `Loading` and `Errored` retain the previous snapshot so a
//! manual refresh keeps showing stale cards until fresh data lands.
//!
//! Failures never escape the controller: every failure path becomes an
//! observable error message for the view. Only a rejected credential (401)
//! forces a logout; all other failures leave the token in place for a retry.

use std::mem;
use std::sync::Arc;

use crate::github::error::QuotaError;
use crate::github::gateway::RateLimitGateway;
use crate::github::models::RateLimitSnapshot;
use crate::github::token::PersonalAccessToken;
use crate::persistence::TokenStore;

/// The controller's current position in the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No token is active; the token-entry view is shown.
    LoggedOut,
    /// A fetch is in flight.
    Loading {
        /// Snapshot from before the fetch, kept visible during a refresh.
        retained: Option<RateLimitSnapshot>,
    },
    /// A snapshot is loaded and current.
    Ready(RateLimitSnapshot),
    /// The last fetch failed.
    Errored {
        /// Human-readable failure message for the view.
        message: String,
        /// Stale snapshot from before the failure, if one existed.
        retained: Option<RateLimitSnapshot>,
    },
}

/// Owns the token, the snapshot, and the transitions between them.
pub struct SessionController {
    phase: SessionPhase,
    token: Option<PersonalAccessToken>,
    gateway: Arc<dyn RateLimitGateway>,
    store: Arc<dyn TokenStore>,
}

impl SessionController {
    /// Creates a logged-out controller with the given collaborators.
    #[must_use]
    pub fn new(gateway: Arc<dyn RateLimitGateway>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            phase: SessionPhase::LoggedOut,
            token: None,
            gateway,
            store,
        }
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Returns the active token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&PersonalAccessToken> {
        self.token.as_ref()
    }

    /// Returns the snapshot to display, current or retained.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&RateLimitSnapshot> {
        match &self.phase {
            SessionPhase::Ready(snapshot) => Some(snapshot),
            SessionPhase::Loading { retained } | SessionPhase::Errored { retained, .. } => {
                retained.as_ref()
            }
            SessionPhase::LoggedOut => None,
        }
    }

    /// Returns the current error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Errored { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Returns true while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading { .. })
    }

    /// Reads any persisted token and, when present, submits it.
    ///
    /// A token that fails to read or validate is treated as absent; the user
    /// simply lands on the token-entry view.
    pub async fn initialize(&mut self) {
        let stored = match self.store.get() {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!("failed to read persisted token: {error}");
                None
            }
        };
        let Some(value) = stored else {
            return;
        };
        match PersonalAccessToken::new(value) {
            Ok(token) => self.submit_token(token).await,
            Err(error) => tracing::warn!("ignoring unusable persisted token: {error}"),
        }
    }

    /// Submits a candidate token: fetches a snapshot and applies the outcome.
    ///
    /// The token-input collaborator guarantees the candidate is non-blank.
    /// The candidate is persisted only after the round-trip succeeds; it is
    /// never saved speculatively.
    pub async fn submit_token(&mut self, candidate: PersonalAccessToken) {
        self.begin_fetch();
        let gateway = Arc::clone(&self.gateway);
        let outcome = gateway.fetch_rate_limit(&candidate).await;
        self.complete_fetch(candidate, outcome);
    }

    /// Re-fetches with the active token; a no-op when logged out.
    pub async fn refresh(&mut self) {
        let Some(token) = self.token.clone() else {
            return;
        };
        self.submit_token(token).await;
    }

    /// Clears the token, snapshot, and error, and removes the persisted
    /// token. Idempotent.
    pub fn logout(&mut self) {
        self.token = None;
        self.phase = SessionPhase::LoggedOut;
        if let Err(error) = self.store.remove() {
            tracing::warn!("failed to remove persisted token: {error}");
        }
    }

    /// Marks a fetch as in flight, clearing any error and retaining the
    /// previous snapshot for display.
    ///
    /// Split out from [`Self::submit_token`] so an event loop can run the
    /// fetch as a separate command and feed the result back through
    /// [`Self::complete_fetch`].
    pub fn begin_fetch(&mut self) {
        let retained = self.take_snapshot();
        self.phase = SessionPhase::Loading { retained };
    }

    /// Applies a fetch outcome for the given candidate token.
    pub fn complete_fetch(
        &mut self,
        candidate: PersonalAccessToken,
        outcome: Result<RateLimitSnapshot, QuotaError>,
    ) {
        match outcome {
            Ok(snapshot) => self.apply_fetch_success(candidate, snapshot),
            Err(error) => self.apply_fetch_failure(&error),
        }
    }

    /// Applies a successful fetch: persist the candidate, make it the active
    /// token, and replace the snapshot wholesale.
    ///
    /// A persist failure is logged and does not fail the session; the token
    /// stays active in memory and the next success retries the write.
    pub fn apply_fetch_success(
        &mut self,
        candidate: PersonalAccessToken,
        snapshot: RateLimitSnapshot,
    ) {
        if let Err(error) = self.store.set(candidate.value()) {
            tracing::warn!("failed to persist token: {error}");
        }
        self.token = Some(candidate);
        self.phase = SessionPhase::Ready(snapshot);
    }

    /// Applies a failed fetch.
    ///
    /// A rejected credential clears the active and persisted token, sending
    /// the user back to token entry; any stale snapshot is retained either
    /// way. Other failures leave the token untouched so the user can retry.
    pub fn apply_fetch_failure(&mut self, error: &QuotaError) {
        if error.is_auth_error() {
            self.token = None;
            if let Err(store_error) = self.store.remove() {
                tracing::warn!("failed to remove persisted token: {store_error}");
            }
        }
        let retained = self.take_snapshot();
        self.phase = SessionPhase::Errored {
            message: error.to_string(),
            retained,
        };
    }

    /// Moves the displayable snapshot out of the current phase.
    fn take_snapshot(&mut self) -> Option<RateLimitSnapshot> {
        match mem::replace(&mut self.phase, SessionPhase::LoggedOut) {
            SessionPhase::Ready(snapshot) => Some(snapshot),
            SessionPhase::Loading { retained } | SessionPhase::Errored { retained, .. } => retained,
            SessionPhase::LoggedOut => None,
        }
    }
}
