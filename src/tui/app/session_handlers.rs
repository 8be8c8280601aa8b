//! Token submission, refresh, and logout handlers for the dashboard TUI.
//!
//! Fetches run as bubbletea-rs commands: the handler marks the session as
//! loading and returns a future that performs the HTTP round-trip and feeds
//! the outcome back into the update loop as a message.

use std::any::Any;

use bubbletea_rs::Cmd;

use super::DashboardApp;
use crate::github::error::QuotaError;
use crate::github::models::RateLimitSnapshot;
use crate::github::token::PersonalAccessToken;
use crate::tui::messages::AppMsg;
use crate::tui::storage;

impl DashboardApp {
    /// Handles submission of the token-entry field.
    ///
    /// Blank input is ignored rather than reported; the field simply keeps
    /// focus, matching a submit control that is disabled while empty.
    pub(super) fn handle_token_submitted(&mut self) -> Option<Cmd> {
        if self.controller.is_loading() {
            return None;
        }
        let candidate = PersonalAccessToken::new(self.token_entry.text()).ok()?;
        self.controller.begin_fetch();
        Some(Self::fetch_cmd(candidate))
    }

    /// Handles a manual refresh request with the active token.
    ///
    /// Skips the refresh if a fetch is already in flight to prevent
    /// duplicate requests.
    pub(super) fn handle_refresh_requested(&mut self) -> Option<Cmd> {
        if self.controller.is_loading() {
            return None;
        }
        let token = self.controller.token().cloned()?;
        self.controller.begin_fetch();
        Some(Self::fetch_cmd(token))
    }

    /// Applies a completed fetch to the session.
    pub(super) fn handle_fetch_completed(
        &mut self,
        candidate: &PersonalAccessToken,
        outcome: &Result<RateLimitSnapshot, QuotaError>,
    ) -> Option<Cmd> {
        self.controller
            .complete_fetch(candidate.clone(), outcome.clone());

        match outcome {
            Ok(snapshot) => {
                storage::record_fetch_telemetry(snapshot.resource_count());
                // Entering the dashboard; drop the entered text.
                self.token_entry.clear();
            }
            Err(error) if error.is_auth_error() => {
                // The rejected value is useless, clear it for re-entry.
                self.token_entry.clear();
            }
            Err(_) => {}
        }

        self.clamp_scroll();
        None
    }

    /// Handles an explicit logout.
    pub(super) fn handle_logout(&mut self) -> Option<Cmd> {
        self.controller.logout();
        self.token_entry.clear();
        self.scroll_offset = 0;
        None
    }

    /// Creates a command that fetches a snapshot and reports the outcome.
    pub(super) fn fetch_cmd(candidate: PersonalAccessToken) -> Cmd {
        Box::pin(async move {
            let outcome = storage::fetch_snapshot(&candidate).await;
            Some(Box::new(AppMsg::FetchCompleted { candidate, outcome }) as Box<dyn Any + Send>)
        })
    }
}
