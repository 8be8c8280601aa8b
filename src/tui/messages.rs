//! Message types for the TUI update loop.
//!
//! Messages represent user actions, async command results, and system
//! events processed by the application's update function.

use crate::github::error::QuotaError;
use crate::github::models::RateLimitSnapshot;
use crate::github::token::PersonalAccessToken;

/// Messages for the rate-limit dashboard TUI application.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    // Token entry
    /// A printable character was typed into the token field.
    TokenInputChar(char),
    /// Delete the last character of the token field.
    TokenInputBackspace,
    /// Toggle between masked and clear-text token display.
    TokenInputToggleVisibility,
    /// Submit the entered token for verification.
    TokenSubmitted,

    // Data loading
    /// Request a refresh with the active token.
    RefreshRequested,
    /// A fetch finished, successfully or not.
    FetchCompleted {
        /// Token the fetch was performed with.
        candidate: PersonalAccessToken,
        /// Snapshot on success, error on failure.
        outcome: Result<RateLimitSnapshot, QuotaError>,
    },

    // Session lifecycle
    /// Forget the active and persisted token and return to token entry.
    Logout,

    // Dashboard navigation
    /// Scroll the card list up one row.
    ScrollUp,
    /// Scroll the card list down one row.
    ScrollDown,

    // Application lifecycle
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}
