//! Main TUI application model implementing the MVU pattern.
//!
//! This module provides the core application state and update logic for the
//! rate-limit dashboard. It coordinates the token-entry field, the session
//! controller, and the quota cards, and handles async data loading.
//!
//! # Module Structure
//!
//! - `rendering`: View rendering methods for terminal output
//! - `session_handlers`: Token submission, refresh, and logout handling

use std::any::Any;

use bubbletea_rs::{Cmd, Model};
use unicode_width::UnicodeWidthChar;

use super::input::{InputContext, map_key_to_message_with_context};
use super::messages::AppMsg;
use super::state::TokenEntryState;
use super::storage;
use crate::session::SessionController;

mod rendering;
mod session_handlers;

/// Lines each quota card occupies, including its trailing separator.
pub(crate) const CARD_HEIGHT: usize = 5;

/// Main application model for the rate-limit dashboard TUI.
pub struct DashboardApp {
    /// Session lifecycle state machine.
    pub(crate) controller: SessionController,
    /// Token-entry field state.
    pub(crate) token_entry: TokenEntryState,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    /// Number of card-list lines scrolled from the top.
    pub(crate) scroll_offset: usize,
}

impl DashboardApp {
    /// Creates an application around the given session controller.
    #[must_use]
    pub fn new(controller: SessionController) -> Self {
        let (width, height) = storage::get_initial_terminal_size();
        Self {
            controller,
            token_entry: TokenEntryState::new(),
            width,
            height,
            show_help: false,
            scroll_offset: 0,
        }
    }

    /// Returns the session controller, for inspection in tests and wiring.
    #[must_use]
    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Handles a message and updates state accordingly.
    ///
    /// This is the core update function. It delegates fetch-related messages
    /// to the session handlers and handles view-local concerns inline.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::TokenInputChar(ch) => {
                self.token_entry.push_char(*ch);
                None
            }
            AppMsg::TokenInputBackspace => {
                self.token_entry.backspace();
                None
            }
            AppMsg::TokenInputToggleVisibility => {
                self.token_entry.toggle_visibility();
                None
            }
            AppMsg::TokenSubmitted => self.handle_token_submitted(),
            AppMsg::RefreshRequested => self.handle_refresh_requested(),
            AppMsg::FetchCompleted { candidate, outcome } => {
                self.handle_fetch_completed(candidate, outcome)
            }
            AppMsg::Logout => self.handle_logout(),
            AppMsg::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            AppMsg::ScrollDown => {
                self.handle_scroll_down();
                None
            }
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                self.clamp_scroll();
                None
            }
        }
    }

    /// Returns the current input context for context-aware key mapping.
    ///
    /// The token-entry view has focus whenever no token is active, which
    /// covers first launch and the forced logout after a rejected credential.
    pub(crate) const fn input_context(&self) -> InputContext {
        if self.controller.token().is_none() {
            InputContext::TokenEntry
        } else {
            InputContext::Dashboard
        }
    }

    fn handle_scroll_down(&mut self) {
        if self.scroll_offset < self.max_scroll() {
            self.scroll_offset = self.scroll_offset.saturating_add(1);
        }
    }

    pub(crate) fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Highest useful scroll offset: total card lines minus the visible body.
    ///
    /// The overall `rate` card adds one to the per-resource count.
    fn max_scroll(&self) -> usize {
        let card_lines = self.controller.snapshot().map_or(0, |snapshot| {
            snapshot.resource_count().saturating_add(1) * CARD_HEIGHT
        });
        card_lines.saturating_sub(self.body_height())
    }

    /// Lines available to the card list after header and status bar.
    pub(crate) fn body_height(&self) -> usize {
        const CHROME_HEIGHT: usize = 3;
        (self.height as usize).saturating_sub(CHROME_HEIGHT).max(1)
    }

    pub(crate) fn terminal_width(&self) -> usize {
        (self.width as usize).max(1)
    }

    /// Width available to rendered content.
    ///
    /// One column short of the terminal, matching the viewport clamp, so
    /// right-aligned card badges are never cut off.
    pub(crate) fn content_width(&self) -> usize {
        self.terminal_width().saturating_sub(1).max(1)
    }

    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are clamped to one column less than terminal width to avoid
    /// autowrap, and padded with spaces to clear stale trailing cells after
    /// resize.
    fn normalise_viewport(&self, output: &str) -> String {
        let safe_width = self.content_width();
        let height = (self.height as usize).max(1);

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| pad_or_truncate_line(line, safe_width))
            .collect();
        lines.truncate(height);
        lines.join("\n")
    }
}

fn pad_or_truncate_line(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible_width = 0_usize;

    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if char_width == 0 {
            output.push(ch);
            continue;
        }
        if visible_width.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible_width = visible_width.saturating_add(char_width);
    }

    output.push_str(&" ".repeat(width.saturating_sub(visible_width)));
    output
}

impl Model for DashboardApp {
    fn init() -> (Self, Option<Cmd>) {
        // Retrieve collaborators from module-level storage.
        let controller = storage::session_controller();
        let mut model = Self::new(controller);

        // Submit any startup token (CLI flag, environment, or persisted)
        // without waiting for user input.
        let cmd = storage::initial_token().map(|token| {
            model.controller.begin_fetch();
            Self::fetch_cmd(token)
        });

        (model, cmd)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            // Any key dismisses the help overlay.
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let context = self.input_context();
            if let Some(mapped) = map_key_to_message_with_context(key_msg, context) {
                return self.handle_message(&mapped);
            }
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let output = if self.controller.token().is_none() {
            self.render_token_entry_view()
        } else {
            self.render_dashboard_view()
        };
        self.normalise_viewport(&output)
    }
}
