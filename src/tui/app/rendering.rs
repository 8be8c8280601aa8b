//! Rendering logic for the dashboard TUI application.
//!
//! These are pure query methods that produce string output for the terminal
//! without modifying state.

use chrono::Utc;

use super::DashboardApp;
use crate::tui::components::{QuotaCardComponent, QuotaCardViewContext};

impl DashboardApp {
    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let title = "Ratescope - GitHub Rate Limits";
        let loading_indicator = if self.controller.is_loading() {
            " [Loading...]"
        } else {
            ""
        };
        format!("{title}{loading_indicator}\n")
    }

    /// Renders the token-entry view.
    pub(super) fn render_token_entry_view(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push('\n');
        output.push_str("Enter a GitHub personal access token to inspect your API quota.\n");
        output.push('\n');
        output.push_str(&format!("Token: {}_\n", self.token_entry.display_text()));
        output.push('\n');
        output.push_str(&self.render_entry_status());
        output.push_str("Enter:submit  Tab:show/hide  Esc:quit\n");
        output
    }

    fn render_entry_status(&self) -> String {
        if self.controller.is_loading() {
            return "Verifying token...\n".to_owned();
        }
        if let Some(error) = self.controller.error_message() {
            return format!("Error: {error}\n");
        }
        "\n".to_owned()
    }

    /// Renders the dashboard view: header, card list, status bar.
    pub(super) fn render_dashboard_view(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push_str(&self.render_card_list());
        output.push_str(&self.render_status_bar());
        output
    }

    /// Renders the visible window of quota cards.
    fn render_card_list(&self) -> String {
        let Some(snapshot) = self.controller.snapshot() else {
            return "No rate-limit data loaded yet. Press r to refresh.\n".to_owned();
        };

        let now = Utc::now();
        let width = self.content_width();
        let card = QuotaCardComponent::new();

        let mut lines: Vec<String> = Vec::new();
        // The overall `rate` quota leads; per-resource cards follow in
        // server order.
        let rate_ctx = QuotaCardViewContext {
            name: "rate",
            quota: &snapshot.rate,
            now,
            max_width: width,
        };
        lines.extend(card.view(&rate_ctx).lines().map(str::to_owned));
        for (name, quota) in &snapshot.resources {
            let ctx = QuotaCardViewContext {
                name,
                quota,
                now,
                max_width: width,
            };
            lines.extend(card.view(&ctx).lines().map(str::to_owned));
        }

        lines
            .into_iter()
            .skip(self.scroll_offset)
            .take(self.body_height())
            .map(|line| line + "\n")
            .collect()
    }

    /// Renders the status bar with errors or help hints.
    pub(super) fn render_status_bar(&self) -> String {
        if let Some(error) = self.controller.error_message() {
            return format!("Error: {error}\n");
        }
        "r:refresh  l:logout  j/k:scroll  ?:help  q:quit\n".to_owned()
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        let mut output = String::new();
        output.push_str("Ratescope Help\n");
        output.push('\n');
        output.push_str("Dashboard\n");
        output.push_str("  r        Refresh rate-limit data\n");
        output.push_str("  l        Log out and forget the token\n");
        output.push_str("  j / Down Scroll down\n");
        output.push_str("  k / Up   Scroll up\n");
        output.push_str("  ?        Toggle this help\n");
        output.push_str("  q / Esc  Quit\n");
        output.push('\n');
        output.push_str("Token entry\n");
        output.push_str("  Enter    Submit token\n");
        output.push_str("  Tab      Show or hide the token\n");
        output.push_str("  Esc      Quit\n");
        output.push('\n');
        output.push_str("Press any key to close this help.\n");
        output
    }
}
