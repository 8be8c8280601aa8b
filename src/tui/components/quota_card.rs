//! Quota card component for displaying one rate-limited resource.
//!
//! Each card shows the resource name, a usage bar, the raw counters, and
//! when the window resets, mirroring the per-resource card layout of the
//! dashboard.

use chrono::{DateTime, Utc};

use crate::github::models::ResourceQuota;
use crate::presentation::{
    SeverityTier, percentage_used, percentage_used_clamped, reset_clock_time, reset_relative,
    severity_tier,
};

/// Minimum width of the usage bar in cells, excluding the brackets.
const MIN_BAR_WIDTH: usize = 10;

/// Horizontal padding consumed by the bar's brackets and trailing label.
const BAR_CHROME_WIDTH: usize = 12;

/// Context for rendering a single quota card.
#[derive(Debug, Clone)]
pub struct QuotaCardViewContext<'a> {
    /// Raw resource key, e.g. `code_scanning_upload`.
    pub name: &'a str,
    /// Quota counters for the resource.
    pub quota: &'a ResourceQuota,
    /// Reference instant for relative reset times.
    pub now: DateTime<Utc>,
    /// Maximum width in cells available to the card.
    pub max_width: usize,
}

/// Component for displaying a single rate-limited resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotaCardComponent;

impl QuotaCardComponent {
    /// Creates a new quota card component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the card as a block of lines terminated by a blank line.
    #[must_use]
    pub fn view(&self, ctx: &QuotaCardViewContext<'_>) -> String {
        let quota = ctx.quota;
        let tier = severity_tier(quota);
        let width = ctx.max_width.max(MIN_BAR_WIDTH + BAR_CHROME_WIDTH);

        let mut output = String::new();
        output.push_str(&render_title_line(ctx.name, quota, width));
        output.push_str(&render_bar_line(quota, tier, width));
        output.push_str(&render_detail_line(quota, ctx.now));
        output.push_str(resource_description(ctx.name));
        output.push('\n');
        output.push('\n');
        output
    }
}

/// Resource name with the remaining/limit badge right-aligned.
fn render_title_line(name: &str, quota: &ResourceQuota, width: usize) -> String {
    let title = display_title(name);
    let badge = format!("{} / {}", quota.remaining, quota.limit);
    let padding = width
        .saturating_sub(title.chars().count())
        .saturating_sub(badge.chars().count())
        .max(1);
    format!("{title}{}{badge}\n", " ".repeat(padding))
}

/// Usage bar with a percentage label, glyph chosen by severity.
fn render_bar_line(quota: &ResourceQuota, tier: SeverityTier, width: usize) -> String {
    let bar_width = width.saturating_sub(BAR_CHROME_WIDTH).max(MIN_BAR_WIDTH);
    let used = percentage_used_clamped(quota);

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_arithmetic,
        reason = "display-only maths; bar widths are tiny"
    )]
    let filled = ((used / 100.0) * bar_width as f64).round() as usize;
    let filled = filled.min(bar_width);

    let glyph = tier.bar_glyph().to_string();
    let bar = format!(
        "[{}{}]",
        glyph.repeat(filled),
        " ".repeat(bar_width.saturating_sub(filled))
    );
    format!("{bar} {:>5.1}% used\n", percentage_used(quota))
}

/// Raw counters plus the absolute and relative reset time.
fn render_detail_line(quota: &ResourceQuota, now: DateTime<Utc>) -> String {
    format!(
        "Used: {}   Reset: {} ({})\n",
        quota.used,
        reset_clock_time(quota),
        reset_relative(quota, now)
    )
}

/// Formats a resource key for display: underscores become spaces and each
/// word is capitalised.
#[must_use]
pub fn display_title(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Returns a short description of what the named resource covers.
#[must_use]
pub fn resource_description(name: &str) -> &'static str {
    match name {
        "rate" => "Overall API rate limit across all resources",
        "core" => "General API calls including most endpoints",
        "search" => "Search API for repositories, users, and code",
        "graphql" => "GraphQL API queries and mutations",
        "integration_manifest" => "Integration manifest API",
        "source_import" => "Source import API",
        "code_scanning_upload" => "Code scanning upload API",
        "code_scanning_autofix" => "Code scanning autofix API",
        "actions_runner_registration" => "Actions runner registration API",
        "scim" => "SCIM API for user management",
        "dependency_snapshots" => "Dependency snapshots API",
        "dependency_sbom" => "Dependency SBOM API",
        "audit_log" => "Audit log API",
        "audit_log_streaming" => "Audit log streaming API",
        "code_search" => "Code search API",
        _ => "GitHub API rate limit",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::{QuotaCardComponent, QuotaCardViewContext, display_title, resource_description};
    use crate::github::models::test_support::quota;

    #[rstest]
    #[case("core", "Core")]
    #[case("code_scanning_upload", "Code Scanning Upload")]
    #[case("audit_log", "Audit Log")]
    fn display_title_capitalises_words(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(display_title(raw), expected);
    }

    #[rstest]
    #[case("rate", "Overall API rate limit across all resources")]
    #[case("core", "General API calls including most endpoints")]
    #[case("unknown_resource", "GitHub API rate limit")]
    fn resource_description_has_a_fallback(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(resource_description(name), expected);
    }

    #[rstest]
    fn view_includes_badge_counters_and_reset() {
        let now = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp");
        let resource = quota(5000, 120, 4880, 1_700_000_900);
        let ctx = QuotaCardViewContext {
            name: "core",
            quota: &resource,
            now,
            max_width: 60,
        };

        let rendered = QuotaCardComponent::new().view(&ctx);

        assert!(rendered.contains("Core"));
        assert!(rendered.contains("4880 / 5000"));
        assert!(rendered.contains("Used: 120"));
        assert!(rendered.contains("(in 15 mins)"));
        assert!(rendered.contains("General API calls including most endpoints"));
    }

    #[rstest]
    fn exhausted_resource_renders_a_critical_bar() {
        let now = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp");
        let resource = quota(30, 30, 0, 1_699_999_000);
        let ctx = QuotaCardViewContext {
            name: "search",
            quota: &resource,
            now,
            max_width: 60,
        };

        let rendered = QuotaCardComponent::new().view(&ctx);

        assert!(rendered.contains('!'));
        assert!(rendered.contains("100.0% used"));
        assert!(rendered.contains("(Resetting soon)"));
    }
}
