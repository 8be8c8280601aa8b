//! Derived display values for quota cards.
//!
//! Pure, stateless calculations: usage percentages, a severity tier, and
//! human-readable reset times. Nothing here performs I/O or mutates a quota;
//! callers re-evaluate on every render because the relative reset time
//! depends on the current wall clock.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::github::models::ResourceQuota;

/// Fixed message shown once the reset time is in the past (or now).
pub const RESETTING_SOON: &str = "Resetting soon";

/// Placeholder clock string for reset timestamps outside the representable
/// range.
const INVALID_CLOCK: &str = "--:--:--";

const MILLIS_PER_MINUTE: u64 = 60_000;

/// Coarse severity classification derived from remaining capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTier {
    /// At least half of the window remains.
    Normal,
    /// Less than half remains.
    Warning,
    /// Less than a fifth remains.
    Critical,
}

impl SeverityTier {
    /// Short label used by the dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Glyph used to fill the usage bar for this tier.
    #[must_use]
    pub const fn bar_glyph(self) -> char {
        match self {
            Self::Normal => '#',
            Self::Warning => '=',
            Self::Critical => '!',
        }
    }
}

/// Percentage of the window already consumed.
///
/// A zero limit yields 0 rather than dividing by zero. The raw value may
/// exceed 100 when the server reports `used > limit`.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "display-only maths; quota counts are far below 2^52"
)]
pub fn percentage_used(quota: &ResourceQuota) -> f64 {
    if quota.limit == 0 {
        return 0.0;
    }
    quota.used as f64 / quota.limit as f64 * 100.0
}

/// Usage percentage clamped to `[0, 100]` for bar rendering.
///
/// The clamp is a display-only safeguard; the underlying quota is untouched.
#[must_use]
pub fn percentage_used_clamped(quota: &ResourceQuota) -> f64 {
    percentage_used(quota).clamp(0.0, 100.0)
}

/// Percentage of the window still available. Zero when the limit is zero.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "display-only maths; quota counts are far below 2^52"
)]
pub fn percentage_remaining(quota: &ResourceQuota) -> f64 {
    if quota.limit == 0 {
        return 0.0;
    }
    quota.remaining as f64 / quota.limit as f64 * 100.0
}

/// Classifies remaining capacity into a severity tier.
///
/// Strict `<` comparisons mean a value exactly on a boundary falls into the
/// safer tier: exactly 50% is `Normal`, exactly 20% is `Warning`.
#[must_use]
pub fn severity_tier(quota: &ResourceQuota) -> SeverityTier {
    let remaining = percentage_remaining(quota);
    if remaining < 20.0 {
        SeverityTier::Critical
    } else if remaining < 50.0 {
        SeverityTier::Warning
    } else {
        SeverityTier::Normal
    }
}

/// Reset time as a local `HH:MM:SS` clock string.
#[must_use]
pub fn reset_clock_time(quota: &ResourceQuota) -> String {
    reset_clock_time_in(quota, &Local)
}

/// Reset time as `HH:MM:SS` in an explicit timezone.
#[must_use]
pub fn reset_clock_time_in<Tz>(quota: &ResourceQuota, timezone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let seconds = i64::try_from(quota.reset_at).unwrap_or(i64::MAX);
    timezone
        .timestamp_opt(seconds, 0)
        .single()
        .map_or_else(|| INVALID_CLOCK.to_owned(), |moment| {
            moment.format("%H:%M:%S").to_string()
        })
}

/// Relative reset time, e.g. `in 15 mins` or `in 1 min`.
///
/// Minutes are the ceiling of the millisecond difference, so one second in
/// the future already reads `in 1 min`. Past (or current) reset times render
/// the fixed [`RESETTING_SOON`] message; negative minute counts are never
/// shown.
#[must_use]
pub fn reset_relative(quota: &ResourceQuota, now: DateTime<Utc>) -> String {
    let reset_millis = i64::try_from(quota.reset_at)
        .unwrap_or(i64::MAX)
        .saturating_mul(1000);
    let difference = reset_millis.saturating_sub(now.timestamp_millis());
    if difference <= 0 {
        return RESETTING_SOON.to_owned();
    }
    let minutes = difference.unsigned_abs().div_ceil(MILLIS_PER_MINUTE);

    if minutes == 1 {
        "in 1 min".to_owned()
    } else {
        format!("in {minutes} mins")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;

    use super::{
        RESETTING_SOON, SeverityTier, percentage_remaining, percentage_used,
        percentage_used_clamped, reset_clock_time_in, reset_relative, severity_tier,
    };
    use crate::github::models::test_support::quota;
    use crate::github::models::ResourceQuota;

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("fixed timestamp should be valid")
    }

    #[test]
    fn zero_limit_yields_zero_percentages() {
        let zero = quota(0, 0, 0, 0);
        assert!((percentage_used(&zero) - 0.0).abs() < f64::EPSILON);
        assert!((percentage_remaining(&zero) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overflow_usage_is_clamped_for_display_only() {
        let over = quota(30, 45, 0, 0);
        assert!(percentage_used(&over) > 100.0);
        assert!((percentage_used_clamped(&over) - 100.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case::exactly_half(quota(30, 15, 15, 0), SeverityTier::Normal)]
    #[case::exactly_one_fifth(quota(30, 24, 6, 0), SeverityTier::Warning)]
    #[case::just_below_one_fifth(quota(30, 25, 5, 0), SeverityTier::Critical)]
    #[case::just_below_half(quota(100, 51, 49, 0), SeverityTier::Warning)]
    #[case::plenty_left(quota(5000, 10, 4990, 0), SeverityTier::Normal)]
    #[case::zero_limit(quota(0, 0, 0, 0), SeverityTier::Critical)]
    #[case::exhausted(quota(30, 30, 0, 0), SeverityTier::Critical)]
    fn tier_boundaries(#[case] resource: ResourceQuota, #[case] expected: SeverityTier) {
        assert_eq!(severity_tier(&resource), expected);
    }

    #[rstest]
    #[case::fifteen_minutes(15 * 60, "in 15 mins")]
    #[case::exactly_one_minute(60, "in 1 min")]
    #[case::one_second_rounds_up(1, "in 1 min")]
    #[case::ninety_seconds_round_up(90, "in 2 mins")]
    fn relative_reset_formats_future_offsets(#[case] offset_seconds: i64, #[case] expected: &str) {
        let now = fixed_now();
        let reset_at = (now + Duration::seconds(offset_seconds)).timestamp();
        let resource = quota(
            100,
            0,
            100,
            u64::try_from(reset_at).expect("fixture timestamp is positive"),
        );
        assert_eq!(reset_relative(&resource, now), expected);
    }

    #[rstest]
    #[case::in_the_past(-600)]
    #[case::right_now(0)]
    fn relative_reset_never_shows_negative_minutes(#[case] offset_seconds: i64) {
        let now = fixed_now();
        let reset_at = (now + Duration::seconds(offset_seconds)).timestamp();
        let resource = quota(
            100,
            0,
            100,
            u64::try_from(reset_at).expect("fixture timestamp is positive"),
        );
        assert_eq!(reset_relative(&resource, now), RESETTING_SOON);
    }

    #[test]
    fn clock_time_formats_hours_minutes_seconds() {
        // 1700000000 is 2023-11-14 22:13:20 UTC.
        let resource = quota(100, 0, 100, 1_700_000_000);
        assert_eq!(reset_clock_time_in(&resource, &Utc), "22:13:20");
    }

    #[test]
    fn clock_time_falls_back_for_unrepresentable_timestamps() {
        let resource = quota(100, 0, 100, u64::MAX);
        assert_eq!(reset_clock_time_in(&resource, &Utc), "--:--:--");
    }
}
