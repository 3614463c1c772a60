//! Travel-time estimates and their display text.
//!
//! Durations are shown the way the delivery screens expect them: whole
//! minutes below an hour (`"24 phút"`), otherwise hours with an optional
//! minute part (`"1h"`, `"1h 30p"`).

use std::time::Duration;

const SECONDS_PER_HOUR: f64 = 3_600.0;
const MINUTES_PER_HOUR: u64 = 60;

/// Render a duration given in hours.
///
/// Total minutes are rounded first and then split, so `0.999` hours reads
/// as `"1h"` rather than `"60 phút"`. Negative and non-finite input is
/// treated as zero.
///
/// # Examples
/// ```
/// use wayfarer_core::format_duration_text;
///
/// assert_eq!(format_duration_text(0.4), "24 phút");
/// assert_eq!(format_duration_text(1.0), "1h");
/// assert_eq!(format_duration_text(1.5), "1h 30p");
/// ```
#[must_use]
pub fn format_duration_text(hours: f64) -> String {
    let total_minutes = rounded_minutes(hours);
    let whole_hours = total_minutes / MINUTES_PER_HOUR;
    let minutes = total_minutes % MINUTES_PER_HOUR;
    match (whole_hours, minutes) {
        (0, m) => format!("{m} phút"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}p"),
    }
}

/// Render a [`Duration`] with [`format_duration_text`].
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format_duration_text(duration.as_secs_f64() / SECONDS_PER_HOUR)
}

/// Estimated driving time for `distance_km` at `speed_kmh`.
///
/// A non-positive or non-finite speed yields [`Duration::ZERO`] rather than
/// an infinite estimate.
#[must_use]
pub fn estimate_travel_time(distance_km: f64, speed_kmh: f64) -> Duration {
    if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
        return Duration::ZERO;
    }
    hours_to_duration(distance_km / speed_kmh)
}

/// Convert fractional hours to a [`Duration`], clamping invalid input to zero.
#[must_use]
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::try_from_secs_f64(hours * SECONDS_PER_HOUR).unwrap_or(Duration::ZERO)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded, finite and non-negative before the cast"
)]
fn rounded_minutes(hours: f64) -> u64 {
    let minutes = (hours * 60.0).round();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.4, "24 phút")]
    #[case(1.0, "1h")]
    #[case(1.5, "1h 30p")]
    #[case(0.0, "0 phút")]
    #[case(0.999, "1h")]
    #[case(2.26, "2h 16p")]
    #[case(-3.0, "0 phút")]
    #[case(f64::NAN, "0 phút")]
    fn formats_hours(#[case] hours: f64, #[case] expected: &str) {
        assert_eq!(format_duration_text(hours), expected);
    }

    #[rstest]
    fn formats_duration_values() {
        assert_eq!(format_duration(Duration::from_secs(5_400)), "1h 30p");
        assert_eq!(format_duration(Duration::from_secs(90)), "2 phút");
    }

    #[rstest]
    fn estimates_from_average_speed() {
        let eta = estimate_travel_time(75.0, 50.0);
        assert_eq!(eta, Duration::from_secs(5_400));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::INFINITY)]
    fn invalid_speed_gives_zero(#[case] speed: f64) {
        assert_eq!(estimate_travel_time(10.0, speed), Duration::ZERO);
    }
}
