/// Helpers for calculating millisecond durations
///
/// ```
/// use heatgrid::{timestamp, Duration};
///
/// assert_eq!(300_000, Duration::minutes(5.0));
/// assert_eq!(86_400_000, Duration::days(1.0));
///
/// // e.g. the start of a two week window ending now
/// let start = timestamp() - Duration::weeks(2.0);
/// ```
pub struct Duration;

impl Duration {
    /// Formats N years as millisecond time frame.
    #[must_use]
    pub const fn years(n: f64) -> i64 {
        Self::months(n) * 12
    }

    /// Formats N months as millisecond time frame.
    #[must_use]
    pub const fn months(n: f64) -> i64 {
        Self::weeks(n) * 4
    }

    /// Formats N weeks as millisecond time frame.
    #[must_use]
    pub const fn weeks(n: f64) -> i64 {
        Self::days(n) * 7
    }

    /// Formats N days as millisecond time frame.
    #[must_use]
    pub const fn days(n: f64) -> i64 {
        Self::hours(n) * 24
    }

    /// Formats N hours as millisecond time frame.
    #[must_use]
    pub const fn hours(n: f64) -> i64 {
        Self::minutes(n) * 60
    }

    /// Formats N minutes as millisecond time frame.
    #[must_use]
    pub const fn minutes(n: f64) -> i64 {
        Self::seconds(n) * 60
    }

    /// Formats N seconds as millisecond time frame.
    #[must_use]
    pub const fn seconds(n: f64) -> i64 {
        Self::millis(n) * 1_000
    }

    /// Formats N milliseconds as millisecond time frame.
    #[must_use]
    pub const fn millis(n: f64) -> i64 {
        n as i64
    }
}
