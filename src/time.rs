use crate::Timestamp;
use chrono::{DateTime, LocalResult, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Returns the current timestamp in milliseconds.
#[must_use]
pub fn timestamp() -> Timestamp {
    Utc::now().timestamp_millis()
}

pub(crate) fn parse_time_zone(name: &str) -> crate::Result<Tz> {
    name.parse()
        .map_err(|_| crate::Error::InvalidTimeZone(name.to_string()))
}

/// Projects a unix millisecond timestamp into the given timezone.
///
/// Returns `None` for timestamps outside the representable range.
pub(crate) fn to_local(ts: Timestamp, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp_millis(ts).map(|utc| utc.with_timezone(&tz))
}

// Ambiguous local times (DST fall-back) resolve to the earliest instant.
// Nonexistent local times (DST gap) retry one hour later.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => match tz.from_local_datetime(&(naive + TimeDelta::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
            LocalResult::None => None,
        },
    }
}

/// Start of the local day containing `dt`, in unix milliseconds.
pub(crate) fn day_floor(dt: &DateTime<Tz>) -> Option<Timestamp> {
    let midnight = dt.date_naive().and_time(NaiveTime::MIN);
    resolve_local(dt.timezone(), midnight).map(|d| d.timestamp_millis())
}

/// Last millisecond of the local day containing `dt`.
pub(crate) fn day_ceil(dt: &DateTime<Tz>) -> Option<Timestamp> {
    let next_midnight = dt.date_naive().succ_opt()?.and_time(NaiveTime::MIN);
    resolve_local(dt.timezone(), next_midnight).map(|d| d.timestamp_millis() - 1)
}

/// Start of the bucket containing `dt`: seconds zeroed and minute-of-hour
/// rounded down to the nearest multiple of `minutes`, with date and hour
/// unchanged.
pub(crate) fn bucket_floor(dt: &DateTime<Tz>, minutes: u32) -> Option<Timestamp> {
    let minute = dt.minute() - dt.minute() % minutes;
    let start = dt.date_naive().and_hms_opt(dt.hour(), minute, 0)?;
    resolve_local(dt.timezone(), start).map(|d| d.timestamp_millis())
}
