use super::Point;
use crate::{time, Timestamp};
use chrono::Timelike;
use chrono_tz::Tz;

/// Day-aligned time range filter.
///
/// Bounds are widened to whole local days so partial days at the range
/// edges are not clipped: the lower bound becomes the start of its local
/// day, the upper bound the last millisecond of its local day (exclusive).
/// An unset bound leaves that side of the range open.
pub(crate) struct RangeFilter {
    floor: Option<Timestamp>,
    ceil: Option<Timestamp>,
}

impl RangeFilter {
    pub(crate) fn new(start: Option<Timestamp>, end: Option<Timestamp>, tz: Tz) -> Self {
        let floor = start
            .and_then(|ts| time::to_local(ts, tz))
            .and_then(|local| time::day_floor(&local));

        let ceil = end
            .and_then(|ts| time::to_local(ts, tz))
            .and_then(|local| time::day_ceil(&local));

        Self { floor, ceil }
    }

    pub(crate) fn contains(&self, point: &Point) -> bool {
        self.floor.map_or(true, |floor| floor <= point.time)
            && self.ceil.map_or(true, |ceil| point.time < ceil)
    }
}

/// Recurring time-of-day window, in minutes since local midnight.
///
/// Gates on the local hour only: a point's minute-of-hour does not
/// participate in the comparison, so the window effectively snaps to whole
/// hours even though it is expressed in minutes.
pub(crate) struct DailyIntervalFilter {
    start_minute: u32,
    end_minute: u32,
    tz: Tz,
}

impl DailyIntervalFilter {
    pub(crate) fn new((start_minute, end_minute): (u32, u32), tz: Tz) -> Self {
        Self {
            start_minute,
            end_minute,
            tz,
        }
    }

    pub(crate) fn contains(&self, point: &Point) -> bool {
        let Some(local) = time::to_local(point.time, self.tz) else {
            return false;
        };

        let minute_of_day = local.hour() * 60;

        self.start_minute <= minute_of_day && minute_of_day < self.end_minute
    }
}
