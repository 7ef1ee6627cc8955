use super::{Point, PointSet};
use crate::time;
use chrono_tz::Tz;
use std::hash::Hash;

/// Groups items by a computed key, preserving first-seen key order.
///
/// Both the minute-bucket and the day grouping run through here; the only
/// difference between them is the key function.
pub(crate) fn group_by_key<K, V, F>(items: Vec<V>, key_of: F) -> Vec<(K, Vec<V>)>
where
    K: Copy + Eq + Hash,
    F: Fn(&V) -> K,
{
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();
    let mut slots: crate::HashMap<K, usize> = crate::HashMap::default();

    for item in items {
        let key = key_of(&item);

        if let Some(&slot) = slots.get(&key) {
            if let Some((_, values)) = groups.get_mut(slot) {
                values.push(item);
            }
        } else {
            slots.insert(key, groups.len());
            groups.push((key, vec![item]));
        }
    }

    groups
}

fn into_point_sets(groups: Vec<(crate::Timestamp, Vec<Point>)>) -> Vec<PointSet> {
    groups
        .into_iter()
        .map(|(time, values)| PointSet { time, values })
        .collect()
}

/// Groups points into fixed-size buckets relative to timezone-local clock
/// time. Only buckets that contain at least one point materialize.
pub(crate) fn by_bucket_start(points: Vec<Point>, minutes: u32, tz: Tz) -> Vec<PointSet> {
    into_point_sets(group_by_key(points, |point| {
        time::to_local(point.time, tz)
            .and_then(|local| time::bucket_floor(&local, minutes))
            .unwrap_or(point.time)
    }))
}

/// Groups points by the timezone-local day they fall in.
pub(crate) fn by_day(points: Vec<Point>, tz: Tz) -> Vec<PointSet> {
    into_point_sets(group_by_key(points, |point| {
        time::to_local(point.time, tz)
            .and_then(|local| time::day_floor(&local))
            .unwrap_or(point.time)
    }))
}

/// Groups points into fixed-size buckets relative to clock time in the
/// given timezone, preserving first-seen order of distinct bucket starts.
///
/// # Errors
///
/// Returns an error if the timezone string is invalid or the bucket size
/// is zero minutes.
pub fn group_by_minutes(
    points: Vec<Point>,
    minutes: u32,
    time_zone: &str,
) -> crate::Result<Vec<PointSet>> {
    if minutes == 0 {
        return Err(crate::Error::InvalidBucketSize(minutes));
    }

    let tz = time::parse_time_zone(time_zone)?;

    Ok(by_bucket_start(points, minutes, tz))
}

/// Groups points by the day they fall in, in the given timezone,
/// preserving first-seen order of distinct days.
///
/// # Errors
///
/// Returns an error if the timezone string is invalid.
pub fn group_by_day(points: Vec<Point>, time_zone: &str) -> crate::Result<Vec<PointSet>> {
    let tz = time::parse_time_zone(time_zone)?;

    Ok(by_day(points, tz))
}
