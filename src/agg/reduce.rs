use super::{Calculation, Point, PointSet};

/// Applies a calculation to each point set, producing one point per
/// bucket at the bucket's start instant.
///
/// Sets whose calculation yields nothing (all gaps) are dropped rather
/// than carried as zero.
pub(crate) fn reduce(sets: Vec<PointSet>, calculation: Calculation) -> Vec<Point> {
    sets.into_iter()
        .filter_map(|set| {
            calculation
                .apply(&set.values)
                .map(|value| Point {
                    time: set.time,
                    value,
                })
        })
        .collect()
}
