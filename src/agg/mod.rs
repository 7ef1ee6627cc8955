pub(crate) mod builder;
pub(crate) mod calc;
pub(crate) mod filter;
pub(crate) mod group;
pub(crate) mod reduce;

pub use builder::Builder;
pub use calc::Calculation;
pub use group::{group_by_day, group_by_minutes};

use crate::{DisplayProcessor, Timestamp, Value};

pub(crate) const MINUTES_PER_DAY: u32 = 24 * 60;

/// A single raw sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// Unix millisecond timestamp of the sample.
    pub time: Timestamp,

    /// Sample value; NaN marks a gap in the source column.
    pub value: Value,
}

/// Samples sharing one bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    /// Start-of-bucket instant in the configured timezone.
    pub time: Timestamp,

    /// The bucket's samples, in input order.
    pub values: Vec<Point>,
}

/// One cell of the final grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BucketPoint {
    /// Start of the timezone-local day containing `bucket_start_millis`.
    pub day_millis: Timestamp,

    /// Start of the bucket within that day, for example the start of every
    /// hour.
    pub bucket_start_millis: Timestamp,

    /// Aggregated value of the cell.
    pub value: Value,
}

/// The complete renderable result of a bucketed aggregation.
#[derive(Clone, Debug)]
pub struct BucketData {
    /// Number of buckets per day; `floor(1440 / bucket size in minutes)`.
    pub num_buckets: u32,

    /// Lower bound of the renderable scale; negative infinity when the
    /// value field does not carry one.
    pub min: Value,

    /// Upper bound of the renderable scale; positive infinity when the
    /// value field does not carry one.
    pub max: Value,

    /// The grid cells. Sparse: a missing cell means no data, not zero.
    pub points: Vec<BucketPoint>,

    /// Formatter for cell values.
    pub value_display: DisplayProcessor,

    /// Formatter for cell times.
    pub time_display: DisplayProcessor,
}
