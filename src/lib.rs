//! Time-of-day heatmap bucketing for time series data.
//!
//! Takes a columnar time series frame ([`Frame`]), buckets timestamps into
//! day × time-of-day cells relative to a configured IANA timezone,
//! aggregates each bucket with one of seven calculations, and returns a
//! sparse rectangular grid ([`BucketData`]) ready for heatmap rendering
//! (x = day, y = time-of-day bucket, color = value).
//!
//! The pipeline is a pure function: no IO, no global state, fresh output
//! per call. Range filtering is day-aligned so partial days at the range
//! edges are never clipped, and buckets without data are absent from the
//! output rather than rendered as zero.
//!
//! ```
//! use heatgrid::{Calculation, Duration, Field, Frame};
//!
//! let start = 1_700_006_400_000; // 2023-11-15T00:00:00Z
//!
//! let times: Vec<i64> = (0..6).map(|i| start + Duration::minutes(5.0) * i).collect();
//! let values = vec![Some(2.0), Some(4.0), Some(6.0), None, Some(8.0), Some(10.0)];
//!
//! let frame = Frame::new("cpu.total")
//!     .with_field(Field::time("time", times))
//!     .with_field(Field::number("value", values));
//!
//! let data = frame
//!     .bucketize()
//!     .time_zone("UTC")
//!     .group_by(/* minutes */ 10)
//!     .calculation(Calculation::Mean)
//!     .run()?;
//!
//! assert_eq!(144, data.num_buckets);
//! assert_eq!(3, data.points.len());
//!
//! # Ok::<(), heatgrid::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod agg;
mod duration;
mod error;
mod frame;
mod time;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

pub use agg::{
    group_by_day, group_by_minutes, BucketData, BucketPoint, Builder, Calculation, Point, PointSet,
};
pub use duration::Duration;
pub use error::{Error, Result};
pub use frame::{BucketOptions, DisplayProcessor, DisplayValue, Field, FieldConfig, Frame};
pub use time::timestamp;

/// Unix timestamp in milliseconds.
pub type Timestamp = i64;

/// Value used in time series.
pub type Value = f64;
