use super::filter::{DailyIntervalFilter, RangeFilter};
use super::reduce::reduce;
use super::{group, BucketData, BucketPoint, Calculation, Point, MINUTES_PER_DAY};
use crate::frame::{Field, Frame};
use crate::{time, Timestamp, Value};

const DEFAULT_GROUP_BY: u32 = 60;
const DEFAULT_CALCULATION: Calculation = Calculation::Mean;

/// Builds a bucketed aggregation over a [`Frame`].
///
/// Created by [`Frame::bucketize`]. Bucket size and calculation resolve
/// from explicit overrides first, then the value field's
/// [`crate::BucketOptions`], then the defaults (60 minutes, mean).
pub struct Builder<'a> {
    /// The frame to aggregate
    frame: &'a Frame,

    /// IANA timezone the grid is aligned to
    time_zone: &'a str,

    /// Minimum timestamp to include (widened to its local day)
    start: Option<Timestamp>,

    /// Maximum timestamp to include (widened to its local day)
    end: Option<Timestamp>,

    /// Recurring time-of-day window in minutes since local midnight
    daily_interval: (u32, u32),

    /// Bucket size in minutes
    group_by: Option<u32>,

    /// Aggregate function applied per bucket
    calculation: Option<Calculation>,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(frame: &'a Frame) -> Self {
        Self {
            frame,
            time_zone: "UTC",
            start: None,
            end: None,
            daily_interval: (0, MINUTES_PER_DAY),
            group_by: None,
            calculation: None,
        }
    }

    /// Sets the IANA timezone the grid is aligned to.
    ///
    /// e.g. `Europe/Helsinki`
    #[must_use]
    pub fn time_zone(mut self, time_zone: &'a str) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Sets the minimum timestamp to include.
    #[must_use]
    pub fn start(mut self, ts: Timestamp) -> Self {
        self.start = Some(ts);
        self
    }

    /// Sets the maximum timestamp to include.
    #[must_use]
    pub fn end(mut self, ts: Timestamp) -> Self {
        self.end = Some(ts);
        self
    }

    /// Restricts the grid to a recurring time-of-day window, given in
    /// minutes since local midnight.
    ///
    /// e.g. `(9 * 60, 17 * 60)` for 9am to 5pm
    #[must_use]
    pub fn daily_interval(mut self, start_minute: u32, end_minute: u32) -> Self {
        self.daily_interval = (start_minute, end_minute);
        self
    }

    /// Bucket size in minutes, overriding the value field's options.
    #[must_use]
    pub fn group_by(mut self, minutes: u32) -> Self {
        self.group_by = Some(minutes);
        self
    }

    /// Calculation to apply per bucket, overriding the value field's
    /// options.
    #[must_use]
    pub fn calculation(mut self, calculation: Calculation) -> Self {
        self.calculation = Some(calculation);
        self
    }

    /// Runs the aggregation pipeline and returns the renderable grid.
    ///
    /// A frame without a time or number field renders as an empty grid,
    /// since the host may ask for one before any query has returned data.
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone, bucket size or calculation name
    /// is invalid.
    pub fn run(self) -> crate::Result<BucketData> {
        let tz = time::parse_time_zone(self.time_zone)?;

        let time_field = self.frame.time_field();
        let value_field = self.frame.value_field();

        let options = value_field.and_then(|field| field.config.custom.as_ref());

        let group_by = self
            .group_by
            .or_else(|| options.map(|opts| opts.group_by))
            .unwrap_or(DEFAULT_GROUP_BY);

        if group_by == 0 {
            return Err(crate::Error::InvalidBucketSize(group_by));
        }

        let calculation = match (self.calculation, options) {
            (Some(calculation), _) => calculation,
            (None, Some(opts)) => Calculation::try_from(opts.calculation.as_str())?,
            (None, None) => DEFAULT_CALCULATION,
        };

        let (Some(time_field), Some(value_field)) = (time_field, value_field) else {
            log::debug!(
                "frame {:?} has no time or number field, nothing to render",
                self.frame.name,
            );
            return Ok(Self::wrap(group_by, vec![], time_field, value_field));
        };

        let times = time_field.time_values().unwrap_or_default();
        let values = value_field.number_values().unwrap_or_default();

        let rows = times
            .iter()
            .zip(values.iter())
            .map(|(&time, &value)| Point {
                time,
                value: value.unwrap_or(Value::NAN),
            })
            .collect::<Vec<_>>();

        let range = RangeFilter::new(self.start, self.end, tz);
        let interval = DailyIntervalFilter::new(self.daily_interval, tz);

        let filtered = rows
            .into_iter()
            .filter(|point| range.contains(point) && interval.contains(point))
            .collect::<Vec<_>>();

        let grouped = group::by_bucket_start(filtered, group_by, tz);
        let reduced = reduce(grouped, calculation);

        let points = group::by_day(reduced, tz)
            .into_iter()
            .flat_map(|set| {
                let day_millis = set.time;

                set.values.into_iter().map(move |point| BucketPoint {
                    day_millis,
                    bucket_start_millis: point.time,
                    value: point.value,
                })
            })
            .collect::<Vec<_>>();

        log::debug!(
            "bucketized frame {:?} into {} cells ({group_by} minute buckets, {calculation} per bucket)",
            self.frame.name,
            points.len(),
        );

        Ok(Self::wrap(
            group_by,
            points,
            Some(time_field),
            Some(value_field),
        ))
    }

    fn wrap(
        group_by: u32,
        points: Vec<BucketPoint>,
        time_field: Option<&Field>,
        value_field: Option<&Field>,
    ) -> BucketData {
        let config = value_field.map(|field| &field.config);

        BucketData {
            num_buckets: MINUTES_PER_DAY / group_by,
            min: config.and_then(|c| c.min).unwrap_or(Value::NEG_INFINITY),
            max: config.and_then(|c| c.max).unwrap_or(Value::INFINITY),
            points,
            value_display: value_field
                .and_then(|field| field.display.clone())
                .unwrap_or_default(),
            time_display: time_field
                .and_then(|field| field.display.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BucketOptions, FieldConfig};

    const MINUTE: Timestamp = 60_000;
    const HOUR: Timestamp = 60 * MINUTE;
    const DAY: Timestamp = 86_400_000;

    /// 2023-11-15T00:00:00Z
    const NOV_15: Timestamp = 1_700_006_400_000;

    fn frame(times: Vec<Timestamp>, values: Vec<Option<Value>>) -> Frame {
        Frame::new("test")
            .with_field(Field::time("time", times))
            .with_field(Field::number("value", values))
    }

    #[test_log::test]
    fn sparse_grouping() -> crate::Result<()> {
        let data = frame(
            vec![NOV_15, NOV_15 + 5 * MINUTE],
            vec![Some(1.0), Some(3.0)],
        )
        .bucketize()
        .group_by(10)
        .calculation(Calculation::Mean)
        .run()?;

        assert_eq!(
            vec![BucketPoint {
                day_millis: NOV_15,
                bucket_start_millis: NOV_15,
                value: 2.0,
            }],
            data.points,
        );

        Ok(())
    }

    #[test_log::test]
    fn rerunning_yields_identical_output() -> crate::Result<()> {
        let frame = frame(
            vec![NOV_15, NOV_15 + 7 * MINUTE, NOV_15 + HOUR, NOV_15 + DAY],
            vec![Some(1.0), None, Some(5.0), Some(9.0)],
        );

        let build = || {
            frame
                .bucketize()
                .time_zone("Europe/Helsinki")
                .group_by(30)
                .calculation(Calculation::Sum)
                .run()
        };

        let (a, b) = (build()?, build()?);

        assert_eq!(a.points, b.points);
        assert_eq!(a.num_buckets, b.num_buckets);
        assert_eq!(a.min, b.min);
        assert_eq!(a.max, b.max);

        Ok(())
    }

    #[test_log::test]
    fn every_cell_is_day_aligned() -> crate::Result<()> {
        let times = (0..200).map(|i| NOV_15 + i * 37 * MINUTE).collect();
        let values = (0..200_u32).map(|i| Some(Value::from(i))).collect();

        let data = frame(times, values)
            .bucketize()
            .time_zone("Europe/Helsinki")
            .group_by(45)
            .run()?;

        assert!(!data.points.is_empty());

        let tz = crate::time::parse_time_zone("Europe/Helsinki")?;

        for point in &data.points {
            let day = crate::time::to_local(point.bucket_start_millis, tz)
                .and_then(|local| crate::time::day_floor(&local));

            assert_eq!(Some(point.day_millis), day);
        }

        Ok(())
    }

    #[test_log::test]
    fn bucket_count_follows_group_by() -> crate::Result<()> {
        let empty = frame(vec![], vec![]);

        assert_eq!(24, empty.bucketize().group_by(60).run()?.num_buckets);
        assert_eq!(144, empty.bucketize().group_by(10).run()?.num_buckets);

        // 1440 / 7 truncates; a partial trailing bucket is not counted
        assert_eq!(205, empty.bucketize().group_by(7).run()?.num_buckets);

        Ok(())
    }

    #[test_log::test]
    fn range_keeps_whole_days() -> crate::Result<()> {
        let data = frame(
            vec![NOV_15, NOV_15 + 2 * DAY - 2, NOV_15 + 2 * DAY - 1],
            vec![Some(1.0), Some(1.0), Some(1.0)],
        )
        .bucketize()
        // bounds land mid-day on Nov 15 and Nov 16
        .start(NOV_15 + 12 * HOUR)
        .end(NOV_15 + DAY + HOUR)
        .group_by(60)
        .calculation(Calculation::Count)
        .run()?;

        // start of the first day is in; the last millisecond of the end
        // day is out
        assert_eq!(
            vec![NOV_15, NOV_15 + DAY + 23 * HOUR],
            data.points
                .iter()
                .map(|point| point.bucket_start_millis)
                .collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test_log::test]
    fn daily_interval_gates_on_hour() -> crate::Result<()> {
        let data = frame(
            vec![
                NOV_15 + 8 * HOUR + 59 * MINUTE,
                NOV_15 + 9 * HOUR + 15 * MINUTE,
                NOV_15 + 16 * HOUR + 59 * MINUTE,
                NOV_15 + 17 * HOUR,
            ],
            vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0)],
        )
        .bucketize()
        .daily_interval(9 * 60, 17 * 60)
        .group_by(60)
        .calculation(Calculation::Count)
        .run()?;

        assert_eq!(
            vec![NOV_15 + 9 * HOUR, NOV_15 + 16 * HOUR],
            data.points
                .iter()
                .map(|point| point.bucket_start_millis)
                .collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test_log::test]
    fn field_options_drive_the_pipeline() -> crate::Result<()> {
        let data = Frame::new("test")
            .with_field(Field::time("time", vec![NOV_15, NOV_15 + MINUTE]))
            .with_field(
                Field::number("value", vec![Some(2.0), Some(4.0)]).with_config(FieldConfig {
                    min: Some(0.0),
                    max: Some(100.0),
                    custom: Some(BucketOptions {
                        group_by: 30,
                        calculation: "sum".to_string(),
                    }),
                }),
            )
            .bucketize()
            .run()?;

        assert_eq!(48, data.num_buckets);
        assert_eq!(0.0, data.min);
        assert_eq!(100.0, data.max);
        assert_eq!(vec![6.0], data.points.iter().map(|p| p.value).collect::<Vec<_>>());

        Ok(())
    }

    #[test_log::test]
    fn unknown_calculation_name_fails() {
        let result = Frame::new("test")
            .with_field(Field::time("time", vec![NOV_15]))
            .with_field(
                Field::number("value", vec![Some(1.0)]).with_config(FieldConfig {
                    min: None,
                    max: None,
                    custom: Some(BucketOptions {
                        group_by: 60,
                        calculation: "median".to_string(),
                    }),
                }),
            )
            .bucketize()
            .run();

        assert!(matches!(
            result,
            Err(crate::Error::UnknownCalculation(name)) if name == "median"
        ));
    }

    #[test_log::test]
    fn missing_fields_render_empty() -> crate::Result<()> {
        let no_fields = Frame::new("empty").bucketize().run()?;

        assert_eq!(24, no_fields.num_buckets);
        assert!(no_fields.points.is_empty());
        assert_eq!(Value::NEG_INFINITY, no_fields.min);
        assert_eq!(Value::INFINITY, no_fields.max);

        let no_time = Frame::new("values-only")
            .with_field(Field::number("value", vec![Some(1.0)]))
            .bucketize()
            .run()?;

        assert!(no_time.points.is_empty());

        Ok(())
    }

    #[test_log::test]
    fn cells_land_in_local_buckets() -> crate::Result<()> {
        // 00:30 UTC is 02:30 in Helsinki: the hourly cell starts at the
        // local 02:00 and belongs to the local Nov 15.
        let data = frame(vec![NOV_15 + 30 * MINUTE], vec![Some(7.0)])
            .bucketize()
            .time_zone("Europe/Helsinki")
            .group_by(60)
            .run()?;

        assert_eq!(
            vec![BucketPoint {
                day_millis: NOV_15 - 2 * HOUR,
                bucket_start_millis: NOV_15,
                value: 7.0,
            }],
            data.points,
        );

        Ok(())
    }

    #[test_log::test]
    fn all_gap_buckets_are_absent() -> crate::Result<()> {
        let times = vec![NOV_15, NOV_15 + MINUTE, NOV_15 + HOUR];
        let values = vec![None, None, Some(3.0)];

        let mean = frame(times.clone(), values.clone())
            .bucketize()
            .group_by(60)
            .calculation(Calculation::Mean)
            .run()?;

        assert_eq!(
            vec![NOV_15 + HOUR],
            mean.points
                .iter()
                .map(|point| point.bucket_start_millis)
                .collect::<Vec<_>>(),
        );

        // count still sees the gap-only bucket
        let count = frame(times, values)
            .bucketize()
            .group_by(60)
            .calculation(Calculation::Count)
            .run()?;

        assert_eq!(
            vec![2.0, 1.0],
            count.points.iter().map(|point| point.value).collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test_log::test]
    fn first_seen_order_survives_unsorted_input() -> crate::Result<()> {
        let data = frame(
            vec![NOV_15 + 20 * MINUTE, NOV_15, NOV_15 + 21 * MINUTE],
            vec![Some(1.0), Some(1.0), Some(1.0)],
        )
        .bucketize()
        .group_by(10)
        .calculation(Calculation::Count)
        .run()?;

        assert_eq!(
            vec![NOV_15 + 20 * MINUTE, NOV_15],
            data.points
                .iter()
                .map(|point| point.bucket_start_millis)
                .collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test_log::test]
    fn zero_bucket_size_fails() {
        assert!(matches!(
            frame(vec![NOV_15], vec![Some(1.0)]).bucketize().group_by(0).run(),
            Err(crate::Error::InvalidBucketSize(0)),
        ));
    }

    #[test_log::test]
    fn invalid_time_zone_fails() {
        assert!(matches!(
            frame(vec![], vec![]).bucketize().time_zone("Nowhere/Here").run(),
            Err(crate::Error::InvalidTimeZone(_)),
        ));
    }
}
