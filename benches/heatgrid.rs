use criterion::{criterion_group, criterion_main, Criterion};
use heatgrid::{Calculation, Duration, Field, Frame, Point};

/// 2023-11-15T00:00:00Z
const START: i64 = 1_700_006_400_000;

fn synthetic_points(len: i64) -> Vec<Point> {
    (0..len)
        .map(|i| Point {
            time: START + Duration::minutes(1.0) * i,
            value: (i % 97) as f64,
        })
        .collect()
}

fn synthetic_frame(len: i64) -> Frame {
    let times = (0..len).map(|i| START + Duration::minutes(1.0) * i).collect();
    let values = (0..len).map(|i| Some((i % 97) as f64)).collect();

    Frame::new("bench")
        .with_field(Field::time("time", times))
        .with_field(Field::number("value", values))
}

fn group(c: &mut Criterion) {
    let points = synthetic_points(10_000);

    c.bench_function("group 10k points into 10 minute buckets", |b| {
        b.iter(|| heatgrid::group_by_minutes(points.clone(), 10, "UTC"));
    });

    c.bench_function("group 10k points by day", |b| {
        b.iter(|| heatgrid::group_by_day(points.clone(), "Europe/Helsinki"));
    });
}

fn bucketize(c: &mut Criterion) {
    let frame = synthetic_frame(10_000);

    c.bench_function("bucketize 10k samples", |b| {
        b.iter(|| {
            frame
                .bucketize()
                .time_zone("Europe/Helsinki")
                .group_by(10)
                .calculation(Calculation::Mean)
                .run()
        });
    });
}

criterion_group!(benches, group, bucketize);
criterion_main!(benches);
