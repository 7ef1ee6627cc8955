use heatgrid::{timestamp, BucketData, Calculation, Duration, Field, Frame, Value};
use std::time::Instant;

fn main() -> heatgrid::Result<()> {
    env_logger::builder()
        .filter_module("heatgrid", log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    let now = timestamp();
    let start = now - Duration::weeks(2.0);
    let step = Duration::minutes(5.0);

    let count = usize::try_from(Duration::weeks(2.0) / step).unwrap_or_default();

    let mut times = Vec::with_capacity(count);
    let mut values = Vec::with_capacity(count);

    {
        use rand::Rng;

        let mut rng = rand::thread_rng();

        for idx in 0..count {
            let ts = start + step * idx as i64;

            // Daytime load is high, nighttime load is low
            let hour = (ts / Duration::hours(1.0)).rem_euclid(24);

            let base: Value = if (8..20).contains(&hour) { 75.0 } else { 10.0 };
            let value = (base + rng.gen_range(-5.0..5.0)).max(0.0);

            times.push(ts);
            values.push(Some(value));
        }
    }

    let frame = Frame::new("cpu.total")
        .with_field(Field::time("time", times))
        .with_field(Field::number("value", values));

    let before = Instant::now();

    let data = frame
        .bucketize()
        .time_zone("UTC")
        .start(start)
        .end(now)
        .group_by(/* minutes */ 60)
        .calculation(Calculation::Mean)
        .run()?;

    log::info!(
        "bucketized {count} samples into {} cells in {:?}",
        data.points.len(),
        before.elapsed(),
    );

    print_grid(&data);

    Ok(())
}

/// Prints one row per day, one character per cell, dark cells for high
/// load.
fn print_grid(data: &BucketData) {
    let mut day = None;

    for point in &data.points {
        if day != Some(point.day_millis) {
            if day.is_some() {
                println!();
            }

            print!(
                "{:>15} |",
                data.time_display.apply(point.day_millis as Value).text
            );

            day = Some(point.day_millis);
        }

        print!("{}", if point.value >= 50.0 { '#' } else { '.' });
    }

    println!();
}
