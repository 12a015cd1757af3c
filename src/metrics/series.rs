use std::collections::BTreeMap;

use chrono::{DateTime, Timelike, Utc};

use super::{payload::SensorPayload, MeanAccumulator};
use crate::db::models::SensorReading;

/// Hard cap on the number of emitted points. Callers needing more must issue
/// a narrower window.
pub const MAX_SERIES_POINTS: usize = 20;

/// Aggregate values for one occupied hour bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPoint {
    /// Bucket key: the capture hour with minute, second and sub-second
    /// components zeroed.
    pub bucket_start: DateTime<Utc>,
    pub energy: f64,
    pub co2: i64,
    pub humidity: i64,
}

#[derive(Debug, Default)]
struct BucketAccumulator {
    energy: MeanAccumulator,
    co2: MeanAccumulator,
    humidity: MeanAccumulator,
}

/// Group readings into hour buckets and average per bucket.
///
/// The input is expected to be restricted to the query window and ordered
/// ascending by `timestamp` — both are provided by the storage query, not
/// re-checked here. Grouping itself is order-independent; buckets are
/// emitted ascending, and when more than [`MAX_SERIES_POINTS`] hours are
/// occupied only the earliest ones are returned.
///
/// Per bucket, the same extraction and averaging rules as the corpus summary
/// apply: invalid values are skipped, empty means are `0`, and the integer
/// averages truncate toward zero.
pub fn aggregate_series(readings: &[SensorReading]) -> Vec<AggregatedPoint> {
    let mut buckets: BTreeMap<DateTime<Utc>, BucketAccumulator> = BTreeMap::new();

    for reading in readings {
        let bucket = buckets
            .entry(truncate_to_hour(reading.timestamp))
            .or_default();
        let payload = SensorPayload::classify(&reading.sensor_type, &reading.payload);
        if let Some(v) = payload.energy() {
            bucket.energy.push(v);
        }
        if let Some(v) = payload.co2() {
            bucket.co2.push(v as f64);
        }
        if let Some(v) = payload.humidity() {
            bucket.humidity.push(v as f64);
        }
    }

    buckets
        .into_iter()
        .take(MAX_SERIES_POINTS)
        .map(|(bucket_start, acc)| AggregatedPoint {
            bucket_start,
            energy: acc.energy.mean(),
            co2: acc.co2.mean() as i64,
            humidity: acc.humidity.mean() as i64,
        })
        .collect()
}

fn truncate_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}
