use chrono::{DateTime, Utc};

use super::{payload::SensorPayload, MeanAccumulator};
use crate::db::models::SensorReading;

/// Corpus-wide summary, recomputed from scratch on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    /// Size of the full input, extractable or not.
    pub total_readings: u64,
    /// Mean of valid energy values; `0` when none are valid.
    pub average_energy: f64,
    pub average_co2: i64,
    pub average_humidity: i64,
    /// Motion readings whose flag was `true`. `false` and unparseable flags
    /// do not count.
    pub motion_detected_count: u64,
    pub last_updated: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// Summarize a set of readings.
    ///
    /// Each reading is classified once; the per-category means only see
    /// values the classification produced, so a corrupt or mismatched
    /// reading silently contributes to `total_readings` alone. CO2 and
    /// humidity are averaged independently over the air-quality readings —
    /// a reading missing one field still contributes to the other.
    pub fn compute(readings: &[SensorReading]) -> Self {
        let mut energy = MeanAccumulator::default();
        let mut co2 = MeanAccumulator::default();
        let mut humidity = MeanAccumulator::default();
        let mut motion_detected_count = 0u64;

        for reading in readings {
            let payload = SensorPayload::classify(&reading.sensor_type, &reading.payload);
            if let Some(v) = payload.energy() {
                energy.push(v);
            }
            if let Some(v) = payload.co2() {
                co2.push(v as f64);
            }
            if let Some(v) = payload.humidity() {
                humidity.push(v as f64);
            }
            if payload.motion_detected() == Some(true) {
                motion_detected_count += 1;
            }
        }

        Self {
            total_readings: readings.len() as u64,
            average_energy: energy.mean(),
            // Integer averages truncate toward zero; downstream consumers
            // serialize these values verbatim and expect exactly this.
            average_co2: co2.mean() as i64,
            average_humidity: humidity.mean() as i64,
            motion_detected_count,
            last_updated: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use super::*;

    fn reading(sensor_type: &str, payload: Value) -> SensorReading {
        let ts = Utc.with_ymd_and_hms(2024, 5, 14, 10, 30, 0).unwrap();
        SensorReading {
            id: Uuid::new_v4(),
            sensor_type: sensor_type.to_owned(),
            sensor_name: "Office".to_owned(),
            payload,
            timestamp: ts,
            created_at: ts,
        }
    }

    #[test]
    fn empty_input_yields_zeroed_snapshot() {
        let snapshot = MetricsSnapshot::compute(&[]);
        assert_eq!(snapshot.total_readings, 0);
        assert_eq!(snapshot.average_energy, 0.0);
        assert_eq!(snapshot.average_co2, 0);
        assert_eq!(snapshot.average_humidity, 0);
        assert_eq!(snapshot.motion_detected_count, 0);
    }

    #[test]
    fn average_energy_over_office_readings() {
        let readings = vec![
            reading("energy", json!({ "energy": 770.79 })),
            reading("energy", json!({ "energy": 170.38 })),
        ];
        let snapshot = MetricsSnapshot::compute(&readings);
        assert_eq!(snapshot.total_readings, 2);
        assert!((snapshot.average_energy - 470.585).abs() < 1e-9);
    }

    #[test]
    fn co2_and_humidity_average_independently() {
        let readings = vec![
            reading("air_quality", json!({ "co2": 864, "humidity": 72 })),
            reading("air_quality", json!({ "co2": 512 })),
        ];
        let snapshot = MetricsSnapshot::compute(&readings);
        assert_eq!(snapshot.average_co2, 688);
        assert_eq!(snapshot.average_humidity, 72);
    }

    #[test]
    fn integer_averages_truncate_toward_zero() {
        let readings = vec![
            reading("air_quality", json!({ "co2": 3 })),
            reading("air_quality", json!({ "co2": 4 })),
        ];
        // Mean 3.5 truncates to 3, not rounds to 4.
        assert_eq!(MetricsSnapshot::compute(&readings).average_co2, 3);
    }

    #[test]
    fn motion_counts_only_true_flags() {
        let readings = vec![
            reading("motion", json!({ "motionDetected": true })),
            reading("motion", json!({ "motionDetected": false })),
            reading("motion", json!({ "motionDetected": "yes" })),
        ];
        let snapshot = MetricsSnapshot::compute(&readings);
        assert_eq!(snapshot.motion_detected_count, 1);
        assert_eq!(snapshot.total_readings, 3);
    }

    #[test]
    fn category_without_valid_values_averages_zero() {
        let readings = vec![
            reading("energy", json!({ "energy": "oops" })),
            reading("air_quality", json!({ "co2": "bad", "humidity": 14.7 })),
        ];
        let snapshot = MetricsSnapshot::compute(&readings);
        assert_eq!(snapshot.average_energy, 0.0);
        assert_eq!(snapshot.average_co2, 0);
        assert_eq!(snapshot.average_humidity, 0);
        assert_eq!(snapshot.total_readings, 2);
    }

    #[test]
    fn corrupt_reading_does_not_block_the_batch() {
        let readings = vec![
            reading("energy", json!("truncated-garbage")),
            reading("energy", json!({ "energy": 100.0 })),
            reading("unknown_sensor", json!({ "whatever": 1 })),
        ];
        let snapshot = MetricsSnapshot::compute(&readings);
        assert_eq!(snapshot.total_readings, 3);
        assert_eq!(snapshot.average_energy, 100.0);
    }

    #[test]
    fn snapshot_is_stamped() {
        let before = Utc::now();
        let snapshot = MetricsSnapshot::compute(&[]);
        assert!(snapshot.last_updated >= before);
    }
}
