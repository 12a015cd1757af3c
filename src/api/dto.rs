use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    db::models::SensorReading,
    metrics::{AggregatedPoint, MetricsSnapshot},
};

/// Corpus-wide summary metrics.
///
/// The serialized field spellings are consumed verbatim by the dashboards —
/// do not rename.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub total_readings: u64,
    /// kWh
    pub average_energy: f64,
    /// ppm
    #[serde(rename = "averageCO2")]
    pub average_co2: i64,
    /// Relative humidity percentage
    pub average_humidity: i64,
    pub motion_detected_count: u64,
    pub last_updated: DateTime<Utc>,
}

impl From<MetricsSnapshot> for MetricsSnapshotDto {
    fn from(s: MetricsSnapshot) -> Self {
        Self {
            total_readings: s.total_readings,
            average_energy: s.average_energy,
            average_co2: s.average_co2,
            average_humidity: s.average_humidity,
            motion_detected_count: s.motion_detected_count,
            last_updated: s.last_updated,
        }
    }
}

/// One hour bucket of the aggregated series.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPointDto {
    pub bucket_start: DateTime<Utc>,
    /// kWh
    pub energy: f64,
    /// ppm
    pub co2: i64,
    /// Relative humidity percentage
    pub humidity: i64,
}

impl From<AggregatedPoint> for AggregatedPointDto {
    fn from(p: AggregatedPoint) -> Self {
        Self {
            bucket_start: p.bucket_start,
            energy: p.energy,
            co2: p.co2,
            humidity: p.humidity,
        }
    }
}

/// Raw reading as returned by the readings endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SensorReadingDto {
    pub id: Uuid,
    pub sensor_type: String,
    pub sensor_name: String,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<SensorReading> for SensorReadingDto {
    fn from(r: SensorReading) -> Self {
        Self {
            id: r.id,
            sensor_type: r.sensor_type,
            sensor_name: r.sensor_name,
            payload: r.payload,
            timestamp: r.timestamp,
            created_at: r.created_at,
        }
    }
}
