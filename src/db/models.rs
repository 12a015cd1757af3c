use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One stored sensor observation.
///
/// `sensor_type` is an open tag — `energy`, `air_quality` and `motion` carry
/// payload fields the aggregations understand; anything else is stored and
/// counted but never extracted from.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: Uuid,
    pub sensor_type: String,
    /// Free-text location/label, e.g. "Office".
    pub sensor_name: String,
    /// Semi-structured payload as received from the producer. Key set and
    /// value types vary per sensor model and are not validated on ingest.
    pub payload: serde_json::Value,
    /// Capture instant, used for windowing and bucketing.
    pub timestamp: DateTime<Utc>,
    /// Ingestion instant.
    pub created_at: DateTime<Utc>,
}

/// Insertion shape for a reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSensorReading {
    pub sensor_type: String,
    pub sensor_name: String,
    pub payload: serde_json::Value,
    /// Capture instant; defaults to the ingestion instant when the producer
    /// does not supply one.
    pub timestamp: Option<DateTime<Utc>>,
}

/// One reading in the upstream producer's message shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncomingReading {
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub name: String,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<IncomingReading> for NewSensorReading {
    fn from(r: IncomingReading) -> Self {
        Self {
            sensor_type: r.sensor_type,
            sensor_name: r.name,
            payload: r.payload,
            timestamp: r.timestamp,
        }
    }
}
