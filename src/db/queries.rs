use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{NewSensorReading, SensorReading};

/// Every reading in the corpus, for the summary metrics. The summary does
/// not depend on order; ascending keeps results deterministic.
pub async fn fetch_all(pool: &PgPool) -> Result<Vec<SensorReading>, sqlx::Error> {
    sqlx::query_as::<_, SensorReading>(
        "SELECT id, sensor_type, sensor_name, payload, timestamp, created_at \
         FROM sensor_readings \
         ORDER BY timestamp ASC",
    )
    .fetch_all(pool)
    .await
}

/// Readings captured at or after `window_start`, ascending by capture
/// instant — the input contract of the hour-bucket aggregation.
pub async fn fetch_since(
    pool: &PgPool,
    window_start: DateTime<Utc>,
) -> Result<Vec<SensorReading>, sqlx::Error> {
    sqlx::query_as::<_, SensorReading>(
        "SELECT id, sensor_type, sensor_name, payload, timestamp, created_at \
         FROM sensor_readings \
         WHERE timestamp >= $1 \
         ORDER BY timestamp ASC",
    )
    .bind(window_start)
    .fetch_all(pool)
    .await
}

/// Most recent readings, newest first, optionally narrowed by sensor type
/// and/or sensor name.
pub async fn fetch_recent(
    pool: &PgPool,
    sensor_type: Option<&str>,
    sensor_name: Option<&str>,
    limit: i64,
) -> Result<Vec<SensorReading>, sqlx::Error> {
    sqlx::query_as::<_, SensorReading>(
        "SELECT id, sensor_type, sensor_name, payload, timestamp, created_at \
         FROM sensor_readings \
         WHERE ($1::text IS NULL OR sensor_type = $1) \
           AND ($2::text IS NULL OR sensor_name = $2) \
         ORDER BY timestamp DESC \
         LIMIT $3",
    )
    .bind(sensor_type)
    .bind(sensor_name)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Insert a batch of readings. Readings without a capture timestamp get the
/// ingestion instant. Returns the number of rows written.
pub async fn insert_batch(
    pool: &PgPool,
    readings: &[NewSensorReading],
) -> Result<u64, sqlx::Error> {
    let mut written = 0u64;
    for reading in readings {
        sqlx::query(
            "INSERT INTO sensor_readings (id, sensor_type, sensor_name, payload, timestamp) \
             VALUES ($1, $2, $3, $4, COALESCE($5, now()))",
        )
        .bind(Uuid::new_v4())
        .bind(&reading.sensor_type)
        .bind(&reading.sensor_name)
        .bind(&reading.payload)
        .bind(reading.timestamp)
        .execute(pool)
        .await?;
        written += 1;
    }
    Ok(written)
}
