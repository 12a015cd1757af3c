use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::OpenApi;

use super::{
    dto::{AggregatedPointDto, MetricsSnapshotDto, SensorReadingDto},
    errors::AppError,
};
use crate::{
    db::{
        models::{IncomingReading, NewSensorReading},
        queries,
    },
    metrics::{aggregate_series, MetricsSnapshot, TimeRange},
};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SeriesParams {
    pub range: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReadingsParams {
    pub sensor_type: Option<String>,
    pub sensor_name: Option<String>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Summary metrics over the whole reading corpus, recomputed on every call.
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Current summary metrics", body = MetricsSnapshotDto),
        (status = 500, description = "Internal server error"),
    ),
    tag = "metrics"
)]
pub async fn get_metrics(
    State(pool): State<PgPool>,
) -> Result<Json<MetricsSnapshotDto>, AppError> {
    let readings = queries::fetch_all(&pool).await?;
    Ok(Json(MetricsSnapshot::compute(&readings).into()))
}

/// Hour-bucketed aggregate series over the requested window.
///
/// `range` accepts `1h`, `6h`, `12h`, `24h`, `7d` and `30d`; anything else
/// (including no parameter at all) selects the 24h default. At most 20
/// points are returned, earliest buckets first.
#[utoipa::path(
    get,
    path = "/metrics/aggregated",
    params(
        ("range" = Option<String>, Query, description = "Window token: 1h, 6h, 12h, 24h, 7d or 30d (default 24h)"),
    ),
    responses(
        (status = 200, description = "Aggregated points, ascending by bucket", body = Vec<AggregatedPointDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "metrics"
)]
pub async fn get_aggregated_series(
    State(pool): State<PgPool>,
    Query(params): Query<SeriesParams>,
) -> Result<Json<Vec<AggregatedPointDto>>, AppError> {
    let range = TimeRange::parse(params.range.as_deref().unwrap_or(""));
    let window_start = range.window_start(Utc::now());
    let readings = queries::fetch_since(&pool, window_start).await?;
    let points = aggregate_series(&readings);
    Ok(Json(points.into_iter().map(Into::into).collect()))
}

/// Most recent raw readings, newest first, optionally filtered by sensor
/// type and/or sensor name.
#[utoipa::path(
    get,
    path = "/readings",
    params(
        ("sensor_type" = Option<String>, Query, description = "Filter by sensor type"),
        ("sensor_name" = Option<String>, Query, description = "Filter by sensor name"),
        ("limit" = Option<i64>, Query, description = "Maximum rows (default 100, capped at 1000)"),
    ),
    responses(
        (status = 200, description = "Raw readings", body = Vec<SensorReadingDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn get_readings(
    State(pool): State<PgPool>,
    Query(params): Query<ReadingsParams>,
) -> Result<Json<Vec<SensorReadingDto>>, AppError> {
    let limit = params.limit.unwrap_or(100).clamp(1, 1000);
    let rows = queries::fetch_recent(
        &pool,
        params.sensor_type.as_deref(),
        params.sensor_name.as_deref(),
        limit,
    )
    .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Ingest a batch of readings in the upstream producer's message shape.
///
/// Payload contents are stored verbatim — a malformed payload is accepted
/// here and simply never contributes to any metric.
#[utoipa::path(
    post,
    path = "/readings",
    request_body = Vec<IncomingReading>,
    responses(
        (status = 200, description = "Batch stored"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn ingest_readings(
    State(pool): State<PgPool>,
    Json(batch): Json<Vec<IncomingReading>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let readings: Vec<NewSensorReading> = batch.into_iter().map(Into::into).collect();
    let written = queries::insert_batch(&pool, &readings).await?;
    Ok(Json(serde_json::json!({ "inserted": written })))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(get_metrics, get_aggregated_series, get_readings, ingest_readings, health),
    components(schemas(MetricsSnapshotDto, AggregatedPointDto, SensorReadingDto, IncomingReading)),
    tags(
        (name = "metrics", description = "Aggregated metrics endpoints"),
        (name = "readings", description = "Raw reading endpoints"),
        (name = "system",  description = "System endpoints"),
    ),
    info(
        title = "Sensor Metrics API",
        version = "0.1.0",
        description = "REST API for sensor telemetry metrics"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
