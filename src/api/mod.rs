pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{routing::get, Router};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;

pub fn router(pool: PgPool) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/metrics", get(handlers::get_metrics))
        .route("/metrics/aggregated", get(handlers::get_aggregated_series))
        .route(
            "/readings",
            get(handlers::get_readings).post(handlers::ingest_readings),
        )
        .route("/health", get(handlers::health))
        .with_state(pool)
        .split_for_parts();

    router.route(
        "/api-docs/openapi.json",
        get(move || async move { axum::Json(api) }),
    )
}
