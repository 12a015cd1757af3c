//! Prints the OpenAPI document for the service to stdout.
//!
//! Usage:
//!   cargo run --bin generate_openapi > openapi.json

use sensor_metrics_service::api::handlers::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .expect("Failed to serialise OpenAPI spec");
    println!("{json}");
}
