//! # Polygon Statistics API
//!
//! Accepts a raw polygon ring and the geo-filtered records inside it and
//! returns the aggregate report: area, density, dispersion, concentration,
//! categorical splits, and status-date summary.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use wellstat_core::WellRecord;
use wellstat_spatial::{PolygonSummary, Ring};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Polygon statistics request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PolygonStatsRequest {
    /// Ring positions as `[longitude, latitude]` pairs, in degrees.
    #[schema(example = json!([[-97.5, 35.4], [-97.4, 35.4], [-97.4, 35.5], [-97.5, 35.5]]))]
    pub polygon: Vec<Vec<f64>>,
    /// Records already filtered to fall inside the polygon.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<WellRecord>,
}

/// Build the polygon statistics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/wells/polygon/stats", post(polygon_stats))
}

/// POST /v1/wells/polygon/stats — Summarize the records inside a polygon.
#[utoipa::path(
    post,
    path = "/v1/wells/polygon/stats",
    request_body = PolygonStatsRequest,
    responses(
        (status = 200, description = "Aggregate statistics", body = PolygonSummary),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 422, description = "Invalid polygon ring", body = ErrorBody),
    ),
    tag = "wells"
)]
async fn polygon_stats(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
    body: Result<Json<PolygonStatsRequest>, JsonRejection>,
) -> Result<Json<PolygonSummary>, AppError> {
    let req = extract_json(body)?;
    let ring = Ring::from_positions(&req.polygon)?;
    metrics.record_batch(req.records.len());

    tracing::debug!(
        records = req.records.len(),
        vertices = ring.vertex_count(),
        "summarizing polygon"
    );

    let aggregator = state.aggregator.clone();
    let records = req.records;
    let summary =
        tokio::task::spawn_blocking(move || aggregator.summarize(&ring, &records)).await?;

    Ok(Json(summary))
}
