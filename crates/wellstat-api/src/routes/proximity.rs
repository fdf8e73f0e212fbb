//! # Calendar Proximity API
//!
//! Ranks a record batch by wrap-around distance between each record's
//! status month/day and a target month/day, ignoring the year.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wellstat_core::WellRecord;
use wellstat_spatial::{rank_by_calendar_proximity, MonthDay, RankedRecord};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Calendar proximity request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProximityRequest {
    /// Target month, 1-12.
    pub month: u32,
    /// Target day of month.
    pub day: u32,
    /// Maximum number of results; the server default applies when absent.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<WellRecord>,
}

impl Validate for ProximityRequest {
    fn validate(&self) -> Result<(), String> {
        if self.limit == Some(0) {
            return Err("limit must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Ranked records, closest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProximityResponse {
    /// Day of the (non-leap) reference year for the target.
    pub target_day_of_year: u32,
    pub count: usize,
    /// Original records with `distance_days`, `status_month`, `status_day`.
    #[schema(value_type = Vec<Object>)]
    pub results: Vec<RankedRecord>,
}

/// Build the proximity router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/wells/date-proximity", post(date_proximity))
}

/// POST /v1/wells/date-proximity — Rank records by calendar distance.
#[utoipa::path(
    post,
    path = "/v1/wells/date-proximity",
    request_body = ProximityRequest,
    responses(
        (status = 200, description = "Ranked records", body = ProximityResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 422, description = "Invalid month/day or limit", body = ErrorBody),
    ),
    tag = "wells"
)]
async fn date_proximity(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
    body: Result<Json<ProximityRequest>, JsonRejection>,
) -> Result<Json<ProximityResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let target = MonthDay::new(req.month, req.day)?;

    let max = state.config.max_proximity_limit;
    let limit = req.limit.unwrap_or(state.config.default_proximity_limit);
    if limit > max {
        return Err(AppError::Validation(format!(
            "limit {limit} exceeds the maximum of {max}"
        )));
    }
    metrics.record_batch(req.records.len());

    let records = req.records;
    let results = tokio::task::spawn_blocking(move || {
        rank_by_calendar_proximity(records, target, limit)
    })
    .await?;

    Ok(Json(ProximityResponse {
        target_day_of_year: target.day_of_year(),
        count: results.len(),
        results,
    }))
}
