//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wellstat API",
        version = "0.1.0",
        description = "Spatial statistics over drilling records: polygon area, density, nearest-neighbour dispersion, market concentration, and calendar-proximity ranking.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::polygon::polygon_stats,
        crate::routes::proximity::date_proximity,
    ),
    components(schemas(
        // Engine report types
        wellstat_spatial::PolygonSummary,
        wellstat_spatial::summary::CompanyCount,
        wellstat_spatial::summary::DeviationOutcome,
        wellstat_spatial::summary::MineralRightsShare,
        wellstat_spatial::summary::MapStatusCount,
        wellstat_spatial::summary::StatusDateSummary,
        wellstat_spatial::CategoryShare,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // DTOs
        crate::routes::polygon::PolygonStatsRequest,
        crate::routes::proximity::ProximityRequest,
        crate::routes::proximity::ProximityResponse,
    )),
    tags(
        (name = "wells", description = "Well statistics API"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
