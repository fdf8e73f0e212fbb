//! # wellstat-api — Axum API Services for the Well Statistics Engine
//!
//! Thin HTTP surface over `wellstat-spatial`. Callers submit a record batch
//! that has already been filtered to a polygon (or any other selection) and
//! receive computed statistics. Nothing is persisted between requests.
//!
//! ## API Surface
//!
//! | Route                            | Module                 |
//! |----------------------------------|------------------------|
//! | `POST /v1/wells/polygon/stats`   | [`routes::polygon`]    |
//! | `POST /v1/wells/date-proximity`  | [`routes::proximity`]  |
//! | `GET /metrics`                   | [`middleware::metrics`]|
//! | `GET /openapi.json`              | [`openapi`]            |
//! | `GET /health/{liveness,readiness}` | this module          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes are mounted outside the metrics middleware so probe
/// traffic does not inflate request counts.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// Same as [`app`], sharing the given metrics handle with the caller.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let api = Router::new()
        .merge(routes::polygon::router())
        .merge(routes::proximity::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_handler))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the engine holds no external resources, so readiness
/// equals liveness.
async fn readiness() -> &'static str {
    "ready"
}
