use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

use expo_desk::auth::{auth_router, AdminStore, AuthState};
use expo_desk::exhibitors::{exhibitor_router, ExhibitorDirectory, ExhibitorRepository};
use std::sync::Arc;

/// Compose the dashboard routers with the operational endpoints.
pub(crate) fn dashboard_routes<R, S>(
    directory: Arc<ExhibitorDirectory<R>>,
    auth: AuthState<S>,
) -> axum::Router
where
    R: ExhibitorRepository + 'static,
    S: AdminStore + 'static,
{
    exhibitor_router(directory)
        .merge(auth_router(auth))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
