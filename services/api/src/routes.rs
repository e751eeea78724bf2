use crate::assets::INDEX_DOCUMENT;
use crate::infra::AppState;
use attendance_insights::analytics::EmployeeReport;
use attendance_insights::error::AppError;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_endpoint))
        .route("/employee/:employee_id", get(employee_endpoint))
        .route("/static/*path", get(static_asset_endpoint))
        .route("/health", get(healthcheck))
        .with_state(state)
}

pub(crate) async fn index_endpoint(State(state): State<AppState>) -> Response {
    state.assets.serve(INDEX_DOCUMENT).await
}

pub(crate) async fn static_asset_endpoint(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Response {
    state.assets.serve(&path).await
}

pub(crate) async fn employee_endpoint(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<EmployeeReport>, AppError> {
    state
        .insights
        .lookup(&employee_id)
        .map(Json)
        .ok_or(AppError::EmployeeNotFound)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn metrics_endpoint(
    Extension(metrics): Extension<Arc<PrometheusHandle>>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    )
}
