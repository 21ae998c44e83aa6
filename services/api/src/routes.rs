use crate::infra::{AppState, SharedSession};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use melma_audit::audit::EvaluationView;
use melma_audit::error::AppError;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) model_name: String,
    #[serde(default)]
    pub(crate) scenario: String,
    #[serde(default)]
    pub(crate) answer: String,
    /// Raw judge reply fetched by the caller; scored as-is.
    pub(crate) raw_response: String,
}

pub(crate) fn audit_routes(session: SharedSession) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/audit/evaluations",
            get(list_evaluations_endpoint).post(evaluate_endpoint),
        )
        .layer(Extension(session))
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

pub(crate) async fn evaluate_endpoint(
    Extension(session): Extension<SharedSession>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluationView>, AppError> {
    let EvaluateRequest {
        model_name,
        scenario,
        answer,
        raw_response,
    } = payload;

    let mut guard = session.lock().expect("session mutex poisoned");
    let record = guard.evaluate(&model_name, &scenario, &answer, &raw_response)?;
    Ok(Json(record.to_view(guard.rubric())))
}

pub(crate) async fn list_evaluations_endpoint(
    Extension(session): Extension<SharedSession>,
) -> Json<Vec<EvaluationView>> {
    let guard = session.lock().expect("session mutex poisoned");
    let views = guard
        .snapshot()
        .iter()
        .map(|record| record.to_view(guard.rubric()))
        .collect();
    Json(views)
}
