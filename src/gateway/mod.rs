//! HTTP gateway (Axum) over the verification engine and history.
//!
//! This module is primarily used by the `philverify` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    history_entry_handler, history_handler, trends_handler, verify_text_handler,
    verify_url_handler,
};
pub use state::AppState;

/// Response header carrying a short machine-readable outcome.
pub const PHILVERIFY_STATUS_HEADER: &str = "x-philverify-status";
pub const PHILVERIFY_STATUS_HEALTHY: &str = "healthy";
pub const PHILVERIFY_STATUS_READY: &str = "ready";
pub const PHILVERIFY_STATUS_NOT_READY: &str = "not_ready";
pub const PHILVERIFY_STATUS_VERIFIED: &str = "verified";
pub const PHILVERIFY_STATUS_ERROR: &str = "error";

pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/verify/text", post(verify_text_handler))
        .route("/verify/url", post(verify_url_handler))
        .route("/history", get(history_handler))
        .route("/history/{id}", get(history_entry_handler))
        .route("/trends", get(trends_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn status_headers(status: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(PHILVERIFY_STATUS_HEADER, HeaderValue::from_static(status));
    headers
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub history: &'static str,
    pub classifier: &'static str,
    pub similarity: &'static str,
    pub extractor: &'static str,
    pub domains: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(PHILVERIFY_STATUS_HEALTHY),
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let history_status = if state.history_writable() {
        PHILVERIFY_STATUS_READY
    } else {
        PHILVERIFY_STATUS_ERROR
    };

    let components = ComponentStatus {
        http: PHILVERIFY_STATUS_READY,
        history: history_status,
        classifier: state.engine.classifier_name(),
        similarity: state.engine.similarity_strategy(),
        extractor: state.extractor.name(),
        domains: state.engine.fusion().domains().domain_count(),
    };

    let is_ready = components.history == PHILVERIFY_STATUS_READY;
    let (status_code, status_msg, header) = if is_ready {
        (StatusCode::OK, "ok", PHILVERIFY_STATUS_READY)
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "pending",
            PHILVERIFY_STATUS_NOT_READY,
        )
    };

    (
        status_code,
        status_headers(header),
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
