use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::PHILVERIFY_STATUS_HEADER;
use crate::history::HistoryError;
use crate::scoring::VerificationError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("verification failed: {0}")]
    VerificationFailed(#[from] VerificationError),

    #[error("history error: {0}")]
    HistoryFailed(#[from] HistoryError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            GatewayError::ExtractionFailed(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "extraction_error")
            }
            GatewayError::VerificationFailed(VerificationError::EmptyInput) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            GatewayError::VerificationFailed(VerificationError::Classification(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "classification_error")
            }
            GatewayError::VerificationFailed(VerificationError::Internal { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            GatewayError::HistoryFailed(HistoryError::InvalidQuery { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            GatewayError::HistoryFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "history_error"),
            GatewayError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, philverify_status) = self.status();

        let mut headers = HeaderMap::new();
        headers.insert(
            PHILVERIFY_STATUS_HEADER,
            HeaderValue::from_static(philverify_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
