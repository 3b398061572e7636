use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::error::GatewayError;
use super::payload::{
    HistoryParams, MAX_TEXT_CHARS, MIN_EXTRACTED_CHARS, MIN_TEXT_CHARS, TrendsParams,
    VerifyTextRequest, VerifyUrlRequest,
};
use super::state::AppState;
use super::{PHILVERIFY_STATUS_HEADER, PHILVERIFY_STATUS_VERIFIED};
use crate::extract::ExtractError;
use crate::history::{HistoryQuery, TrendsQuery};
use crate::scoring::{InputType, VerificationResult, Verdict};

/// Parses a JSON body, reporting schema problems as 400s.
pub(crate) fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

pub(crate) fn validate_text(text: &str) -> Result<(), GatewayError> {
    let chars = text.trim().chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(GatewayError::InvalidRequest(format!(
            "text must be at least {MIN_TEXT_CHARS} characters"
        )));
    }
    if chars > MAX_TEXT_CHARS {
        return Err(GatewayError::InvalidRequest(format!(
            "text must be at most {MAX_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

fn make_response(result: VerificationResult) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        PHILVERIFY_STATUS_HEADER,
        HeaderValue::from_static(PHILVERIFY_STATUS_VERIFIED),
    );
    (StatusCode::OK, headers, Json(result)).into_response()
}

#[instrument(skip(state, body), fields(text_len = tracing::field::Empty))]
pub async fn verify_text_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: VerifyTextRequest = parse_body(body)?;
    tracing::Span::current().record("text_len", request.text.len());
    validate_text(&request.text)?;

    let result = state
        .engine
        .run_verification(&request.text, InputType::Text, None)
        .await?;
    Ok(make_response(result))
}

#[instrument(skip(state, body), fields(url = tracing::field::Empty))]
pub async fn verify_url_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: VerifyUrlRequest = parse_body(body)?;
    let url = request.url.trim();
    tracing::Span::current().record("url", tracing::field::display(url));

    let extracted = state.extractor.extract(url).await.map_err(|e| match e {
        ExtractError::InvalidUrl { .. } => GatewayError::InvalidRequest(e.to_string()),
        other => {
            warn!(error = %other, "URL extraction failed");
            GatewayError::ExtractionFailed(other.to_string())
        }
    })?;

    let chars = extracted.text.trim().chars().count();
    if chars < MIN_EXTRACTED_CHARS {
        return Err(GatewayError::ExtractionFailed(format!(
            "could not extract meaningful text from {url}"
        )));
    }
    debug!(chars, domain = ?extracted.domain, "Extracted article text");

    // long pages are verified on their leading text only
    let text: String = extracted.text.chars().take(MAX_TEXT_CHARS).collect();
    let result = state
        .engine
        .run_verification(&text, InputType::Url, extracted.domain.as_deref())
        .await?;
    Ok(make_response(result))
}

#[instrument(skip(state))]
pub async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Response, GatewayError> {
    let verdict = match params.verdict.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(Verdict::parse(raw).ok_or_else(|| {
            GatewayError::InvalidRequest(format!("unknown verdict filter '{raw}'"))
        })?),
    };
    let query = HistoryQuery {
        page: params.page,
        limit: params.limit,
        verdict,
    };

    let page = state.history.list(&query)?;
    debug!(total = page.total, returned = page.entries.len(), "History listed");
    Ok((StatusCode::OK, Json(page)).into_response())
}

#[instrument(skip(state))]
pub async fn history_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, GatewayError> {
    match state.history.get(&id) {
        Some(entry) => Ok((StatusCode::OK, Json(entry)).into_response()),
        None => Err(GatewayError::NotFound(format!("history entry '{id}'"))),
    }
}

#[instrument(skip(state))]
pub async fn trends_handler(
    State(state): State<AppState>,
    Query(params): Query<TrendsParams>,
) -> Result<Response, GatewayError> {
    let report = state.history.trends(&TrendsQuery {
        days: params.days,
        limit: params.limit,
    })?;
    debug!(
        entities = report.top_entities.len(),
        topics = report.top_topics.len(),
        "Trends computed"
    );
    Ok((StatusCode::OK, Json(report)).into_response())
}
