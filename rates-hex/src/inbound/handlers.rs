//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use rates_types::{AppError, ExchangeRateRepository, ExternalRateSource, UpsertRateRequest};

use crate::RateService;

/// Application state shared across handlers.
pub struct AppState<R: ExchangeRateRepository, S: ExternalRateSource> {
    pub service: RateService<R, S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            err @ AppError::SourceUnavailable { .. } => (StatusCode::NOT_FOUND, err.to_string()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Malformed or mistyped request bodies answer with the usual error body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

/// Path of the GET route for a pair.
pub fn rate_location(base: &str, quote: &str) -> String {
    format!("/api/exchangerate/{}/{}", base, quote)
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Get the rate for a pair, fetching it from the source if not stored.
#[tracing::instrument(skip(state))]
pub async fn get_rate<R: ExchangeRateRepository, S: ExternalRateSource>(
    State(state): State<Arc<AppState<R, S>>>,
    Path((base, quote)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state.service.resolve(&base, &quote).await?;
    Ok(Json(rate))
}

/// Add or update the rate for a pair.
#[tracing::instrument(skip(state, payload))]
pub async fn upsert_rate<R: ExchangeRateRepository, S: ExternalRateSource>(
    State(state): State<Arc<AppState<R, S>>>,
    payload: Result<Json<UpsertRateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let rate = state
        .service
        .upsert(&req.base_currency, &req.quote_currency, req.bid, req.ask)
        .await?;

    let location = rate_location(rate.pair.base(), rate.pair.quote());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(rate)))
}
