use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::application::services::ConversionError;
use crate::domain::{DocumentKind, DocumentRef};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub document_type: String,
    pub document_id: String,
    pub schedule_date: Option<NaiveDate>,
    pub schedule_time: Option<NaiveTime>,
}

#[tracing::instrument(skip(state, request), fields(document_type = %request.document_type, document_id = %request.document_id))]
pub async fn convert_handler(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> impl IntoResponse {
    let kind = match request.document_type.parse::<DocumentKind>() {
        Ok(k) => k,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response();
        }
    };
    let source = DocumentRef::new(kind, request.document_id);

    match state
        .conversions
        .convert_to_job(source, request.schedule_date, request.schedule_time)
        .await
    {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(e @ ConversionError::DocumentNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ ConversionError::AlreadyConverted { .. })
        | Err(e @ ConversionError::NotConvertible(_)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Conversion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Conversion failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
