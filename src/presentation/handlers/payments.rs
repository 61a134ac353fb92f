use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::PaymentSyncError;
use crate::domain::{DocumentKind, DocumentRef, JobId, PaymentMethod};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub job_id: String,
    pub document_type: Option<String>,
    pub document_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub full_payment: bool,
}

#[tracing::instrument(skip(state, request), fields(job_id = %request.job_id))]
pub async fn payment_handler(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> impl IntoResponse {
    let source = match (&request.document_type, &request.document_id) {
        (Some(kind), Some(id)) => match kind.parse::<DocumentKind>() {
            Ok(kind) => Some(DocumentRef::new(kind, id.clone())),
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e }))
                    .into_response();
            }
        },
        (None, None) => None,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "document_type and document_id must be provided together".to_string(),
                }),
            )
                .into_response();
        }
    };

    let job_id = JobId::new(request.job_id);

    match state
        .payments
        .sync_payment(&job_id, source, request.payment_method, request.full_payment)
        .await
    {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e @ PaymentSyncError::JobNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ PaymentSyncError::SourceUpdateFailed { .. }) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Payment sync failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Payment sync failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
