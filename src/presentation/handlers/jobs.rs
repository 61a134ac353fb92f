use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{financial_actions, HandlerSet, Job, JobId};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state))]
pub async fn list_jobs_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.jobs.list().await {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list jobs");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list jobs: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[derive(Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: Job,
    /// "Unknown" when the job has no source document or it is gone.
    pub source_document_status: String,
    pub source_document_amount: Decimal,
}

#[tracing::instrument(skip(state))]
pub async fn job_detail_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let job_id = JobId::new(job_id);

    match state.jobs.get(&job_id).await {
        Ok(Some(job)) => {
            let source_document_status = state
                .payments
                .source_document_status(&job)
                .await
                .map(|s| s.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let source_document_amount = state
                .payments
                .source_document_amount(&job)
                .await
                .unwrap_or(Decimal::ZERO);

            (
                StatusCode::OK,
                Json(JobDetailResponse {
                    job,
                    source_document_status,
                    source_document_amount,
                }),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Job not found: {}", job_id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// Resolves the decision table for a job. Over HTTP every handler is
/// serviceable, so the full set is offered.
#[tracing::instrument(skip(state))]
pub async fn job_actions_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let job_id = JobId::new(job_id);

    match state.jobs.get(&job_id).await {
        Ok(Some(job)) => {
            let actions =
                financial_actions(job.source_kind(), job.payment_status, &HandlerSet::all());
            (StatusCode::OK, Json(actions)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Job not found: {}", job_id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job for actions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn job_transactions_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let job_id = JobId::new(job_id);

    match state.transactions.list_for_job(&job_id).await {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list transactions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list transactions: {}", e),
                }),
            )
                .into_response()
        }
    }
}
