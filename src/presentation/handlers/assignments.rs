use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::AssignmentError;
use crate::domain::{DocumentKind, DocumentRef, JobId};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub document_type: String,
    pub document_id: String,
    pub job_id: String,
}

#[derive(Serialize)]
pub struct AssignmentResponse {
    pub job_id: String,
    pub message: String,
}

fn assignment_error_response(e: AssignmentError) -> axum::response::Response {
    let status = match &e {
        AssignmentError::JobNotFound(_) => StatusCode::NOT_FOUND,
        AssignmentError::AlreadyAssigned { .. } | AssignmentError::PrimarySource => {
            StatusCode::CONFLICT
        }
        AssignmentError::Repository(inner) => {
            tracing::error!(error = %inner, "Assignment repository failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, request), fields(document_id = %request.document_id, job_id = %request.job_id))]
pub async fn assign_handler(
    State(state): State<AppState>,
    Json(request): Json<AssignmentRequest>,
) -> impl IntoResponse {
    let kind = match request.document_type.parse::<DocumentKind>() {
        Ok(k) => k,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response();
        }
    };
    let document = DocumentRef::new(kind, request.document_id);
    let job_id = JobId::new(request.job_id);

    match state.assignments.assign(document, &job_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AssignmentResponse {
                job_id: job_id.to_string(),
                message: "Document assigned to job".to_string(),
            }),
        )
            .into_response(),
        Err(e) => assignment_error_response(e),
    }
}

#[tracing::instrument(skip(state, request), fields(document_id = %request.document_id, job_id = %request.job_id))]
pub async fn unassign_handler(
    State(state): State<AppState>,
    Json(request): Json<AssignmentRequest>,
) -> impl IntoResponse {
    let kind = match request.document_type.parse::<DocumentKind>() {
        Ok(k) => k,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response();
        }
    };
    let document = DocumentRef::new(kind, request.document_id);
    let job_id = JobId::new(request.job_id);

    match state.assignments.unassign(document, &job_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AssignmentResponse {
                job_id: job_id.to_string(),
                message: "Document unassigned from job".to_string(),
            }),
        )
            .into_response(),
        Err(e) => assignment_error_response(e),
    }
}

#[derive(Serialize)]
pub struct DocumentJobResponse {
    pub job_id: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn document_job_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let kind = match kind.parse::<DocumentKind>() {
        Ok(k) => k,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response();
        }
    };
    let document = DocumentRef::new(kind, id);

    match state.assignments.job_for_document(&document).await {
        Ok(job_id) => (
            StatusCode::OK,
            Json(DocumentJobResponse {
                job_id: job_id.map(|j| j.to_string()),
            }),
        )
            .into_response(),
        Err(e) => assignment_error_response(e),
    }
}
