use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::domain::{Document, DocumentKind};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    #[serde(default)]
    pub convertible: bool,
}

/// Documents are authored by the back office; this endpoint is the seam they
/// arrive through.
#[tracing::instrument(skip(state, document), fields(document = %document.document_ref()))]
pub async fn upsert_document_handler(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> impl IntoResponse {
    match state.documents.put(&document).await {
        Ok(()) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to store document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to store document: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_documents_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ListDocumentsQuery>,
) -> impl IntoResponse {
    let kind = match kind.parse::<DocumentKind>() {
        Ok(k) => k,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response();
        }
    };

    let result = if query.convertible {
        state
            .conversions
            .convertible(kind)
            .await
            .map_err(|e| e.to_string())
    } else {
        state.documents.list(kind).await.map_err(|e| e.to_string())
    };

    match result {
        Ok(documents) => (StatusCode::OK, Json(documents)).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Failed to list documents");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error }),
            )
                .into_response()
        }
    }
}
