use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    assign_handler, convert_handler, document_job_handler, health_handler, job_actions_handler,
    job_detail_handler, job_transactions_handler, list_documents_handler, list_jobs_handler,
    payment_handler, unassign_handler, upsert_document_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/documents", post(upsert_document_handler))
        .route("/api/v1/documents/{kind}", get(list_documents_handler))
        .route(
            "/api/v1/documents/{kind}/{id}/job",
            get(document_job_handler),
        )
        .route("/api/v1/conversions", post(convert_handler))
        .route(
            "/api/v1/assignments",
            post(assign_handler).delete(unassign_handler),
        )
        .route("/api/v1/payments", post(payment_handler))
        .route("/api/v1/jobs", get(list_jobs_handler))
        .route("/api/v1/jobs/{job_id}", get(job_detail_handler))
        .route("/api/v1/jobs/{job_id}/actions", get(job_actions_handler))
        .route(
            "/api/v1/jobs/{job_id}/transactions",
            get(job_transactions_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
