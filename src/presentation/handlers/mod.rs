mod assignments;
mod conversions;
mod documents;
mod health;
mod jobs;
mod payments;

pub use assignments::{assign_handler, document_job_handler, unassign_handler};
pub use conversions::convert_handler;
pub use documents::{list_documents_handler, upsert_document_handler};
pub use health::health_handler;
pub use jobs::{
    job_actions_handler, job_detail_handler, job_transactions_handler, list_jobs_handler,
};
pub use payments::payment_handler;
