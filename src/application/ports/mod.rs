mod document_repository;
mod event_publisher;
mod job_repository;
mod repository_error;
mod transaction_log;

pub use document_repository::DocumentRepository;
pub use event_publisher::EventPublisher;
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
pub use transaction_log::TransactionLog;
