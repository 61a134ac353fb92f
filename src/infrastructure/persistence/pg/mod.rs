mod documents;
mod jobs;
mod pool;
mod transactions;

pub use documents::PgDocumentRepository;
pub use jobs::PgJobRepository;
pub use pool::create_pool;
pub use transactions::PgTransactionLog;

use crate::application::ports::RepositoryError;

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::ConstraintViolation(db.to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(e.to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}
