use async_trait::async_trait;

use crate::domain::{JobId, PaymentTransaction};

use super::RepositoryError;

/// Append-only payment audit trail. Records are never mutated or removed.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn append(&self, transaction: &PaymentTransaction) -> Result<(), RepositoryError>;

    async fn list_for_job(&self, job_id: &JobId)
        -> Result<Vec<PaymentTransaction>, RepositoryError>;
}
