use async_trait::async_trait;

use crate::domain::{Job, JobId, PaymentStatus};

use super::RepositoryError;

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Prepend a new Job; listings are newest-first.
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;

    /// Replace an existing Job wholesale. `NotFound` when absent.
    async fn update(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn list(&self) -> Result<Vec<Job>, RepositoryError>;

    /// Targeted payment-status write, used by the payment sync and its
    /// compensating rollback. `NotFound` when absent.
    async fn set_payment_status(
        &self,
        id: &JobId,
        status: PaymentStatus,
    ) -> Result<(), RepositoryError>;
}
