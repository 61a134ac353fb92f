use async_trait::async_trait;

use crate::domain::{Document, DocumentKind, DocumentRef, DocumentStatus, TransactionId};

use super::RepositoryError;

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn get(&self, document: &DocumentRef) -> Result<Option<Document>, RepositoryError>;

    /// Insert or replace by `(kind, id)`.
    async fn put(&self, document: &Document) -> Result<(), RepositoryError>;

    async fn list(&self, kind: DocumentKind) -> Result<Vec<Document>, RepositoryError>;

    /// Update the status of an existing document, optionally tagging it with
    /// the payment transaction that caused the change. `NotFound` when the
    /// document does not exist.
    async fn set_status(
        &self,
        document: &DocumentRef,
        status: DocumentStatus,
        transaction_id: Option<&TransactionId>,
    ) -> Result<(), RepositoryError>;
}
