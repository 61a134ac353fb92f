use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{
    DocumentRepository, JobRepository, RepositoryError, TransactionLog,
};
use crate::domain::{
    Document, DocumentKind, DocumentRef, DocumentStatus, Job, JobId, PaymentStatus,
    PaymentTransaction, TransactionId,
};

/// In-memory document collection; the substitutable fake the engines are
/// tested against, and the default store for local runs.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn get(&self, document: &DocumentRef) -> Result<Option<Document>, RepositoryError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|d| d.kind == document.kind && d.id == document.id)
            .cloned())
    }

    async fn put(&self, document: &Document) -> Result<(), RepositoryError> {
        let mut documents = self.documents.write().await;
        match documents
            .iter_mut()
            .find(|d| d.kind == document.kind && d.id == document.id)
        {
            Some(existing) => *existing = document.clone(),
            None => documents.push(document.clone()),
        }
        Ok(())
    }

    async fn list(&self, kind: DocumentKind) -> Result<Vec<Document>, RepositoryError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|d| d.kind == kind).cloned().collect())
    }

    async fn set_status(
        &self,
        document: &DocumentRef,
        status: DocumentStatus,
        transaction_id: Option<&TransactionId>,
    ) -> Result<(), RepositoryError> {
        let mut documents = self.documents.write().await;
        let entry = documents
            .iter_mut()
            .find(|d| d.kind == document.kind && d.id == document.id)
            .ok_or_else(|| RepositoryError::NotFound(document.to_string()))?;
        entry.status = status;
        if let Some(transaction_id) = transaction_id {
            entry.payment_transaction_id = Some(transaction_id.clone());
        }
        Ok(())
    }
}

/// In-memory Job collection with the prepend (newest-first) contract.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<Vec<Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        jobs.insert(0, job.clone());
        Ok(())
    }

    async fn get(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|j| &j.id == id).cloned())
    }

    async fn update(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let entry = jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| RepositoryError::NotFound(job.id.to_string()))?;
        *entry = job.clone();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.clone())
    }

    async fn set_payment_status(
        &self,
        id: &JobId,
        status: PaymentStatus,
    ) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let entry = jobs
            .iter_mut()
            .find(|j| &j.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        entry.payment_status = status;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTransactionLog {
    entries: RwLock<Vec<PaymentTransaction>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn append(&self, transaction: &PaymentTransaction) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.push(transaction.clone());
        Ok(())
    }

    async fn list_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<PaymentTransaction>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|t| &t.job_id == job_id)
            .cloned()
            .collect())
    }
}
