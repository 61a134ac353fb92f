use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::application::ports::{
    DocumentRepository, JobRepository, RepositoryError, TransactionLog,
};
use crate::domain::{
    Document, DocumentKind, DocumentRef, DocumentStatus, Job, JobId, PaymentStatus,
    PaymentTransaction, TransactionId,
};

/// On-disk shape: arrays under named keys, the same flat key-value layout the
/// reference persisted.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    invoices: Vec<Document>,
    #[serde(default)]
    estimates: Vec<Document>,
    #[serde(default)]
    agreements: Vec<Document>,
    #[serde(default)]
    jobs: Vec<Job>,
    #[serde(default)]
    transactions: Vec<PaymentTransaction>,
}

impl Snapshot {
    fn documents(&self, kind: DocumentKind) -> &Vec<Document> {
        match kind {
            DocumentKind::Invoice => &self.invoices,
            DocumentKind::Estimate => &self.estimates,
            DocumentKind::Agreement => &self.agreements,
        }
    }

    fn documents_mut(&mut self, kind: DocumentKind) -> &mut Vec<Document> {
        match kind {
            DocumentKind::Invoice => &mut self.invoices,
            DocumentKind::Estimate => &mut self.estimates,
            DocumentKind::Agreement => &mut self.agreements,
        }
    }
}

/// Single-file JSON persistence. The whole snapshot is loaded at startup and
/// atomically rewritten (temp file + rename) after every mutation.
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<Snapshot>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        }

        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                RepositoryError::ConnectionFailed(format!(
                    "corrupt snapshot {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(RepositoryError::ConnectionFailed(e.to_string())),
        };

        Ok(Self {
            path,
            state: RwLock::new(snapshot),
        })
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl DocumentRepository for JsonFileStore {
    async fn get(&self, document: &DocumentRef) -> Result<Option<Document>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .documents(document.kind)
            .iter()
            .find(|d| d.id == document.id)
            .cloned())
    }

    async fn put(&self, document: &Document) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let collection = state.documents_mut(document.kind);
        match collection.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document.clone(),
            None => collection.push(document.clone()),
        }
        self.persist(&state).await
    }

    async fn list(&self, kind: DocumentKind) -> Result<Vec<Document>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.documents(kind).clone())
    }

    async fn set_status(
        &self,
        document: &DocumentRef,
        status: DocumentStatus,
        transaction_id: Option<&TransactionId>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let entry = state
            .documents_mut(document.kind)
            .iter_mut()
            .find(|d| d.id == document.id)
            .ok_or_else(|| RepositoryError::NotFound(document.to_string()))?;
        entry.status = status;
        if let Some(transaction_id) = transaction_id {
            entry.payment_transaction_id = Some(transaction_id.clone());
        }
        self.persist(&state).await
    }
}

#[async_trait]
impl JobRepository for JsonFileStore {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state.jobs.insert(0, job.clone());
        self.persist(&state).await
    }

    async fn get(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.jobs.iter().find(|j| &j.id == id).cloned())
    }

    async fn update(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let entry = state
            .jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| RepositoryError::NotFound(job.id.to_string()))?;
        *entry = job.clone();
        self.persist(&state).await
    }

    async fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.jobs.clone())
    }

    async fn set_payment_status(
        &self,
        id: &JobId,
        status: PaymentStatus,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let entry = state
            .jobs
            .iter_mut()
            .find(|j| &j.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        entry.payment_status = status;
        self.persist(&state).await
    }
}

#[async_trait]
impl TransactionLog for JsonFileStore {
    async fn append(&self, transaction: &PaymentTransaction) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state.transactions.push(transaction.clone());
        self.persist(&state).await
    }

    async fn list_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<PaymentTransaction>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .transactions
            .iter()
            .filter(|t| &t.job_id == job_id)
            .cloned()
            .collect())
    }
}
