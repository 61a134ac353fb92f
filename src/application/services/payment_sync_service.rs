use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::ports::{
    DocumentRepository, EventPublisher, JobRepository, RepositoryError, TransactionLog,
};
use crate::domain::{
    DocumentRef, DocumentStatus, DomainEvent, Job, JobId, PaymentMethod, PaymentStatus,
    PaymentTransaction, TransactionId,
};

#[derive(Debug, thiserror::Error)]
pub enum PaymentSyncError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),
    #[error("Failed to update source document {document} (rolled back: {rolled_back})")]
    SourceUpdateFailed {
        document: DocumentRef,
        rolled_back: bool,
    },
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub transaction_id: TransactionId,
    pub job_id: JobId,
    pub payment_status: PaymentStatus,
    pub source_document_updated: bool,
}

/// The one two-phase operation in the lifecycle: a payment updates the Job and
/// cascades to the source document, atomically from the caller's perspective.
pub struct PaymentSyncService {
    jobs: Arc<dyn JobRepository>,
    documents: Arc<dyn DocumentRepository>,
    transactions: Arc<dyn TransactionLog>,
    events: Arc<dyn EventPublisher>,
}

impl PaymentSyncService {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        documents: Arc<dyn DocumentRepository>,
        transactions: Arc<dyn TransactionLog>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            jobs,
            documents,
            transactions,
            events,
        }
    }

    /// Record a successful payment against a Job.
    ///
    /// The Job's payment status is written first; if the cascade onto the
    /// source document then fails, the Job is compensated back to `unpaid`.
    /// A Job is never left `paid` while its source document remains unpaid.
    #[tracing::instrument(skip(self), fields(job_id = %job_id))]
    pub async fn sync_payment(
        &self,
        job_id: &JobId,
        source: Option<DocumentRef>,
        payment_method: PaymentMethod,
        full_payment: bool,
    ) -> Result<PaymentReceipt, PaymentSyncError> {
        let transaction_id = TransactionId::generate();
        let payment_status = PaymentStatus::from_full_payment(full_payment);

        match self.jobs.set_payment_status(job_id, payment_status).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                return Err(PaymentSyncError::JobNotFound(job_id.clone()));
            }
            Err(e) => return Err(e.into()),
        }

        let mut source_document_updated = false;
        if let Some(document) = &source {
            let cascade = self
                .documents
                .set_status(
                    document,
                    DocumentStatus::settled(full_payment),
                    Some(&transaction_id),
                )
                .await;

            if let Err(e) = cascade {
                tracing::error!(
                    error = %e,
                    document = %document,
                    "Source document update failed, rolling back job payment status"
                );
                let rolled_back = match self
                    .jobs
                    .set_payment_status(job_id, PaymentStatus::Unpaid)
                    .await
                {
                    Ok(()) => true,
                    Err(rollback_err) => {
                        tracing::error!(
                            error = %rollback_err,
                            "Rollback of job payment status failed"
                        );
                        false
                    }
                };
                return Err(PaymentSyncError::SourceUpdateFailed {
                    document: document.clone(),
                    rolled_back,
                });
            }
            source_document_updated = true;
        }

        self.transactions
            .append(&PaymentTransaction {
                transaction_id: transaction_id.clone(),
                job_id: job_id.clone(),
                source: source.clone(),
                payment_method,
                full_payment,
                recorded_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            transaction_id = %transaction_id,
            payment_status = %payment_status,
            "Payment synchronized"
        );
        self.events.publish(DomainEvent::PaymentStatusUpdated {
            job_id: job_id.clone(),
            source,
            payment_status,
            transaction_id: transaction_id.clone(),
        });

        Ok(PaymentReceipt {
            transaction_id,
            job_id: job_id.clone(),
            payment_status,
            source_document_updated,
        })
    }

    /// Status of the Job's source document; `None` when the Job has no source
    /// or the document is gone. Never fails.
    pub async fn source_document_status(&self, job: &Job) -> Option<DocumentStatus> {
        let source = job.source.as_ref()?;
        match self.documents.get(source).await {
            Ok(document) => document.map(|d| d.status),
            Err(e) => {
                tracing::debug!(error = %e, "Source document status lookup failed");
                None
            }
        }
    }

    /// Amount on the Job's source document. Never fails.
    pub async fn source_document_amount(&self, job: &Job) -> Option<Decimal> {
        let source = job.source.as_ref()?;
        match self.documents.get(source).await {
            Ok(document) => document.map(|d| d.amount),
            Err(e) => {
                tracing::debug!(error = %e, "Source document amount lookup failed");
                None
            }
        }
    }
}
