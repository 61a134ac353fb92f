use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::application::ports::{
    DocumentRepository, EventPublisher, JobRepository, RepositoryError,
};
use crate::domain::{Document, DocumentKind, DocumentRef, DomainEvent, Job, JobId, PaymentStatus};

/// Serializes conversions per source document so duplicate triggers
/// (double-tap, replayed events) cannot mint two Jobs from one document.
#[derive(Default)]
struct SourceLocks {
    inner: Mutex<HashMap<DocumentRef, Arc<Mutex<()>>>>,
}

impl SourceLocks {
    async fn acquire(&self, key: &DocumentRef) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().await;
            Arc::clone(map.entry(key.clone()).or_default())
        };
        slot.lock_owned().await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentRef),
    #[error("Document was already converted to {existing}")]
    AlreadyConverted { existing: JobId },
    #[error("Document is not eligible for conversion: {0}")]
    NotConvertible(DocumentRef),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

/// Creates a Job from an invoice, estimate, or agreement, stamping provenance
/// and flipping the source document into its terminal converted status.
pub struct ConversionService {
    documents: Arc<dyn DocumentRepository>,
    jobs: Arc<dyn JobRepository>,
    events: Arc<dyn EventPublisher>,
    default_employee: String,
    locks: SourceLocks,
}

impl ConversionService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        jobs: Arc<dyn JobRepository>,
        events: Arc<dyn EventPublisher>,
        default_employee: String,
    ) -> Self {
        Self {
            documents,
            jobs,
            events,
            default_employee,
            locks: SourceLocks::default(),
        }
    }

    /// Convert a document into a new Job.
    ///
    /// Exactly one Job is ever created per source document: repeat calls fail
    /// with [`ConversionError::AlreadyConverted`] naming the existing Job, and
    /// concurrent calls for the same source are serialized.
    #[tracing::instrument(skip(self), fields(source = %source))]
    pub async fn convert_to_job(
        &self,
        source: DocumentRef,
        schedule_date: Option<NaiveDate>,
        schedule_time: Option<NaiveTime>,
    ) -> Result<Job, ConversionError> {
        let _guard = self.locks.acquire(&source).await;

        if let Some(existing) = self.find_converted_job(&source).await? {
            tracing::warn!(existing = %existing, "Conversion rejected: source already converted");
            return Err(ConversionError::AlreadyConverted { existing });
        }

        let document = self
            .documents
            .get(&source)
            .await?
            .ok_or_else(|| ConversionError::DocumentNotFound(source.clone()))?;

        // Converted status with no surviving Job still blocks re-conversion.
        if !document.is_convertible() {
            return Err(ConversionError::NotConvertible(source));
        }

        let job = self.build_job(&document, schedule_date, schedule_time);

        self.documents
            .set_status(&source, source.kind.converted_status(), None)
            .await?;
        self.jobs.create(&job).await?;

        tracing::info!(
            job_id = %job.id,
            status = %source.kind.converted_status(),
            "Document converted to job"
        );
        self.events.publish(DomainEvent::JobCreated { job: job.clone() });

        Ok(job)
    }

    /// Documents of a kind still eligible for conversion.
    pub async fn convertible(&self, kind: DocumentKind) -> Result<Vec<Document>, ConversionError> {
        let documents = self.documents.list(kind).await?;
        Ok(documents.into_iter().filter(Document::is_convertible).collect())
    }

    async fn find_converted_job(
        &self,
        source: &DocumentRef,
    ) -> Result<Option<JobId>, RepositoryError> {
        let jobs = self.jobs.list().await?;
        Ok(jobs
            .into_iter()
            .find(|job| job.is_primary_source(source))
            .map(|job| job.id))
    }

    fn build_job(
        &self,
        document: &Document,
        schedule_date: Option<NaiveDate>,
        schedule_time: Option<NaiveTime>,
    ) -> Job {
        let title = match document.kind {
            DocumentKind::Agreement => document
                .agreement_kind
                .clone()
                .unwrap_or_else(|| format!("Agreement {}", document.id)),
            kind => format!("{} {}", kind.display_name(), document.id),
        };

        let employee_name = document
            .employee_name
            .clone()
            .unwrap_or_else(|| self.default_employee.clone());

        let now = Utc::now();
        Job {
            id: JobId::generate(),
            title,
            customer_id: document.customer_id.clone(),
            customer_name: document.customer_name.clone(),
            employee_name,
            scheduled_date: schedule_date.unwrap_or_else(|| now.date_naive()),
            scheduled_time: schedule_time.unwrap_or_else(|| document.kind.default_schedule_time()),
            amount: document.amount,
            source: Some(document.document_ref()),
            payment_status: PaymentStatus::Unpaid,
            linked_documents: Vec::new(),
            created_at: now,
        }
    }
}
