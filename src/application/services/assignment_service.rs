use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::application::ports::{EventPublisher, JobRepository, RepositoryError};
use crate::domain::{DocumentRef, DomainEvent, Job, JobId, LinkedDocument};

#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),
    #[error("Document is already assigned to {existing}")]
    AlreadyAssigned { existing: JobId },
    #[error("Cannot unassign the job's primary source document")]
    PrimarySource,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

/// Attaches already-created documents to existing Jobs as secondary
/// associations. Never creates Jobs and never touches document statuses.
pub struct AssignmentService {
    jobs: Arc<dyn JobRepository>,
    events: Arc<dyn EventPublisher>,
}

impl AssignmentService {
    pub fn new(jobs: Arc<dyn JobRepository>, events: Arc<dyn EventPublisher>) -> Self {
        Self { jobs, events }
    }

    /// Link a document to a Job.
    ///
    /// Idempotent: re-assigning a document to the Job it is already on (as
    /// primary source or linked entry) succeeds without mutation. A document
    /// attached to any *other* Job is rejected outright.
    #[tracing::instrument(skip(self), fields(document = %document, job_id = %job_id))]
    pub async fn assign(
        &self,
        document: DocumentRef,
        job_id: &JobId,
    ) -> Result<(), AssignmentError> {
        let mut job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| AssignmentError::JobNotFound(job_id.clone()))?;

        if job.references(&document) {
            tracing::debug!("Document already linked to this job, no-op");
            return Ok(());
        }

        if let Some(existing) = self.job_for_document(&document).await? {
            tracing::warn!(existing = %existing, "Assignment rejected: document already assigned");
            return Err(AssignmentError::AlreadyAssigned { existing });
        }

        job.linked_documents.push(LinkedDocument {
            document: document.clone(),
            linked_at: Utc::now(),
        });
        self.jobs.update(&job).await?;

        tracing::info!("Document assigned to job");
        self.events.publish(DomainEvent::DocumentAssignedToJob {
            document: document.clone(),
            job_id: job_id.clone(),
        });
        self.events.publish(DomainEvent::Analytics {
            name: "document_assigned".to_string(),
            properties: json!({
                "documentType": document.kind,
                "documentId": document.id,
                "jobId": job_id,
            }),
        });

        Ok(())
    }

    /// Remove a secondary association. The primary source can never be
    /// unassigned; removing a document that is not linked is a no-op.
    #[tracing::instrument(skip(self), fields(document = %document, job_id = %job_id))]
    pub async fn unassign(
        &self,
        document: DocumentRef,
        job_id: &JobId,
    ) -> Result<(), AssignmentError> {
        let mut job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| AssignmentError::JobNotFound(job_id.clone()))?;

        if job.is_primary_source(&document) {
            return Err(AssignmentError::PrimarySource);
        }

        let before = job.linked_documents.len();
        job.linked_documents.retain(|l| l.document != document);
        if job.linked_documents.len() == before {
            tracing::debug!("Document was not linked, no-op");
            return Ok(());
        }

        self.jobs.update(&job).await?;

        tracing::info!("Document unassigned from job");
        self.events.publish(DomainEvent::DocumentUnassignedFromJob {
            document,
            job_id: job_id.clone(),
        });

        Ok(())
    }

    /// First-match linear scan across every Job's primary source and linked
    /// documents, in store order.
    pub async fn job_for_document(
        &self,
        document: &DocumentRef,
    ) -> Result<Option<JobId>, AssignmentError> {
        let jobs = self.jobs.list().await?;
        Ok(jobs
            .into_iter()
            .find(|job| job.references(document))
            .map(|job: Job| job.id))
    }

    pub async fn is_assigned(
        &self,
        document: &DocumentRef,
        job_id: &JobId,
    ) -> Result<bool, AssignmentError> {
        match self.jobs.get(job_id).await? {
            Some(job) => Ok(job.references(document)),
            None => Ok(false),
        }
    }
}
