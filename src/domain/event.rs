use serde::Serialize;
use serde_json::Value;

use super::{DocumentRef, Job, JobId, PaymentStatus, TransactionId};

/// Fire-and-forget notifications consumed by reactive listeners (UI refresh,
/// analytics). Delivery is never required for engine correctness.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DomainEvent {
    JobCreated {
        job: Job,
    },
    DocumentAssignedToJob {
        document: DocumentRef,
        job_id: JobId,
    },
    DocumentUnassignedFromJob {
        document: DocumentRef,
        job_id: JobId,
    },
    PaymentStatusUpdated {
        job_id: JobId,
        source: Option<DocumentRef>,
        payment_status: PaymentStatus,
        transaction_id: TransactionId,
    },
    Analytics {
        name: String,
        properties: Value,
    },
}
