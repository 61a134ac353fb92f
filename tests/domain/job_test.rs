use chrono::Utc;

use fieldline::domain::{
    DocumentKind, DocumentRef, JobId, LinkedDocument, PaymentStatus, TransactionId,
};

use crate::helpers::{direct_job, sourced_job};

#[test]
fn given_generated_ids_when_inspecting_then_prefixes_match() {
    assert!(JobId::generate().as_str().starts_with("JOB-"));
    assert!(TransactionId::generate().as_str().starts_with("TXN-"));
}

#[test]
fn given_full_payment_flag_when_mapping_then_status_matches() {
    assert_eq!(PaymentStatus::from_full_payment(true), PaymentStatus::Paid);
    assert_eq!(
        PaymentStatus::from_full_payment(false),
        PaymentStatus::Partial
    );
}

#[test]
fn given_job_with_source_when_checking_references_then_primary_and_linked_found() {
    let source = DocumentRef::new(DocumentKind::Invoice, "INV-1");
    let mut job = sourced_job("JOB-1", source.clone(), 100);

    let linked = DocumentRef::new(DocumentKind::Estimate, "EST-1");
    job.linked_documents.push(LinkedDocument {
        document: linked.clone(),
        linked_at: Utc::now(),
    });

    assert!(job.is_primary_source(&source));
    assert!(!job.is_primary_source(&linked));
    assert!(job.has_linked_entry(&linked));
    assert!(!job.has_linked_entry(&source));
    assert!(job.references(&source));
    assert!(job.references(&linked));
    assert!(!job.references(&DocumentRef::new(DocumentKind::Agreement, "AGR-1")));

    assert_eq!(job.source_kind(), Some(DocumentKind::Invoice));
    assert_eq!(direct_job("JOB-2").source_kind(), None);
}
