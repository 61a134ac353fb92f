use fieldline::application::ports::JobRepository;
use fieldline::application::services::AssignmentError;
use fieldline::domain::{DocumentKind, DocumentRef, DomainEvent, JobId};

use crate::helpers::{direct_job, sourced_job, TestWorld};

fn est_5() -> DocumentRef {
    DocumentRef::new(DocumentKind::Estimate, "EST-5")
}

#[tokio::test]
async fn given_missing_job_when_assigning_then_job_not_found() {
    let world = TestWorld::new();

    let result = world
        .assignments
        .assign(est_5(), &JobId::new("JOB-404"))
        .await;

    assert!(matches!(result, Err(AssignmentError::JobNotFound(_))));
}

#[tokio::test]
async fn given_unlinked_document_when_assigning_then_linked_and_events_emitted() {
    let world = TestWorld::new();
    world.seed_job(direct_job("JOB-1")).await;

    world
        .assignments
        .assign(est_5(), &JobId::new("JOB-1"))
        .await
        .expect("assignment succeeds");

    let job = world
        .jobs
        .get(&JobId::new("JOB-1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.linked_documents.len(), 1);
    assert_eq!(job.linked_documents[0].document, est_5());

    let events = world.events.recorded();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        DomainEvent::DocumentAssignedToJob { document, job_id }
            if document == &est_5() && job_id.as_str() == "JOB-1"
    ));
    assert!(matches!(
        &events[1],
        DomainEvent::Analytics { name, .. } if name == "document_assigned"
    ));
}

#[tokio::test]
async fn given_repeated_assignment_when_assigning_then_idempotent() {
    let world = TestWorld::new();
    world.seed_job(direct_job("JOB-1")).await;
    let job_id = JobId::new("JOB-1");

    world.assignments.assign(est_5(), &job_id).await.unwrap();
    world.assignments.assign(est_5(), &job_id).await.unwrap();

    let job = world.jobs.get(&job_id).await.unwrap().unwrap();
    assert_eq!(job.linked_documents.len(), 1);
    // the no-op repeat emits nothing
    assert_eq!(world.events.recorded().len(), 2);
}

#[tokio::test]
async fn given_document_on_another_job_when_assigning_then_conflict_names_it() {
    let world = TestWorld::new();
    world.seed_job(direct_job("JOB-1")).await;
    world.seed_job(direct_job("JOB-2")).await;

    world
        .assignments
        .assign(est_5(), &JobId::new("JOB-1"))
        .await
        .unwrap();

    let result = world
        .assignments
        .assign(est_5(), &JobId::new("JOB-2"))
        .await;

    match result {
        Err(AssignmentError::AlreadyAssigned { existing }) => {
            assert_eq!(existing.as_str(), "JOB-1");
        }
        other => panic!("expected AlreadyAssigned, got {:?}", other),
    }

    let err = world
        .assignments
        .assign(est_5(), &JobId::new("JOB-2"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Document is already assigned to JOB-1");
}

#[tokio::test]
async fn given_primary_source_elsewhere_when_assigning_then_conflict() {
    let world = TestWorld::new();
    let source = DocumentRef::new(DocumentKind::Invoice, "INV-1");
    world.seed_job(sourced_job("JOB-1", source.clone(), 100)).await;
    world.seed_job(direct_job("JOB-2")).await;

    let result = world
        .assignments
        .assign(source, &JobId::new("JOB-2"))
        .await;

    assert!(matches!(
        result,
        Err(AssignmentError::AlreadyAssigned { existing }) if existing.as_str() == "JOB-1"
    ));
}

#[tokio::test]
async fn given_own_primary_source_when_assigning_then_noop_success() {
    let world = TestWorld::new();
    let source = DocumentRef::new(DocumentKind::Invoice, "INV-1");
    world.seed_job(sourced_job("JOB-1", source.clone(), 100)).await;

    world
        .assignments
        .assign(source, &JobId::new("JOB-1"))
        .await
        .expect("re-assignment to own job is a no-op");

    let job = world
        .jobs
        .get(&JobId::new("JOB-1"))
        .await
        .unwrap()
        .unwrap();
    assert!(job.linked_documents.is_empty());
    assert!(world.events.recorded().is_empty());
}

#[tokio::test]
async fn given_primary_source_when_unassigning_then_rejected() {
    let world = TestWorld::new();
    let source = DocumentRef::new(DocumentKind::Invoice, "INV-1");
    world.seed_job(sourced_job("JOB-1", source.clone(), 100)).await;

    let result = world
        .assignments
        .unassign(source, &JobId::new("JOB-1"))
        .await;

    assert!(matches!(result, Err(AssignmentError::PrimarySource)));
}

#[tokio::test]
async fn given_linked_document_when_unassigning_then_exactly_one_entry_removed() {
    let world = TestWorld::new();
    world.seed_job(direct_job("JOB-1")).await;
    let job_id = JobId::new("JOB-1");
    let other = DocumentRef::new(DocumentKind::Invoice, "INV-7");

    world.assignments.assign(est_5(), &job_id).await.unwrap();
    world.assignments.assign(other.clone(), &job_id).await.unwrap();

    world.assignments.unassign(est_5(), &job_id).await.unwrap();

    let job = world.jobs.get(&job_id).await.unwrap().unwrap();
    assert_eq!(job.linked_documents.len(), 1);
    assert_eq!(job.linked_documents[0].document, other);

    let events = world.events.recorded();
    assert!(matches!(
        events.last().unwrap(),
        DomainEvent::DocumentUnassignedFromJob { document, .. } if document == &est_5()
    ));

    // removing a document that is not linked is a quiet no-op
    world.assignments.unassign(est_5(), &job_id).await.unwrap();
    let job = world.jobs.get(&job_id).await.unwrap().unwrap();
    assert_eq!(job.linked_documents.len(), 1);
}

#[tokio::test]
async fn given_linked_and_primary_documents_when_querying_then_first_match_wins() {
    let world = TestWorld::new();
    let source = DocumentRef::new(DocumentKind::Invoice, "INV-1");
    world.seed_job(sourced_job("JOB-1", source.clone(), 100)).await;
    world.seed_job(direct_job("JOB-2")).await;
    world
        .assignments
        .assign(est_5(), &JobId::new("JOB-2"))
        .await
        .unwrap();

    assert_eq!(
        world
            .assignments
            .job_for_document(&source)
            .await
            .unwrap()
            .unwrap()
            .as_str(),
        "JOB-1"
    );
    assert_eq!(
        world
            .assignments
            .job_for_document(&est_5())
            .await
            .unwrap()
            .unwrap()
            .as_str(),
        "JOB-2"
    );
    assert!(world
        .assignments
        .job_for_document(&DocumentRef::new(DocumentKind::Agreement, "AGR-9"))
        .await
        .unwrap()
        .is_none());

    assert!(world
        .assignments
        .is_assigned(&est_5(), &JobId::new("JOB-2"))
        .await
        .unwrap());
    assert!(!world
        .assignments
        .is_assigned(&est_5(), &JobId::new("JOB-1"))
        .await
        .unwrap());
}
