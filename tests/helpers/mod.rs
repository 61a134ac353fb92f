use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use fieldline::application::ports::{
    DocumentRepository, EventPublisher, JobRepository, TransactionLog,
};
use fieldline::application::services::{
    AssignmentService, ConversionService, PaymentSyncService,
};
use fieldline::domain::{
    Document, DocumentKind, DocumentRef, DocumentStatus, DomainEvent, Job, JobId, PaymentStatus,
};
use fieldline::infrastructure::persistence::{
    InMemoryDocumentRepository, InMemoryJobRepository, InMemoryTransactionLog,
};
use fieldline::presentation::{create_router, AppState};

pub const TEST_DEFAULT_EMPLOYEE: &str = "Sam Porter";

pub struct RecordingEventBus {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventBus {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingEventBus {
    fn publish(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// In-memory engines plus direct handles on the fakes, shared by engine and
/// API tests.
pub struct TestWorld {
    pub documents: Arc<InMemoryDocumentRepository>,
    pub jobs: Arc<InMemoryJobRepository>,
    pub transactions: Arc<InMemoryTransactionLog>,
    pub events: Arc<RecordingEventBus>,
    pub conversions: Arc<ConversionService>,
    pub assignments: Arc<AssignmentService>,
    pub payments: Arc<PaymentSyncService>,
}

impl TestWorld {
    pub fn new() -> Self {
        let documents = Arc::new(InMemoryDocumentRepository::new());
        let jobs = Arc::new(InMemoryJobRepository::new());
        let transactions = Arc::new(InMemoryTransactionLog::new());
        let events = Arc::new(RecordingEventBus::new());

        let conversions = Arc::new(ConversionService::new(
            Arc::clone(&documents) as Arc<dyn DocumentRepository>,
            Arc::clone(&jobs) as Arc<dyn JobRepository>,
            Arc::clone(&events) as Arc<dyn EventPublisher>,
            TEST_DEFAULT_EMPLOYEE.to_string(),
        ));
        let assignments = Arc::new(AssignmentService::new(
            Arc::clone(&jobs) as Arc<dyn JobRepository>,
            Arc::clone(&events) as Arc<dyn EventPublisher>,
        ));
        let payments = Arc::new(PaymentSyncService::new(
            Arc::clone(&jobs) as Arc<dyn JobRepository>,
            Arc::clone(&documents) as Arc<dyn DocumentRepository>,
            Arc::clone(&transactions) as Arc<dyn TransactionLog>,
            Arc::clone(&events) as Arc<dyn EventPublisher>,
        ));

        Self {
            documents,
            jobs,
            transactions,
            events,
            conversions,
            assignments,
            payments,
        }
    }

    pub fn router(&self) -> axum::Router {
        create_router(AppState {
            conversions: Arc::clone(&self.conversions),
            assignments: Arc::clone(&self.assignments),
            payments: Arc::clone(&self.payments),
            documents: Arc::clone(&self.documents) as Arc<dyn DocumentRepository>,
            jobs: Arc::clone(&self.jobs) as Arc<dyn JobRepository>,
            transactions: Arc::clone(&self.transactions) as Arc<dyn TransactionLog>,
        })
    }

    pub async fn seed_document(&self, document: Document) {
        DocumentRepository::put(self.documents.as_ref(), &document)
            .await
            .expect("seed document");
    }

    pub async fn seed_job(&self, job: Job) {
        JobRepository::create(self.jobs.as_ref(), &job)
            .await
            .expect("seed job");
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
}

pub fn invoice(id: &str, amount: i64, status: DocumentStatus) -> Document {
    Document::new(
        DocumentKind::Invoice,
        id,
        "CUST-1",
        "Dana Whitfield",
        Decimal::from(amount),
        status,
        test_date(),
    )
}

pub fn estimate(id: &str, amount: i64, status: DocumentStatus) -> Document {
    Document::new(
        DocumentKind::Estimate,
        id,
        "CUST-2",
        "Ray Okafor",
        Decimal::from(amount),
        status,
        test_date(),
    )
}

pub fn agreement(id: &str, monthly_amount: i64, status: DocumentStatus) -> Document {
    let mut document = Document::new(
        DocumentKind::Agreement,
        id,
        "CUST-3",
        "Priya Nair",
        Decimal::from(monthly_amount),
        status,
        test_date(),
    );
    document.agreement_kind = Some("Maintenance".to_string());
    document
}

/// A job created directly (no source document), usable as an assignment
/// target.
pub fn direct_job(id: &str) -> Job {
    Job {
        id: JobId::new(id),
        title: "Manual visit".to_string(),
        customer_id: "CUST-1".to_string(),
        customer_name: "Dana Whitfield".to_string(),
        employee_name: TEST_DEFAULT_EMPLOYEE.to_string(),
        scheduled_date: test_date(),
        scheduled_time: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
        amount: Decimal::ZERO,
        source: None,
        payment_status: PaymentStatus::Unpaid,
        linked_documents: Vec::new(),
        created_at: Utc::now(),
    }
}

pub fn sourced_job(id: &str, source: DocumentRef, amount: i64) -> Job {
    let mut job = direct_job(id);
    job.title = format!("{} {}", source.kind.display_name(), source.id);
    job.amount = Decimal::from(amount);
    job.source = Some(source);
    job
}
