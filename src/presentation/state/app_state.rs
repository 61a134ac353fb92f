use std::sync::Arc;

use crate::application::ports::{DocumentRepository, JobRepository, TransactionLog};
use crate::application::services::{AssignmentService, ConversionService, PaymentSyncService};

pub struct AppState {
    pub conversions: Arc<ConversionService>,
    pub assignments: Arc<AssignmentService>,
    pub payments: Arc<PaymentSyncService>,
    pub documents: Arc<dyn DocumentRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub transactions: Arc<dyn TransactionLog>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            conversions: Arc::clone(&self.conversions),
            assignments: Arc::clone(&self.assignments),
            payments: Arc::clone(&self.payments),
            documents: Arc::clone(&self.documents),
            jobs: Arc::clone(&self.jobs),
            transactions: Arc::clone(&self.transactions),
        }
    }
}
