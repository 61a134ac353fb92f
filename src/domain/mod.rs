mod document;
mod event;
mod financial_action;
mod job;
mod payment;

pub use document::{Document, DocumentId, DocumentKind, DocumentRef, DocumentStatus};
pub use event::DomainEvent;
pub use financial_action::{financial_actions, FinancialAction, FinancialActionKind, HandlerSet};
pub use job::{Job, JobId, LinkedDocument, PaymentStatus};
pub use payment::{PaymentMethod, PaymentTransaction, TransactionId};

use uuid::Uuid;

/// Short random suffix for time-based ID tokens.
pub(crate) fn token_suffix(len: usize) -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(len);
    hex
}
