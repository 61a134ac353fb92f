use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{token_suffix, DocumentKind, DocumentRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Partial,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
        }
    }

    pub fn from_full_payment(full_payment: bool) -> Self {
        if full_payment {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "partial" => Ok(PaymentStatus::Partial),
            other => Err(format!("Invalid payment status: {}", other)),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time-based unique Job token, `JOB-<millis>-<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> Self {
        Self(format!(
            "JOB-{}-{}",
            Utc::now().timestamp_millis(),
            token_suffix(4)
        ))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A secondarily associated document. Unlike the primary source, linked
/// entries can be removed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedDocument {
    pub document: DocumentRef,
    pub linked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub customer_id: String,
    pub customer_name: String,
    pub employee_name: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub amount: Decimal,
    /// The document this Job was converted from. Immutable after creation;
    /// `None` for Jobs created directly.
    pub source: Option<DocumentRef>,
    pub payment_status: PaymentStatus,
    pub linked_documents: Vec<LinkedDocument>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn source_kind(&self) -> Option<DocumentKind> {
        self.source.as_ref().map(|s| s.kind)
    }

    pub fn is_primary_source(&self, document: &DocumentRef) -> bool {
        self.source.as_ref() == Some(document)
    }

    pub fn has_linked_entry(&self, document: &DocumentRef) -> bool {
        self.linked_documents
            .iter()
            .any(|l| &l.document == document)
    }

    /// True when the document is attached to this Job at all, primary or
    /// secondary.
    pub fn references(&self, document: &DocumentRef) -> bool {
        self.is_primary_source(document) || self.has_linked_entry(document)
    }
}
