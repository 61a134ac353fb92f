use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TransactionId;

/// The three financial document families a Job can originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    Estimate,
    Agreement,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Estimate => "estimate",
            DocumentKind::Agreement => "agreement",
        }
    }

    /// Human-facing name, used when deriving Job titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Estimate => "Estimate",
            DocumentKind::Agreement => "Agreement",
        }
    }

    /// Terminal status stamped on a document once a Job has been created from it.
    pub fn converted_status(&self) -> DocumentStatus {
        match self {
            DocumentKind::Invoice => DocumentStatus::JobCreated,
            DocumentKind::Estimate => DocumentStatus::ConvertedToJob,
            DocumentKind::Agreement => DocumentStatus::JobCreated,
        }
    }

    /// Default visit time for Jobs converted from this kind of document.
    pub fn default_schedule_time(&self) -> NaiveTime {
        let hour = match self {
            DocumentKind::Invoice => 9,
            DocumentKind::Estimate => 10,
            DocumentKind::Agreement => 11,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "invoice" => Ok(DocumentKind::Invoice),
            "estimate" => Ok(DocumentKind::Estimate),
            "agreement" => Ok(DocumentKind::Agreement),
            other => Err(format!("Invalid document kind: {}", other)),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-assigned document identifier, e.g. `INV-900` or `EST-5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `(kind, id)` pair that keys linkage, conversion, and locking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub id: DocumentId,
}

impl DocumentRef {
    pub fn new(kind: DocumentKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: DocumentId::new(id),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Union of the per-kind status domains.
///
/// Invoices move through Open/Paid/Partial/Job Created, estimates through
/// Sent/Approved/Paid/Unpaid/Converted to Job, agreements through
/// Active/Open/Paid/Partial/Job Created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Open,
    Sent,
    Approved,
    Active,
    Unpaid,
    Paid,
    Partial,
    #[serde(rename = "Job Created")]
    JobCreated,
    #[serde(rename = "Converted to Job")]
    ConvertedToJob,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Open => "Open",
            DocumentStatus::Sent => "Sent",
            DocumentStatus::Approved => "Approved",
            DocumentStatus::Active => "Active",
            DocumentStatus::Unpaid => "Unpaid",
            DocumentStatus::Paid => "Paid",
            DocumentStatus::Partial => "Partial",
            DocumentStatus::JobCreated => "Job Created",
            DocumentStatus::ConvertedToJob => "Converted to Job",
        }
    }

    /// A converted document no longer appears in conversion-eligibility
    /// listings, but stays mutable for payment-status cascades.
    pub fn is_converted(&self) -> bool {
        matches!(
            self,
            DocumentStatus::JobCreated | DocumentStatus::ConvertedToJob
        )
    }

    /// Status cascaded onto a source document by a payment.
    pub fn settled(full_payment: bool) -> Self {
        if full_payment {
            DocumentStatus::Paid
        } else {
            DocumentStatus::Partial
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(DocumentStatus::Open),
            "Sent" => Ok(DocumentStatus::Sent),
            "Approved" => Ok(DocumentStatus::Approved),
            "Active" => Ok(DocumentStatus::Active),
            "Unpaid" => Ok(DocumentStatus::Unpaid),
            "Paid" => Ok(DocumentStatus::Paid),
            "Partial" => Ok(DocumentStatus::Partial),
            "Job Created" => Ok(DocumentStatus::JobCreated),
            "Converted to Job" => Ok(DocumentStatus::ConvertedToJob),
            other => Err(format!("Invalid document status: {}", other)),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An invoice, estimate, or agreement. Authored by the back office; this
/// service only flips its status (conversion, payment cascade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub customer_id: String,
    pub customer_name: String,
    /// Total for invoices and estimates, monthly amount for agreements.
    pub amount: Decimal,
    pub status: DocumentStatus,
    pub employee_name: Option<String>,
    pub issued_on: NaiveDate,
    /// Agreement flavor ("Maintenance", "Service Plan", ...); agreements only.
    pub agreement_kind: Option<String>,
    /// Stamped by the payment sync when a payment cascades onto this document.
    pub payment_transaction_id: Option<TransactionId>,
}

impl Document {
    pub fn new(
        kind: DocumentKind,
        id: impl Into<String>,
        customer_id: impl Into<String>,
        customer_name: impl Into<String>,
        amount: Decimal,
        status: DocumentStatus,
        issued_on: NaiveDate,
    ) -> Self {
        Self {
            id: DocumentId::new(id),
            kind,
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            amount,
            status,
            employee_name: None,
            issued_on,
            agreement_kind: None,
            payment_transaction_id: None,
        }
    }

    pub fn document_ref(&self) -> DocumentRef {
        DocumentRef {
            kind: self.kind,
            id: self.id.clone(),
        }
    }

    pub fn is_convertible(&self) -> bool {
        !self.status.is_converted()
    }
}
