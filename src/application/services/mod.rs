mod assignment_service;
mod conversion_service;
mod payment_sync_service;

pub use assignment_service::{AssignmentError, AssignmentService};
pub use conversion_service::{ConversionError, ConversionService};
pub use payment_sync_service::{PaymentReceipt, PaymentSyncError, PaymentSyncService};
