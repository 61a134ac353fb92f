use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{RepositoryError, TransactionLog};
use crate::domain::{
    DocumentKind, DocumentRef, JobId, PaymentMethod, PaymentTransaction, TransactionId,
};

use super::map_sqlx_error;

pub struct PgTransactionLog {
    pool: PgPool,
}

impl PgTransactionLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_transaction(row: &PgRow) -> Result<PaymentTransaction, RepositoryError> {
    let method: String = row.try_get("payment_method").map_err(map_sqlx_error)?;
    let source_kind: Option<String> = row.try_get("source_kind").map_err(map_sqlx_error)?;
    let source_id: Option<String> = row.try_get("source_id").map_err(map_sqlx_error)?;

    let source = match (source_kind, source_id) {
        (Some(kind), Some(id)) => Some(DocumentRef::new(
            kind.parse::<DocumentKind>().map_err(RepositoryError::QueryFailed)?,
            id,
        )),
        _ => None,
    };

    Ok(PaymentTransaction {
        transaction_id: TransactionId::new(
            row.try_get::<String, _>("transaction_id").map_err(map_sqlx_error)?,
        ),
        job_id: JobId::new(row.try_get::<String, _>("job_id").map_err(map_sqlx_error)?),
        source,
        payment_method: method
            .parse::<PaymentMethod>()
            .map_err(RepositoryError::QueryFailed)?,
        full_payment: row.try_get("full_payment").map_err(map_sqlx_error)?,
        recorded_at: row
            .try_get::<DateTime<Utc>, _>("recorded_at")
            .map_err(map_sqlx_error)?,
    })
}

#[async_trait]
impl TransactionLog for PgTransactionLog {
    #[instrument(skip(self, transaction), fields(transaction_id = %transaction.transaction_id))]
    async fn append(&self, transaction: &PaymentTransaction) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO payment_transactions (
                transaction_id, job_id, source_kind, source_id,
                payment_method, full_payment, recorded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction.transaction_id.as_str())
        .bind(transaction.job_id.as_str())
        .bind(transaction.source.as_ref().map(|s| s.kind.as_str()))
        .bind(transaction.source.as_ref().map(|s| s.id.as_str()))
        .bind(transaction.payment_method.as_str())
        .bind(transaction.full_payment)
        .bind(transaction.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %job_id))]
    async fn list_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<PaymentTransaction>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT transaction_id, job_id, source_kind, source_id,
                   payment_method, full_payment, recorded_at
            FROM payment_transactions
            WHERE job_id = $1
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(job_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(map_transaction).collect()
    }
}
