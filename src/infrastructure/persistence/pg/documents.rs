use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::domain::{
    Document, DocumentId, DocumentKind, DocumentRef, DocumentStatus, TransactionId,
};

use super::map_sqlx_error;

pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_document(row: &PgRow) -> Result<Document, RepositoryError> {
    let kind: String = row.try_get("kind").map_err(map_sqlx_error)?;
    let status: String = row.try_get("status").map_err(map_sqlx_error)?;

    Ok(Document {
        id: DocumentId::new(row.try_get::<String, _>("id").map_err(map_sqlx_error)?),
        kind: kind.parse::<DocumentKind>().map_err(RepositoryError::QueryFailed)?,
        customer_id: row.try_get("customer_id").map_err(map_sqlx_error)?,
        customer_name: row.try_get("customer_name").map_err(map_sqlx_error)?,
        amount: row.try_get::<Decimal, _>("amount").map_err(map_sqlx_error)?,
        status: status
            .parse::<DocumentStatus>()
            .map_err(RepositoryError::QueryFailed)?,
        employee_name: row.try_get("employee_name").map_err(map_sqlx_error)?,
        issued_on: row.try_get::<NaiveDate, _>("issued_on").map_err(map_sqlx_error)?,
        agreement_kind: row.try_get("agreement_kind").map_err(map_sqlx_error)?,
        payment_transaction_id: row
            .try_get::<Option<String>, _>("payment_transaction_id")
            .map_err(map_sqlx_error)?
            .map(TransactionId::new),
    })
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    #[instrument(skip(self), fields(document = %document))]
    async fn get(&self, document: &DocumentRef) -> Result<Option<Document>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT kind, id, customer_id, customer_name, amount, status,
                   employee_name, issued_on, agreement_kind, payment_transaction_id
            FROM documents
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(document.kind.as_str())
        .bind(document.id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(map_document).transpose()
    }

    #[instrument(skip(self, document), fields(document = %document.document_ref()))]
    async fn put(&self, document: &Document) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO documents (
                kind, id, customer_id, customer_name, amount, status,
                employee_name, issued_on, agreement_kind, payment_transaction_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (kind, id) DO UPDATE SET
                customer_id = EXCLUDED.customer_id,
                customer_name = EXCLUDED.customer_name,
                amount = EXCLUDED.amount,
                status = EXCLUDED.status,
                employee_name = EXCLUDED.employee_name,
                issued_on = EXCLUDED.issued_on,
                agreement_kind = EXCLUDED.agreement_kind,
                payment_transaction_id = EXCLUDED.payment_transaction_id
            "#,
        )
        .bind(document.kind.as_str())
        .bind(document.id.as_str())
        .bind(&document.customer_id)
        .bind(&document.customer_name)
        .bind(document.amount)
        .bind(document.status.as_str())
        .bind(&document.employee_name)
        .bind(document.issued_on)
        .bind(&document.agreement_kind)
        .bind(document.payment_transaction_id.as_ref().map(|t| t.as_str()))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn list(&self, kind: DocumentKind) -> Result<Vec<Document>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT kind, id, customer_id, customer_name, amount, status,
                   employee_name, issued_on, agreement_kind, payment_transaction_id
            FROM documents
            WHERE kind = $1
            ORDER BY issued_on DESC, id ASC
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(map_document).collect()
    }

    #[instrument(skip(self, transaction_id), fields(document = %document, status = %status))]
    async fn set_status(
        &self,
        document: &DocumentRef,
        status: DocumentStatus,
        transaction_id: Option<&TransactionId>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET status = $3,
                payment_transaction_id = COALESCE($4, payment_transaction_id)
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(document.kind.as_str())
        .bind(document.id.as_str())
        .bind(status.as_str())
        .bind(transaction_id.map(|t| t.as_str()))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(document.to_string()));
        }
        Ok(())
    }
}
