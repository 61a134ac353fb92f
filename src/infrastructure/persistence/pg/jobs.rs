use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{
    DocumentKind, DocumentRef, Job, JobId, LinkedDocument, PaymentStatus,
};

use super::map_sqlx_error;

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn linked_documents_for(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<LinkedDocument>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT kind, document_id, linked_at
            FROM job_linked_documents
            WHERE job_id = $1
            ORDER BY linked_at ASC
            "#,
        )
        .bind(job_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(map_linked_document).collect()
    }
}

fn map_linked_document(row: &PgRow) -> Result<LinkedDocument, RepositoryError> {
    let kind: String = row.try_get("kind").map_err(map_sqlx_error)?;
    Ok(LinkedDocument {
        document: DocumentRef::new(
            kind.parse::<DocumentKind>().map_err(RepositoryError::QueryFailed)?,
            row.try_get::<String, _>("document_id").map_err(map_sqlx_error)?,
        ),
        linked_at: row
            .try_get::<DateTime<Utc>, _>("linked_at")
            .map_err(map_sqlx_error)?,
    })
}

fn map_job(row: &PgRow, linked_documents: Vec<LinkedDocument>) -> Result<Job, RepositoryError> {
    let payment_status: String = row.try_get("payment_status").map_err(map_sqlx_error)?;
    let source_kind: Option<String> = row.try_get("source_kind").map_err(map_sqlx_error)?;
    let source_id: Option<String> = row.try_get("source_id").map_err(map_sqlx_error)?;

    let source = match (source_kind, source_id) {
        (Some(kind), Some(id)) => Some(DocumentRef::new(
            kind.parse::<DocumentKind>().map_err(RepositoryError::QueryFailed)?,
            id,
        )),
        _ => None,
    };

    Ok(Job {
        id: JobId::new(row.try_get::<String, _>("id").map_err(map_sqlx_error)?),
        title: row.try_get("title").map_err(map_sqlx_error)?,
        customer_id: row.try_get("customer_id").map_err(map_sqlx_error)?,
        customer_name: row.try_get("customer_name").map_err(map_sqlx_error)?,
        employee_name: row.try_get("employee_name").map_err(map_sqlx_error)?,
        scheduled_date: row
            .try_get::<NaiveDate, _>("scheduled_date")
            .map_err(map_sqlx_error)?,
        scheduled_time: row
            .try_get::<NaiveTime, _>("scheduled_time")
            .map_err(map_sqlx_error)?,
        amount: row.try_get::<Decimal, _>("amount").map_err(map_sqlx_error)?,
        source,
        payment_status: payment_status
            .parse::<PaymentStatus>()
            .map_err(RepositoryError::QueryFailed)?,
        linked_documents,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(map_sqlx_error)?,
    })
}

const SELECT_JOB: &str = r#"
    SELECT id, title, customer_id, customer_name, employee_name,
           scheduled_date, scheduled_time, amount, source_kind, source_id,
           payment_status, created_at
    FROM jobs
"#;

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, title, customer_id, customer_name, employee_name,
                scheduled_date, scheduled_time, amount, source_kind, source_id,
                payment_status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(job.id.as_str())
        .bind(&job.title)
        .bind(&job.customer_id)
        .bind(&job.customer_name)
        .bind(&job.employee_name)
        .bind(job.scheduled_date)
        .bind(job.scheduled_time)
        .bind(job.amount)
        .bind(job.source.as_ref().map(|s| s.kind.as_str()))
        .bind(job.source.as_ref().map(|s| s.id.as_str()))
        .bind(job.payment_status.as_str())
        .bind(job.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        for linked in &job.linked_documents {
            sqlx::query(
                r#"
                INSERT INTO job_linked_documents (job_id, kind, document_id, linked_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(job.id.as_str())
            .bind(linked.document.kind.as_str())
            .bind(linked.document.id.as_str())
            .bind(linked.linked_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_JOB))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let linked = self.linked_documents_for(id).await?;
                Ok(Some(map_job(&row, linked)?))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn update(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET title = $2, customer_id = $3, customer_name = $4, employee_name = $5,
                scheduled_date = $6, scheduled_time = $7, amount = $8,
                payment_status = $9
            WHERE id = $1
            "#,
        )
        .bind(job.id.as_str())
        .bind(&job.title)
        .bind(&job.customer_id)
        .bind(&job.customer_name)
        .bind(&job.employee_name)
        .bind(job.scheduled_date)
        .bind(job.scheduled_time)
        .bind(job.amount)
        .bind(job.payment_status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(job.id.to_string()));
        }

        sqlx::query("DELETE FROM job_linked_documents WHERE job_id = $1")
            .bind(job.id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        for linked in &job.linked_documents {
            sqlx::query(
                r#"
                INSERT INTO job_linked_documents (job_id, kind, document_id, linked_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(job.id.as_str())
            .bind(linked.document.kind.as_str())
            .bind(linked.document.id.as_str())
            .bind(linked.linked_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        let rows = sqlx::query(&format!("{} ORDER BY seq DESC", SELECT_JOB))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let link_rows = sqlx::query(
            r#"
            SELECT job_id, kind, document_id, linked_at
            FROM job_linked_documents
            ORDER BY linked_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut links: HashMap<String, Vec<LinkedDocument>> = HashMap::new();
        for row in &link_rows {
            let job_id: String = row.try_get("job_id").map_err(map_sqlx_error)?;
            links.entry(job_id).or_default().push(map_linked_document(row)?);
        }

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(map_sqlx_error)?;
                map_job(row, links.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    #[instrument(skip(self), fields(job_id = %id, status = %status))]
    async fn set_payment_status(
        &self,
        id: &JobId,
        status: PaymentStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE jobs SET payment_status = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
