//! Document database operations

use super::AppState;
use crate::document::models::Document;
use chrono::{DateTime, Utc};
use uuid::Uuid;

impl AppState {
    pub async fn insert_document(&self, document: &Document) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO documents
                (id, document_name, description, template_id, json_payload, ref_number, created_at, deleted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NULL)
            "#,
        )
        .bind(document.id)
        .bind(&document.document_name)
        .bind(&document.description)
        .bind(document.template_id)
        .bind(&document.json_payload)
        .bind(&document.ref_number)
        .bind(document.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_document_by_ref(
        &self,
        ref_number: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        sqlx::query_as::<_, Document>(
            "SELECT id, document_name, description, template_id, json_payload, ref_number, created_at, deleted_at
             FROM documents WHERE ref_number = $1 AND deleted_at IS NULL",
        )
        .bind(ref_number)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_all_documents(&self) -> Result<Vec<Document>, sqlx::Error> {
        sqlx::query_as::<_, Document>(
            "SELECT id, document_name, description, template_id, json_payload, ref_number, created_at, deleted_at
             FROM documents WHERE deleted_at IS NULL ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn soft_delete_document(&self, id: &Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE documents SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count_documents_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM documents
             WHERE created_at >= $1 AND created_at < $2 AND deleted_at IS NULL",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Document counts per weekday name for rows created since `start`.
    /// Days with no documents are absent here; the report layer zero-fills.
    pub async fn document_counts_since(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT TO_CHAR(created_at AT TIME ZONE 'UTC', 'FMDay') AS day, COUNT(*) AS count
             FROM documents
             WHERE created_at >= $1 AND deleted_at IS NULL
             GROUP BY TO_CHAR(created_at AT TIME ZONE 'UTC', 'FMDay')
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
    }
}
