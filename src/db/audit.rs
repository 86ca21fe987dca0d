//! Log and failed-generation database operations

use super::AppState;
use crate::audit::models::{FailedGeneration, LogEntry};
use chrono::{DateTime, Utc};

impl AppState {
    pub async fn insert_log(&self, entry: &LogEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO logs
                (id, document_name, document_description, log_description, template_id,
                 status, method, json_payload, ref_number, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.document_name)
        .bind(&entry.document_description)
        .bind(&entry.log_description)
        .bind(&entry.template_id)
        .bind(&entry.status)
        .bind(&entry.method)
        .bind(&entry.json_payload)
        .bind(&entry.ref_number)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn insert_failed_generation(
        &self,
        record: &FailedGeneration,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO failed_generations
                (id, document_name, description, template_id, status, method,
                 json_payload, ref_number, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id)
        .bind(&record.document_name)
        .bind(&record.description)
        .bind(&record.template_id)
        .bind(&record.status)
        .bind(&record.method)
        .bind(&record.json_payload)
        .bind(&record.ref_number)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_all_logs(&self) -> Result<Vec<LogEntry>, sqlx::Error> {
        sqlx::query_as::<_, LogEntry>(
            "SELECT id, document_name, document_description, log_description, template_id,
                    status, method, json_payload, ref_number, created_at
             FROM logs ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete_all_logs(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM logs").execute(&self.pool).await?;

        Ok(())
    }

    pub async fn get_all_failed_generations(&self) -> Result<Vec<FailedGeneration>, sqlx::Error> {
        sqlx::query_as::<_, FailedGeneration>(
            "SELECT id, document_name, description, template_id, status, method,
                    json_payload, ref_number, created_at
             FROM failed_generations ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count_failed_generations_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM failed_generations WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
