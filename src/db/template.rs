//! Template database operations

use super::AppState;
use crate::template::models::Template;
use chrono::{DateTime, Utc};
use uuid::Uuid;

impl AppState {
    pub async fn insert_template(&self, template: &Template) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO templates (id, name, ref_number, file_name, created_at, deleted_at)
             VALUES ($1, $2, $3, $4, $5, NULL)
            "#,
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.ref_number)
        .bind(&template.file_name)
        .bind(template.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_template_by_ref(
        &self,
        ref_number: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        sqlx::query_as::<_, Template>(
            "SELECT id, name, ref_number, file_name, created_at, deleted_at
             FROM templates WHERE ref_number = $1 AND deleted_at IS NULL",
        )
        .bind(ref_number)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_all_templates(&self) -> Result<Vec<Template>, sqlx::Error> {
        sqlx::query_as::<_, Template>(
            "SELECT id, name, ref_number, file_name, created_at, deleted_at
             FROM templates WHERE deleted_at IS NULL ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn soft_delete_template(&self, id: &Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE templates SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count_templates_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM templates
             WHERE created_at >= $1 AND created_at < $2 AND deleted_at IS NULL",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
