use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// An uploaded HTML template. The raw source lives in the `templates`
/// bucket under `file_name`; this row is the metadata half.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow, ToSchema)]
pub struct Template {
    #[schema(example = "a1b2c3d4-e5f6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[schema(example = "invoice")]
    #[serde(rename = "templateName")]
    pub name: String,
    #[schema(example = "D250831-0002")]
    #[serde(rename = "refNumber")]
    pub ref_number: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "deletedAt", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Template {
    pub fn new(name: String, ref_number: String) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            name,
            ref_number,
            // the object key in the templates bucket is the record id
            file_name: id.to_string(),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }
}
