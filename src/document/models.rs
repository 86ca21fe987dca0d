use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A generated document. The rendered PDF lives in the `pdfs` bucket keyed
/// by `id`; this row carries the metadata and the input-data snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow, ToSchema)]
pub struct Document {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[serde(rename = "documentName")]
    pub document_name: String,
    #[schema(example = "Invoice for Acme")]
    pub description: String,
    #[serde(rename = "templateId")]
    pub template_id: Uuid,
    #[serde(rename = "jsonPayload")]
    pub json_payload: String,
    #[schema(example = "D250831-0003")]
    #[serde(rename = "refNumber")]
    pub ref_number: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "deletedAt", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(
        id: Uuid,
        description: String,
        template_id: Uuid,
        json_payload: String,
        ref_number: String,
    ) -> Self {
        Self {
            id,
            document_name: id.to_string(),
            description,
            template_id,
            json_payload,
            ref_number,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }
}

/// Body of `POST /generate`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    #[schema(example = "D250831-0002")]
    #[serde(rename = "refNumber")]
    pub ref_number: String,
    #[schema(example = "Invoice for Acme")]
    #[serde(default)]
    pub description: String,
    #[schema(value_type = Object, example = json!({"customer": "Acme"}))]
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Success payload of `POST /generate`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerationResponse {
    #[schema(example = "D250831-0003")]
    #[serde(rename = "refNumber")]
    pub ref_number: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
