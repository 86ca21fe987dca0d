use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Outcome of a pipeline decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Success,
    Failed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Success => "SUCCESS",
            RequestStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// One append-only audit entry. Every terminal pipeline branch writes
/// exactly one of these.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow, ToSchema)]
pub struct LogEntry {
    pub id: Uuid,
    #[serde(rename = "documentName")]
    pub document_name: String,
    #[serde(rename = "documentDescription")]
    pub document_description: String,
    #[serde(rename = "logDescription")]
    pub log_description: String,
    #[serde(rename = "templateId")]
    pub template_id: String,
    #[schema(example = "SUCCESS")]
    pub status: String,
    #[schema(example = "POST")]
    pub method: String,
    #[serde(rename = "jsonPayload")]
    pub json_payload: String,
    #[serde(rename = "refNumber")]
    pub ref_number: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Failure record written alongside the FAILED log entry on generation
/// failure paths. Retained for metrics, never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow, ToSchema)]
pub struct FailedGeneration {
    pub id: Uuid,
    #[serde(rename = "documentName")]
    pub document_name: String,
    pub description: String,
    #[serde(rename = "templateId")]
    pub template_id: String,
    #[schema(example = "FAILED")]
    pub status: String,
    #[schema(example = "POST")]
    pub method: String,
    #[serde(rename = "jsonPayload")]
    pub json_payload: String,
    #[serde(rename = "refNumber")]
    pub ref_number: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Descriptor handed to the audit recorder by each terminal branch.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub status: RequestStatus,
    pub method: RequestMethod,
    pub document_name: String,
    pub document_description: String,
    pub log_description: String,
    pub template_id: String,
    pub json_payload: String,
    pub ref_number: String,
}

impl AuditOutcome {
    pub fn new(status: RequestStatus, method: RequestMethod, log_description: &str) -> Self {
        Self {
            status,
            method,
            document_name: String::new(),
            document_description: String::new(),
            log_description: log_description.to_string(),
            template_id: String::new(),
            json_payload: String::new(),
            ref_number: String::new(),
        }
    }

    pub fn document_name(mut self, value: &str) -> Self {
        self.document_name = value.to_string();
        self
    }

    pub fn document_description(mut self, value: &str) -> Self {
        self.document_description = value.to_string();
        self
    }

    pub fn template_id(mut self, value: &str) -> Self {
        self.template_id = value.to_string();
        self
    }

    pub fn json_payload(mut self, value: &str) -> Self {
        self.json_payload = value.to_string();
        self
    }

    pub fn ref_number(mut self, value: &str) -> Self {
        self.ref_number = value.to_string();
        self
    }

    pub fn into_log_entry(self) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            document_name: self.document_name,
            document_description: self.document_description,
            log_description: self.log_description,
            template_id: self.template_id,
            status: self.status.as_str().to_string(),
            method: self.method.as_str().to_string(),
            json_payload: self.json_payload,
            ref_number: self.ref_number,
            created_at: Utc::now(),
        }
    }

    pub fn into_failed_generation(self) -> FailedGeneration {
        FailedGeneration {
            id: Uuid::new_v4(),
            document_name: self.document_name,
            description: self.document_description,
            template_id: self.template_id,
            status: RequestStatus::Failed.as_str().to_string(),
            method: self.method.as_str().to_string(),
            json_payload: self.json_payload,
            ref_number: self.ref_number,
            created_at: Utc::now(),
        }
    }
}
