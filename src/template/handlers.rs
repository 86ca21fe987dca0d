use actix_multipart::Multipart;
use actix_web::{
    web::{self, Path},
    HttpResponse, Responder,
};
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::Serialize;
use utoipa::ToSchema;

use crate::audit::models::{AuditOutcome, RequestMethod, RequestStatus};
use crate::audit::recorder;
use crate::storage::TEMPLATES_BUCKET;
use crate::template::models::Template;
use crate::template::multipart::TemplateMultipart;
use crate::{ApiResponse, AppState, ErrorResponse, MessageResponse};

/// Upload envelope. The timestamp key is `time` here, unlike the other
/// endpoints; the frontend depends on it.
#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub code: u16,
    pub data: Template,
    pub time: DateTime<Utc>,
}

#[derive(Debug, serde::Deserialize, ToSchema)]
pub struct UploadTemplateRequest {
    #[allow(unused)]
    pub template: Vec<u8>,
    #[allow(unused)]
    pub name: Option<String>,
}

#[utoipa::path(
    tag = "Templates",
    post,
    path = "/upload-template",
    request_body(content = inline(UploadTemplateRequest), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Template stored", body = UploadResponse),
        (status = 400, description = "Malformed multipart form", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
pub async fn upload_template(payload: Multipart, state: web::Data<AppState>) -> impl Responder {
    info!("Executing upload_template handler");

    let upload = match TemplateMultipart::parse(payload).await {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Failed to parse template upload: {}", e);
            return HttpResponse::from(e);
        }
    };

    let ref_number = state.ref_numbers.next();
    let template = Template::new(upload.display_name, ref_number);

    if let Err(e) = state
        .storage
        .put_object(
            TEMPLATES_BUCKET,
            &template.file_name,
            &upload.template_bytes,
            "text/html",
        )
        .await
    {
        error!("Failed to upload template blob: {}", e);
        return HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
            "Error uploading template file: {}",
            e
        )));
    }

    if let Err(e) = state.insert_template(&template).await {
        error!("Failed to insert template metadata: {}", e);
        return HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
            "Error saving template metadata: {}",
            e
        )));
    }

    recorder::record(
        &state,
        AuditOutcome::new(
            RequestStatus::Success,
            RequestMethod::Post,
            "Template uploaded",
        )
        .document_name(&template.name)
        .template_id(&template.id.to_string())
        .ref_number(&template.ref_number),
    )
    .await;

    info!(
        "Template '{}' stored with refNumber {}",
        template.name, template.ref_number
    );

    let time = template.created_at;
    HttpResponse::Ok().json(UploadResponse {
        code: 200,
        data: template,
        time,
    })
}

#[utoipa::path(
    tag = "Templates",
    get,
    path = "/templates",
    responses(
        (status = 200, description = "All non-deleted templates"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_templates(state: web::Data<AppState>) -> impl Responder {
    match state.get_all_templates().await {
        Ok(templates) => HttpResponse::Ok().json(ApiResponse::ok(templates)),
        Err(e) => {
            error!("Failed to fetch templates: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Error fetching templates"))
        }
    }
}

#[utoipa::path(
    tag = "Templates",
    get,
    path = "/templates/preview/{ref_number}",
    params(("ref_number" = String, Path, description = "Template reference number")),
    responses(
        (status = 200, description = "Template source"),
        (status = 404, description = "Unknown reference number", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn preview_template(
    ref_number: Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let ref_number = ref_number.into_inner();

    let template = match state.get_template_by_ref(&ref_number).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            recorder::record(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Get, "Template not found")
                    .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::NotFound().json(ErrorResponse::new("Template not found"));
        }
        Err(e) => {
            error!("Failed to look up template {}: {}", ref_number, e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Get,
                    "Error fetching template",
                )
                .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching template: {}", e)));
        }
    };

    let template_bytes = match state
        .storage
        .get_object(TEMPLATES_BUCKET, &template.file_name)
        .await
    {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to download template blob: {}", e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Get,
                    "Error fetching template",
                )
                .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching template: {}", e)));
        }
    };

    // Template sources are validated as UTF-8 at upload, so this returns
    // the stored bytes verbatim.
    let body = String::from_utf8_lossy(&template_bytes).into_owned();
    HttpResponse::Ok().json(ApiResponse::at(body, template.created_at))
}

#[utoipa::path(
    tag = "Templates",
    delete,
    path = "/templates/{ref_number}",
    params(("ref_number" = String, Path, description = "Template reference number")),
    responses(
        (status = 200, description = "Template deleted", body = MessageResponse),
        (status = 404, description = "Unknown reference number", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
pub async fn delete_template(
    ref_number: Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let ref_number = ref_number.into_inner();
    info!("Executing delete_template handler for {}", ref_number);

    let template = match state.get_template_by_ref(&ref_number).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            recorder::record(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Delete, "Template not found")
                    .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::NotFound().json(ErrorResponse::new("Template not found"));
        }
        Err(e) => {
            error!("Failed to look up template {}: {}", ref_number, e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Delete,
                    "Error fetching template",
                )
                .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching template: {}", e)));
        }
    };

    // Perform the deletion first; the audit entry reflects the actual outcome.
    let outcome = async {
        state
            .storage
            .delete_object(TEMPLATES_BUCKET, &template.file_name)
            .await
            .map_err(|e| format!("failed to delete template from storage: {}", e))?;
        state
            .soft_delete_template(&template.id)
            .await
            .map_err(|e| format!("failed to delete template metadata: {}", e))?;
        Ok::<(), String>(())
    }
    .await;

    match outcome {
        Ok(()) => {
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Success,
                    RequestMethod::Delete,
                    "Template deleted successfully",
                )
                .document_name(&template.name)
                .template_id(&template.id.to_string())
                .ref_number(&ref_number),
            )
            .await;
            HttpResponse::Ok().json(MessageResponse::ok("Template deleted successfully"))
        }
        Err(e) => {
            error!("Failed to delete template {}: {}", ref_number, e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Delete,
                    "Failed to delete template",
                )
                .template_id(&template.id.to_string())
                .ref_number(&ref_number),
            )
            .await;
            HttpResponse::InternalServerError().json(ErrorResponse::new(e))
        }
    }
}
