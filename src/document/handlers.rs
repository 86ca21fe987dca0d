use actix_web::{
    web::{self, Path},
    HttpResponse, Responder,
};
use base64::Engine;
use log::{error, info};
use uuid::Uuid;

use crate::audit::models::{AuditOutcome, RequestMethod, RequestStatus};
use crate::audit::recorder;
use crate::document::models::{Document, GenerateRequest, GenerationResponse};
use crate::render;
use crate::storage::{PDFS_BUCKET, TEMPLATES_BUCKET};
use crate::{ApiResponse, AppState, ErrorResponse, MessageResponse};

/// The generation pipeline. Every terminal branch writes exactly one audit
/// log entry; every failure branch additionally writes one failed-generation
/// record. Success writes one Document and no failed-generation record.
#[utoipa::path(
    tag = "Documents",
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Document generated", body = GenerationResponse),
        (status = 400, description = "Malformed request body or data payload", body = ErrorResponse),
        (status = 404, description = "Unknown template reference number", body = ErrorResponse),
        (status = 500, description = "Storage, renderer or database failure", body = ErrorResponse)
    )
)]
pub async fn generate_document(body: web::Bytes, state: web::Data<AppState>) -> impl Responder {
    let id = Uuid::new_v4();

    // Parsed by hand so malformed bodies still get failure bookkeeping.
    let request: GenerateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("Rejecting malformed generate request: {}", e);
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Post, "Invalid request")
                    .document_name(&id.to_string()),
            )
            .await;
            return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid request"));
        }
    };

    let template = match state.get_template_by_ref(&request.ref_number).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Post, "Template not found")
                    .document_name(&id.to_string())
                    .document_description(&request.description)
                    .ref_number(&request.ref_number),
            )
            .await;
            return HttpResponse::NotFound().json(ErrorResponse::new(format!(
                "Template not found for refNumber: {}",
                request.ref_number
            )));
        }
        Err(e) => {
            error!("Template lookup failed: {}", e);
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Post,
                    &format!("Error fetching template metadata: {}", e),
                )
                .document_name(&id.to_string())
                .document_description(&request.description)
                .ref_number(&request.ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching template: {}", e)));
        }
    };
    let template_id = template.id.to_string();

    let template_bytes = match state
        .storage
        .get_object(TEMPLATES_BUCKET, &template.file_name)
        .await
    {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Template download failed: {}", e);
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Post,
                    &format!("Error fetching template: {}", e),
                )
                .document_name(&id.to_string())
                .document_description(&request.description)
                .template_id(&template_id)
                .ref_number(&request.ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching template: {}", e)));
        }
    };

    // Canonical snapshot of the data payload, kept on the Document row and
    // every audit entry from here on.
    let json_snapshot = match serde_json::to_string(&request.data) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Post,
                    "Failed to serialize data payload",
                )
                .document_name(&id.to_string())
                .document_description(&request.description)
                .template_id(&template_id)
                .ref_number(&request.ref_number),
            )
            .await;
            return HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
                "Failed to convert data to JSON string: {}",
                e
            )));
        }
    };

    let mapping = match request.data.as_object() {
        Some(mapping) => mapping,
        None => {
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Post, "Invalid JSON data")
                    .document_name(&id.to_string())
                    .document_description(&request.description)
                    .template_id(&template_id)
                    .json_payload(&json_snapshot)
                    .ref_number(&request.ref_number),
            )
            .await;
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid JSON data: expected an object",
            ));
        }
    };

    let filled = render::fill_template(&String::from_utf8_lossy(&template_bytes), mapping);

    // The converter is a blocking subprocess; keep it off the async workers.
    let pdf_bytes = match web::block(move || render::html_to_pdf(&filled)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            error!("PDF conversion failed: {}", e);
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Post,
                    &format!("Error generating PDF: {}", e),
                )
                .document_name(&id.to_string())
                .document_description(&request.description)
                .template_id(&template_id)
                .json_payload(&json_snapshot)
                .ref_number(&request.ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error generating PDF: {}", e)));
        }
        Err(e) => {
            error!("PDF conversion task failed: {}", e);
            recorder::record_generation_failure(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Post,
                    "PDF conversion task failed",
                )
                .document_name(&id.to_string())
                .document_description(&request.description)
                .template_id(&template_id)
                .json_payload(&json_snapshot)
                .ref_number(&request.ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error generating PDF: {}", e)));
        }
    };

    if let Err(e) = state
        .storage
        .put_object(PDFS_BUCKET, &id.to_string(), &pdf_bytes, "application/pdf")
        .await
    {
        error!("PDF upload failed: {}", e);
        recorder::record_generation_failure(
            &state,
            AuditOutcome::new(
                RequestStatus::Failed,
                RequestMethod::Post,
                &format!("Error uploading PDF: {}", e),
            )
            .document_name(&id.to_string())
            .document_description(&request.description)
            .template_id(&template_id)
            .json_payload(&json_snapshot)
            .ref_number(&request.ref_number),
        )
        .await;
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::new(format!("Error uploading PDF: {}", e)));
    }

    // The document gets its own reference number, distinct from the
    // template's.
    let document_ref = state.ref_numbers.next();
    let document = Document::new(
        id,
        request.description.clone(),
        template.id,
        json_snapshot.clone(),
        document_ref,
    );

    if let Err(e) = state.insert_document(&document).await {
        error!("Document metadata insert failed: {}", e);
        // Blob first, metadata second; clean up the orphan blob on the
        // metadata failure as far as the store allows.
        if let Err(cleanup) = state.storage.delete_object(PDFS_BUCKET, &id.to_string()).await {
            error!("Orphan PDF blob left at pdfs/{}: {}", id, cleanup);
        }
        recorder::record_generation_failure(
            &state,
            AuditOutcome::new(
                RequestStatus::Failed,
                RequestMethod::Post,
                &format!("Error saving document metadata: {}", e),
            )
            .document_name(&id.to_string())
            .document_description(&request.description)
            .template_id(&template_id)
            .json_payload(&json_snapshot)
            .ref_number(&request.ref_number),
        )
        .await;
        return HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
            "Error saving document metadata in database: {}",
            e
        )));
    }

    recorder::record(
        &state,
        AuditOutcome::new(
            RequestStatus::Success,
            RequestMethod::Post,
            "Document generated successfully",
        )
        .document_name(&document.document_name)
        .document_description(&document.description)
        .template_id(&template_id)
        .json_payload(&document.json_payload)
        .ref_number(&document.ref_number),
    )
    .await;

    info!(
        "Document {} generated from template {} as {}",
        document.id, template.ref_number, document.ref_number
    );

    let created_at = document.created_at;
    HttpResponse::Ok().json(ApiResponse::at(
        GenerationResponse {
            ref_number: document.ref_number,
            created_at,
        },
        created_at,
    ))
}

#[utoipa::path(
    tag = "Documents",
    get,
    path = "/documents",
    responses(
        (status = 200, description = "All non-deleted documents"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_documents(state: web::Data<AppState>) -> impl Responder {
    match state.get_all_documents().await {
        Ok(documents) => HttpResponse::Ok().json(ApiResponse::ok(documents)),
        Err(e) => {
            error!("Failed to fetch documents: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Error fetching documents"))
        }
    }
}

#[utoipa::path(
    tag = "Documents",
    get,
    path = "/documents/preview/{ref_number}",
    params(("ref_number" = String, Path, description = "Document reference number")),
    responses(
        (status = 200, description = "Base64-encoded PDF"),
        (status = 404, description = "Unknown reference number", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn preview_document(
    ref_number: Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let ref_number = ref_number.into_inner();

    let document = match state.get_document_by_ref(&ref_number).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            recorder::record(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Get, "Document not found")
                    .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::NotFound().json(ErrorResponse::new("Document not found"));
        }
        Err(e) => {
            error!("Failed to look up document {}: {}", ref_number, e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Get,
                    "Error fetching document",
                )
                .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching document: {}", e)));
        }
    };

    let pdf_bytes = match state
        .storage
        .get_object(PDFS_BUCKET, &document.id.to_string())
        .await
    {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to download PDF blob: {}", e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Get,
                    &format!("Error fetching PDF: {}", e),
                )
                .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching PDF: {}", e)));
        }
    };

    let pdf_base64 = base64::engine::general_purpose::STANDARD.encode(&pdf_bytes);

    recorder::record(
        &state,
        AuditOutcome::new(RequestStatus::Success, RequestMethod::Get, "Document previewed")
            .document_name(&document.document_name)
            .document_description(&document.description)
            .template_id(&document.template_id.to_string())
            .ref_number(&ref_number),
    )
    .await;

    HttpResponse::Ok().json(ApiResponse::at(pdf_base64, document.created_at))
}

#[utoipa::path(
    tag = "Documents",
    delete,
    path = "/documents/{ref_number}",
    params(("ref_number" = String, Path, description = "Document reference number")),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 404, description = "Unknown reference number", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
pub async fn delete_document(
    ref_number: Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let ref_number = ref_number.into_inner();
    info!("Executing delete_document handler for {}", ref_number);

    let document = match state.get_document_by_ref(&ref_number).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            recorder::record(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Delete, "Document not found")
                    .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::NotFound().json(ErrorResponse::new("Document not found"));
        }
        Err(e) => {
            error!("Failed to look up document {}: {}", ref_number, e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Delete,
                    "Error fetching document",
                )
                .ref_number(&ref_number),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Error fetching document: {}", e)));
        }
    };

    // Perform the deletion first; the audit entry reflects the actual outcome.
    let outcome = async {
        state
            .storage
            .delete_object(PDFS_BUCKET, &document.id.to_string())
            .await
            .map_err(|e| format!("failed to delete document from storage: {}", e))?;
        state
            .soft_delete_document(&document.id)
            .await
            .map_err(|e| format!("failed to delete document metadata: {}", e))?;
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
                    "Document deleted successfully",
                )
                .document_name(&document.document_name)
                .document_description(&document.description)
                .template_id(&document.template_id.to_string())
                .ref_number(&ref_number),
            )
            .await;
            HttpResponse::Ok().json(MessageResponse::ok("Document deleted successfully"))
        }
        Err(e) => {
            error!("Failed to delete document {}: {}", ref_number, e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Delete,
                    "Failed to delete document",
                )
                .document_name(&document.document_name)
                .template_id(&document.template_id.to_string())
                .ref_number(&ref_number),
            )
            .await;
            HttpResponse::InternalServerError().json(ErrorResponse::new(e))
        }
    }
}
