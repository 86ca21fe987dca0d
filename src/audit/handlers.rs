use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::audit::models::{AuditOutcome, RequestMethod, RequestStatus};
use crate::audit::recorder;
use crate::{ApiResponse, AppState, ErrorResponse, MessageResponse};

#[utoipa::path(
    tag = "Audit",
    get,
    path = "/logs",
    responses(
        (status = 200, description = "All audit log entries"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_logs(state: web::Data<AppState>) -> impl Responder {
    match state.get_all_logs().await {
        Ok(logs) => HttpResponse::Ok().json(ApiResponse::ok(logs)),
        Err(e) => {
            error!("Failed to fetch logs: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Error fetching logs"))
        }
    }
}

/// Administrative bulk delete of the audit trail.
#[utoipa::path(
    tag = "Audit",
    delete,
    path = "/logs",
    responses(
        (status = 200, description = "Logs deleted", body = MessageResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn delete_all_logs(state: web::Data<AppState>) -> impl Responder {
    if let Err(e) = state.delete_all_logs().await {
        error!("Failed to delete logs: {}", e);
        recorder::record(
            &state,
            AuditOutcome::new(RequestStatus::Failed, RequestMethod::Delete, "Error deleting logs"),
        )
        .await;
        return HttpResponse::InternalServerError().json(ErrorResponse::new("Error deleting logs"));
    }

    HttpResponse::Ok().json(MessageResponse::ok("Logs deleted successfully"))
}

#[utoipa::path(
    tag = "Audit",
    get,
    path = "/failed-generations",
    responses(
        (status = 200, description = "All failed-generation records"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_failed_generations(state: web::Data<AppState>) -> impl Responder {
    match state.get_all_failed_generations().await {
        Ok(records) => HttpResponse::Ok().json(ApiResponse::ok(records)),
        Err(e) => {
            error!("Failed to fetch failed generations: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Error fetching failed generations"))
        }
    }
}
