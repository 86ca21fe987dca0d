use actix_web::{web, HttpResponse, Responder};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::audit::models::{AuditOutcome, RequestMethod, RequestStatus};
use crate::audit::recorder;
use crate::report::models::{self, HistoryEntry, RangeMetrics};
use crate::{AppState, ErrorResponse};

/// History envelope; this endpoint carries no timestamp field.
#[derive(Serialize, ToSchema)]
pub struct HistoryResponse {
    pub code: u16,
    pub data: Vec<HistoryEntry>,
}

/// Metrics envelope; the timestamp sits inside `data` with the counts.
#[derive(Serialize, ToSchema)]
pub struct RangeMetricsResponse {
    pub code: u16,
    pub data: RangeMetrics,
}

#[utoipa::path(
    tag = "Reports",
    get,
    path = "/document-history",
    responses(
        (status = 200, description = "Documents per weekday for the current week", body = HistoryResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn document_history(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();

    // Current calendar week runs from the most recent Sunday.
    let days_from_sunday = now.weekday().num_days_from_sunday() as i64;
    let start_of_week = (now.date_naive() - Duration::days(days_from_sunday))
        .and_time(NaiveTime::MIN)
        .and_utc();

    let counts = match state.document_counts_since(start_of_week).await {
        Ok(counts) => counts,
        Err(e) => {
            error!("Failed to fetch document history: {}", e);
            recorder::record(
                &state,
                AuditOutcome::new(
                    RequestStatus::Failed,
                    RequestMethod::Get,
                    "Error fetching document history",
                ),
            )
            .await;
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Error fetching document history"));
        }
    };

    let current_day = weekday_name(now.weekday());
    let data = models::normalize_history(&counts, current_day);

    HttpResponse::Ok().json(HistoryResponse { code: 200, data })
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

#[utoipa::path(
    tag = "Reports",
    get,
    path = "/metrics/range",
    params(RangeQuery),
    responses(
        (status = 200, description = "Counts and rates for the date range", body = RangeMetricsResponse),
        (status = 400, description = "Invalid date", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn range_metrics(
    query: web::Query<RangeQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let start = match NaiveDate::parse_from_str(&query.start_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            recorder::record(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Get, "Invalid start date"),
            )
            .await;
            return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid start date"));
        }
    };
    let end = match NaiveDate::parse_from_str(&query.end_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            recorder::record(
                &state,
                AuditOutcome::new(RequestStatus::Failed, RequestMethod::Get, "Invalid end date"),
            )
            .await;
            return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid end date"));
        }
    };

    // Inclusive range: [start 00:00, end + 1 day 00:00).
    let range_start = start.and_time(NaiveTime::MIN).and_utc();
    let range_end = (end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();

    let total_templates = match state.count_templates_between(range_start, range_end).await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count templates: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Error fetching templates count"));
        }
    };

    let total_documents = match state.count_documents_between(range_start, range_end).await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count documents: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Error fetching documents count"));
        }
    };

    let failed_generations = match state
        .count_failed_generations_between(range_start, range_end)
        .await
    {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count failed generations: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Error fetching failed generations count"));
        }
    };

    let day_span = (end - start).num_days();
    let metrics = RangeMetrics {
        total_templates,
        total_documents,
        failed_generations,
        generation_rate: models::generation_rate(total_documents, day_span),
        failure_rate: models::failure_rate(failed_generations, total_documents),
        timestamp: Utc::now(),
    };

    HttpResponse::Ok().json(RangeMetricsResponse { code: 200, data: metrics })
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Sun => "Sunday",
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
    }
}
