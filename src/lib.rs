use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod audit;
pub mod db;
pub mod document;
pub mod refnum;
pub mod render;
pub mod report;
pub mod storage;
pub mod template;

pub use crate::db::AppState;

/// Success envelope: `{code, data, timestamp}`.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::at(data, Utc::now())
    }

    /// Some endpoints echo a record's own timestamp rather than "now".
    pub fn at(data: T, timestamp: DateTime<Utc>) -> Self {
        Self {
            code: 200,
            data,
            timestamp,
        }
    }
}

/// Success envelope for operations that report a message instead of data.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub code: u16,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            code: 200,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Error body for 400/404/500 responses. Dependency errors surface their
/// underlying message text here verbatim.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::template::handlers::upload_template,
            crate::template::handlers::get_templates,
            crate::template::handlers::preview_template,
            crate::template::handlers::delete_template,
            crate::document::handlers::generate_document,
            crate::document::handlers::get_documents,
            crate::document::handlers::preview_document,
            crate::document::handlers::delete_document,
            crate::audit::handlers::get_logs,
            crate::audit::handlers::delete_all_logs,
            crate::audit::handlers::get_failed_generations,
            crate::report::handlers::document_history,
            crate::report::handlers::range_metrics
        ),
        components(
            schemas(
                template::models::Template,
                document::models::Document,
                document::models::GenerateRequest,
                document::models::GenerationResponse,
                audit::models::LogEntry,
                audit::models::FailedGeneration,
                report::models::HistoryEntry,
                report::models::RangeMetrics,
                report::handlers::HistoryResponse,
                report::handlers::RangeMetricsResponse,
                template::handlers::UploadResponse,
                MessageResponse,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Templates", description = "Template upload, preview and deletion."),
            (name = "Documents", description = "PDF generation, preview and deletion."),
            (name = "Audit", description = "Audit log and failed-generation records."),
            (name = "Reports", description = "Document history and range metrics.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok();
    let app_state = match AppState::new().await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!(
                "Failed to initialize application state. Check DB_* and OBJECT_STORE_* in .env. Error: {}",
                e
            );
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("autodocs_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_LENGTH])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::resource("/upload-template")
                    .route(web::post().to(template::handlers::upload_template)),
            )
            .service(
                web::resource("/generate")
                    .route(web::post().to(document::handlers::generate_document)),
            )
            .service(
                web::resource("/documents").route(web::get().to(document::handlers::get_documents)),
            )
            .service(
                web::resource("/templates").route(web::get().to(template::handlers::get_templates)),
            )
            .service(
                web::resource("/document-history")
                    .route(web::get().to(report::handlers::document_history)),
            )
            .service(
                web::resource("/logs")
                    .route(web::get().to(audit::handlers::get_logs))
                    .route(web::delete().to(audit::handlers::delete_all_logs)),
            )
            .service(
                web::resource("/failed-generations")
                    .route(web::get().to(audit::handlers::get_failed_generations)),
            )
            .service(
                web::resource("/metrics/range")
                    .route(web::get().to(report::handlers::range_metrics)),
            )
            .service(
                web::resource("/templates/preview/{ref_number}")
                    .route(web::get().to(template::handlers::preview_template)),
            )
            .service(
                web::resource("/documents/preview/{ref_number}")
                    .route(web::get().to(document::handlers::preview_document)),
            )
            .service(
                web::resource("/templates/{ref_number}")
                    .route(web::delete().to(template::handlers::delete_template)),
            )
            .service(
                web::resource("/documents/{ref_number}")
                    .route(web::delete().to(document::handlers::delete_document)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
