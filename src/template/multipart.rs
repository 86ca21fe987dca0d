use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures::StreamExt;
use sanitize_filename::sanitize;

use crate::ErrorResponse;

#[derive(Debug)]
pub struct ParsedTemplateUpload {
    pub template_bytes: Vec<u8>,
    pub original_filename: String,
    pub display_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MultipartParseError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid UTF-8 data: {0}")]
    Utf8Error(String),
    #[error("Failed to retrieve file: no 'template' field in form")]
    MissingFile,
}

impl From<MultipartParseError> for HttpResponse {
    fn from(error: MultipartParseError) -> Self {
        match error {
            MultipartParseError::IoError(_) => HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("{}", error))),
            _ => HttpResponse::BadRequest().json(ErrorResponse::new(format!("{}", error))),
        }
    }
}

pub struct TemplateMultipart;

impl TemplateMultipart {
    /// Parse the `/upload-template` form: a `template` file field plus a
    /// `name` text field. The template must be valid UTF-8; the display
    /// name falls back to the uploaded file name when the form omits it.
    pub async fn parse(
        mut multipart: Multipart,
    ) -> Result<ParsedTemplateUpload, MultipartParseError> {
        let mut template_bytes: Option<Vec<u8>> = None;
        let mut original_filename = String::new();
        let mut display_name: Option<String> = None;

        while let Some(item) = multipart.next().await {
            let mut field = item.map_err(|e| MultipartParseError::FieldError(e.to_string()))?;
            // Copied out before streaming; the disposition borrows the field.
            let (field_name, filename) = {
                let content_disposition = field.content_disposition().ok_or_else(|| {
                    MultipartParseError::FieldError("Content disposition not found".to_string())
                })?;
                let name = content_disposition.get_name().ok_or_else(|| {
                    MultipartParseError::FieldError("Field name not found".to_string())
                })?;
                (
                    name.to_string(),
                    content_disposition.get_filename().map(sanitize),
                )
            };

            match field_name.as_str() {
                "template" => {
                    if let Some(filename) = filename {
                        original_filename = filename;
                    }

                    let mut buffer = Vec::new();
                    while let Some(chunk) = field.next().await {
                        let data = chunk.map_err(|e| MultipartParseError::IoError(e.to_string()))?;
                        buffer.extend_from_slice(&data);
                    }
                    // Template sources must be UTF-8 text; previews return
                    // them verbatim as a string, so anything else would come
                    // back corrupted.
                    let text = String::from_utf8(buffer)
                        .map_err(|e| MultipartParseError::Utf8Error(e.to_string()))?;
                    template_bytes = Some(text.into_bytes());
                }
                "name" => {
                    let mut bytes = Vec::new();
                    while let Some(chunk) = field.next().await {
                        let data = chunk.map_err(|e| MultipartParseError::IoError(e.to_string()))?;
                        bytes.extend_from_slice(&data);
                    }
                    let value = String::from_utf8(bytes)
                        .map_err(|e| MultipartParseError::Utf8Error(e.to_string()))?;
                    display_name = Some(value);
                }
                _ => {
                    continue;
                }
            }
        }

        let template_bytes = template_bytes.ok_or(MultipartParseError::MissingFile)?;
        let display_name = display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| original_filename.clone());

        Ok(ParsedTemplateUpload {
            template_bytes,
            original_filename,
            display_name,
        })
    }
}
