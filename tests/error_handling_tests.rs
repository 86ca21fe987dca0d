use autodocs_server::{ApiResponse, ErrorResponse, MessageResponse};

#[test]
fn test_error_response_body_shape() {
    let error = ErrorResponse::new("Template not found");
    let value = serde_json::to_value(&error).unwrap();

    // Error bodies are exactly {"message": ...}
    assert_eq!(value["message"], "Template not found");
    assert_eq!(value.as_object().unwrap().len(), 1);
}

#[test]
fn test_error_response_carries_underlying_message() {
    let error = ErrorResponse::new(format!(
        "Error fetching template: {}",
        "storage download of templates/abc failed with status 503"
    ));
    assert!(error.message.contains("status 503"));
}

#[test]
fn test_api_response_envelope_shape() {
    let response = ApiResponse::ok(vec!["a", "b"]);
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["code"], 200);
    assert_eq!(value["data"].as_array().unwrap().len(), 2);
    assert!(value.get("timestamp").is_some());
}

#[test]
fn test_message_response_envelope_shape() {
    let response = MessageResponse::ok("Document deleted successfully");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["code"], 200);
    assert_eq!(value["message"], "Document deleted successfully");
    assert!(value.get("timestamp").is_some());
}

#[test]
fn test_multipart_error_status_mapping() {
    use actix_web::HttpResponse;
    use autodocs_server::template::multipart::MultipartParseError;

    let missing: HttpResponse = MultipartParseError::MissingFile.into();
    assert_eq!(missing.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let io: HttpResponse = MultipartParseError::IoError("disk full".to_string()).into();
    assert_eq!(io.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_error_response_deserializes() {
    let parsed: ErrorResponse = serde_json::from_str(r#"{"message": "Invalid request"}"#).unwrap();
    assert_eq!(parsed.message, "Invalid request");
}
