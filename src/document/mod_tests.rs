use crate::document::models::{Document, GenerateRequest};
use serde_json::json;
use uuid::Uuid;

#[test]
fn test_document_new() {
    let id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let document = Document::new(
        id,
        "Invoice for Acme".to_string(),
        template_id,
        r#"{"customer":"Acme"}"#.to_string(),
        "D250831-0003".to_string(),
    );

    // The document is named after its own id.
    assert_eq!(document.id, id);
    assert_eq!(document.document_name, id.to_string());
    assert_eq!(document.description, "Invoice for Acme");
    assert_eq!(document.template_id, template_id);
    assert_eq!(document.ref_number, "D250831-0003");
    assert!(document.deleted_at.is_none());
}

#[test]
fn test_generate_request_full_body() {
    let body = json!({
        "refNumber": "D250831-0002",
        "description": "Invoice for Acme",
        "data": { "customer": "Acme" }
    });

    let request: GenerateRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.ref_number, "D250831-0002");
    assert_eq!(request.description, "Invoice for Acme");
    assert_eq!(request.data["customer"], "Acme");
}

#[test]
fn test_generate_request_defaults() {
    // description and data are optional; data defaults to an empty object
    // so templates still render (with empty fields).
    let request: GenerateRequest =
        serde_json::from_str(r#"{"refNumber": "D250831-0002"}"#).unwrap();

    assert_eq!(request.description, "");
    assert!(request.data.as_object().unwrap().is_empty());
}

#[test]
fn test_generate_request_missing_ref_number_is_rejected() {
    let result: Result<GenerateRequest, _> = serde_json::from_str(r#"{"data": {}}"#);
    assert!(result.is_err());
}

#[test]
fn test_generate_request_non_object_data_is_kept_for_later_validation() {
    // Parsing succeeds; the pipeline rejects non-object data at the decode
    // step with a client error.
    let request: GenerateRequest =
        serde_json::from_str(r#"{"refNumber": "D1", "data": [1, 2]}"#).unwrap();
    assert!(request.data.as_object().is_none());
}
