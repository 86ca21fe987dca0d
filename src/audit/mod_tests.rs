use crate::audit::models::{AuditOutcome, RequestMethod, RequestStatus};

#[test]
fn test_status_and_method_strings() {
    assert_eq!(RequestStatus::Success.as_str(), "SUCCESS");
    assert_eq!(RequestStatus::Failed.as_str(), "FAILED");
    assert_eq!(RequestMethod::Get.as_str(), "GET");
    assert_eq!(RequestMethod::Post.as_str(), "POST");
    assert_eq!(RequestMethod::Delete.as_str(), "DELETE");
}

#[test]
fn test_outcome_into_log_entry() {
    let entry = AuditOutcome::new(
        RequestStatus::Failed,
        RequestMethod::Post,
        "Template not found",
    )
    .document_name("doc-1")
    .document_description("Invoice")
    .template_id("tmpl-1")
    .json_payload(r#"{"customer":"Acme"}"#)
    .ref_number("D250831-0002")
    .into_log_entry();

    assert_eq!(entry.status, "FAILED");
    assert_eq!(entry.method, "POST");
    assert_eq!(entry.log_description, "Template not found");
    assert_eq!(entry.document_name, "doc-1");
    assert_eq!(entry.document_description, "Invoice");
    assert_eq!(entry.template_id, "tmpl-1");
    assert_eq!(entry.json_payload, r#"{"customer":"Acme"}"#);
    assert_eq!(entry.ref_number, "D250831-0002");
    assert!(!entry.id.is_nil());
}

#[test]
fn test_outcome_into_failed_generation_is_always_failed() {
    // Even a mislabelled outcome lands as FAILED in the failures table.
    let record = AuditOutcome::new(RequestStatus::Success, RequestMethod::Post, "whatever")
        .document_description("Invoice")
        .into_failed_generation();

    assert_eq!(record.status, "FAILED");
    assert_eq!(record.description, "Invoice");
    assert!(!record.id.is_nil());
}

#[test]
fn test_log_entry_and_failed_generation_get_distinct_ids() {
    let outcome = AuditOutcome::new(RequestStatus::Failed, RequestMethod::Post, "boom");
    let entry = outcome.clone().into_log_entry();
    let record = outcome.into_failed_generation();
    assert_ne!(entry.id, record.id);
}

#[test]
fn test_log_entry_wire_names() {
    let entry = AuditOutcome::new(RequestStatus::Success, RequestMethod::Get, "ok")
        .ref_number("D250831-0002")
        .into_log_entry();

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["refNumber"], "D250831-0002");
    assert_eq!(value["logDescription"], "ok");
    assert!(value.get("documentName").is_some());
    assert!(value.get("jsonPayload").is_some());
}
