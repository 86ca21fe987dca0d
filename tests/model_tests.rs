use autodocs_server::document::models::Document;
use autodocs_server::template::models::Template;
use uuid::Uuid;

#[test]
fn test_template_wire_names() {
    let template = Template::new("invoice".to_string(), "D250831-0002".to_string());
    let value = serde_json::to_value(&template).unwrap();

    assert_eq!(value["templateName"], "invoice");
    assert_eq!(value["refNumber"], "D250831-0002");
    assert_eq!(value["fileName"], template.id.to_string());
    assert!(value.get("createdAt").is_some());
    // not soft-deleted, so the marker is omitted entirely
    assert!(value.get("deletedAt").is_none());
}

#[test]
fn test_document_wire_names() {
    let id = Uuid::new_v4();
    let document = Document::new(
        id,
        "Invoice for Acme".to_string(),
        Uuid::new_v4(),
        r#"{"customer":"Acme"}"#.to_string(),
        "D250831-0003".to_string(),
    );
    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(value["documentName"], id.to_string());
    assert_eq!(value["description"], "Invoice for Acme");
    assert_eq!(value["refNumber"], "D250831-0003");
    assert_eq!(value["jsonPayload"], r#"{"customer":"Acme"}"#);
    assert!(value.get("templateId").is_some());
}

#[test]
fn test_template_roundtrip() {
    let template = Template::new("invoice".to_string(), "D250831-0002".to_string());
    let json = serde_json::to_string(&template).unwrap();
    let back: Template = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id, template.id);
    assert_eq!(back.name, template.name);
    assert_eq!(back.ref_number, template.ref_number);
}
