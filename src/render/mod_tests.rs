use super::fill_template;
use serde_json::{json, Map, Value};

fn as_map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_fill_simple_placeholder() {
    let data = as_map(json!({ "customer": "Acme" }));
    let html = fill_template("<p>Hello {{customer}}</p>", &data);
    assert_eq!(html, "<p>Hello Acme</p>");
}

#[test]
fn test_fill_dot_prefixed_placeholder() {
    // Templates written for the old engine prefix fields with a dot.
    let data = as_map(json!({ "customer": "Acme" }));
    let html = fill_template("<p>Hello {{.customer}}</p>", &data);
    assert_eq!(html, "<p>Hello Acme</p>");
}

#[test]
fn test_missing_field_renders_empty() {
    let data = as_map(json!({ "customer": "Acme" }));
    let html = fill_template("<p>{{customer}} owes {{amount}}</p>", &data);
    assert_eq!(html, "<p>Acme owes </p>");
}

#[test]
fn test_nested_path() {
    let data = as_map(json!({ "invoice": { "number": 42, "paid": true } }));
    let html = fill_template("{{invoice.number}} / {{invoice.paid}}", &data);
    assert_eq!(html, "42 / true");
}

#[test]
fn test_whitespace_inside_braces() {
    let data = as_map(json!({ "name": "Acme" }));
    assert_eq!(fill_template("{{ name }}", &data), "Acme");
}

#[test]
fn test_non_scalar_field_renders_empty() {
    let data = as_map(json!({ "items": [1, 2, 3], "meta": { "a": 1 } }));
    assert_eq!(fill_template("{{items}}{{meta}}", &data), "");
}

#[test]
fn test_template_without_placeholders_unchanged() {
    let data = as_map(json!({}));
    let html = "<html><body><h1>Static</h1></body></html>";
    assert_eq!(fill_template(html, &data), html);
}

#[test]
fn test_null_field_renders_empty() {
    let data = as_map(json!({ "customer": null }));
    assert_eq!(fill_template("[{{customer}}]", &data), "[]");
}
