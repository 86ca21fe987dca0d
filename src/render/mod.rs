//! Template filling and PDF conversion.
//!
//! `fill_template` substitutes `{{field}}` placeholders in an HTML template
//! with values from the request's JSON data; `engine` hands the filled HTML
//! to the external converter binary.

pub mod engine;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use thiserror::Error;

pub use engine::html_to_pdf;

/// Errors from the PDF conversion step.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write HTML source: {0}")]
    WriteHtml(#[source] std::io::Error),
    #[error("wkhtmltopdf execution failed: {0}")]
    ConverterIo(#[source] std::io::Error),
    #[error("wkhtmltopdf exited with status {0}")]
    ConverterExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

lazy_static! {
    // {{field}} or {{.field}}, with optional whitespace and dotted paths.
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*\.?([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\s*\}\}").unwrap();
}

/// Fill an HTML template with values from a JSON object.
///
/// Dotted placeholder paths descend into nested objects. Undefined or
/// non-scalar fields render as the empty string; there is no strict-field
/// validation.
pub fn fill_template(template: &str, data: &Map<String, Value>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            lookup(data, &caps[1]).unwrap_or_default()
        })
        .into_owned()
}

fn lookup(data: &Map<String, Value>, path: &str) -> Option<String> {
    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod mod_tests;
