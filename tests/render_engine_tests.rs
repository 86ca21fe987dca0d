use std::process::Command;

use autodocs_server::render::{self, RenderError};

fn converter_available() -> bool {
    Command::new("wkhtmltopdf")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

#[test]
fn test_html_to_pdf_output_or_missing_binary() {
    let result = render::html_to_pdf("<html><body><h1>Invoice</h1></body></html>");

    if converter_available() {
        // With the converter installed the output is a real PDF.
        let pdf = result.unwrap();
        assert!(!pdf.is_empty());
        assert!(pdf.starts_with(b"%PDF"));
    } else {
        // Without it the failure surfaces as a converter error, never a panic.
        match result {
            Err(RenderError::ConverterIo(_)) | Err(RenderError::ConverterExit(_)) => {}
            Err(other) => panic!("unexpected error without converter: {:?}", other),
            Ok(_) => panic!("conversion succeeded without a converter binary"),
        }
    }
}
