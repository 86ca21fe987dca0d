//! PDF conversion engine.
//!
//! Writes the filled HTML to a scratch directory, invokes the `wkhtmltopdf`
//! binary, and reads the resulting PDF back. The converter is an external
//! process; a non-zero exit is surfaced as a terminal error for the request.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

use super::RenderError;

const INPUT_FILE: &str = "document.html";
const OUTPUT_FILE: &str = "document.pdf";

/// Convert HTML bytes into PDF bytes.
pub fn html_to_pdf(html: &str) -> Result<Vec<u8>, RenderError> {
    let scratch = tempdir().map_err(RenderError::TempDir)?;
    let input_path = scratch.path().join(INPUT_FILE);
    let output_path = scratch.path().join(OUTPUT_FILE);

    fs::write(&input_path, html).map_err(RenderError::WriteHtml)?;

    let status = Command::new("wkhtmltopdf")
        .arg("--quiet")
        .arg(&input_path)
        .arg(&output_path)
        .current_dir(scratch.path())
        .status()
        .map_err(RenderError::ConverterIo)?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Err(RenderError::ConverterExit(code));
    }

    fs::read(&output_path).map_err(RenderError::ReadPdf)
}
