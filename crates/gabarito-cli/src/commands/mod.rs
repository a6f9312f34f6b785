pub mod analyze;
pub mod extract;

use gabarito_core::error::GabaritoError;
use gabarito_core::extraction::pdftotext::PdftotextExtractor;
use gabarito_core::extraction::{sniff_format, InputFormat};
use gabarito_core::{DocumentAnalysis, SpreadsheetAnalysis};
use std::path::Path;

/// Full analysis of either input family.
pub enum LoadedAnalysis {
    Document(DocumentAnalysis),
    Spreadsheet(SpreadsheetAnalysis),
}

/// Read a file and run the full analysis.
///
/// Dispatches on the file extension; inputs without a recognized
/// extension are sniffed by magic bytes, and anything else is treated as
/// plain extracted text.
pub fn analyze_input(path: &Path) -> Result<LoadedAnalysis, GabaritoError> {
    let bytes = std::fs::read(path)?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => pdf(&bytes),
        Some("xlsx") | Some("xls") => spreadsheet(&bytes),
        _ => match sniff_format(&bytes) {
            Some(InputFormat::Pdf) => pdf(&bytes),
            Some(InputFormat::Spreadsheet) => spreadsheet(&bytes),
            None if bytes.contains(&0) => Err(GabaritoError::UnsupportedInput(
                path.display().to_string(),
            )),
            None => {
                let text = String::from_utf8_lossy(&bytes);
                Ok(LoadedAnalysis::Document(gabarito_core::analyze_text(&text)))
            }
        },
    }
}

fn pdf(bytes: &[u8]) -> Result<LoadedAnalysis, GabaritoError> {
    let extractor = PdftotextExtractor::new();
    Ok(LoadedAnalysis::Document(gabarito_core::analyze_pdf(
        bytes, &extractor,
    )?))
}

fn spreadsheet(bytes: &[u8]) -> Result<LoadedAnalysis, GabaritoError> {
    Ok(LoadedAnalysis::Spreadsheet(
        gabarito_core::analyze_spreadsheet(bytes)?,
    ))
}
