pub mod answer_key;
pub mod classify;
pub mod error;
pub mod extraction;
pub mod model;
pub mod normalize;
pub mod pattern;

use error::GabaritoError;
use extraction::PdfExtractor;
use model::{AnswerKeyResult, GridAnswerKey, StructureAnalysis};
use serde::{Deserialize, Serialize};

/// Structure classification paired with the extracted answer key.
///
/// This is the payload handed to downstream document-analysis consumers,
/// which treat both parts as read-only hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub structure: StructureAnalysis,
    pub answer_key: AnswerKeyResult,
}

/// Spreadsheet counterpart of [`DocumentAnalysis`]: the classifier runs
/// over the grid rendered as text, the extractor over the grid itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetAnalysis {
    pub structure: StructureAnalysis,
    pub answer_key: GridAnswerKey,
}

/// Main API entry point: classify raw extracted text and extract its
/// answer key in one pass.
///
/// Pure and total; failure modes (missing anchor, partial key) are fields
/// of the returned results, never errors.
pub fn analyze_text(raw_text: &str) -> DocumentAnalysis {
    let lines = normalize::normalize(raw_text);
    DocumentAnalysis {
        structure: classify::classify(&lines),
        answer_key: answer_key::extract(&lines),
    }
}

/// Classify and extract from a PDF through a text-extraction backend.
pub fn analyze_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<DocumentAnalysis, GabaritoError> {
    let text = extractor.extract_text(pdf_bytes)?;
    Ok(analyze_text(&text))
}

/// Classify and extract from an XLSX/XLS workbook.
pub fn analyze_spreadsheet(bytes: &[u8]) -> Result<SpreadsheetAnalysis, GabaritoError> {
    let grid = extraction::xlsx::read_grid(bytes)?;
    let text = extraction::xlsx::grid_to_text(&grid);
    let lines = normalize::normalize(&text);
    Ok(SpreadsheetAnalysis {
        structure: classify::classify(&lines),
        answer_key: answer_key::grid::extract_from_grid(&grid),
    })
}
