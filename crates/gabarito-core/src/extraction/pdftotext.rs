use crate::error::GabaritoError;
use crate::extraction::PdfExtractor;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve the whitespace alignment of
/// answer-sheet columns.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, GabaritoError> {
        // pdftotext wants a file path, so round-trip through a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| GabaritoError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| GabaritoError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GabaritoError::PdftotextNotFound
                } else {
                    GabaritoError::Extraction(format!("pdftotext failed: {e}"))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(GabaritoError::PdftotextFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}
