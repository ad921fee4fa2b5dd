//! Text extraction from resume files.

use std::path::Path;
use tracing::warn;

/// Source of plain text for a candidate file. The pipeline only depends on
/// this trait, so tests can substitute a stub.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> anyhow::Result<String>;
}

/// Extracts concatenated page text from a PDF, in page order.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> anyhow::Result<String> {
        let text = pdf_extract::extract_text(path)?;
        Ok(text)
    }
}

/// Soft-failure wrapper: an unreadable or unparsable file yields an empty
/// string so the run can continue, never an error.
pub fn extract_or_empty(extractor: &dyn TextExtractor, path: &Path) -> String {
    match extractor.extract(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("error reading {}: {:#}", path.display(), err);
            String::new()
        }
    }
}
