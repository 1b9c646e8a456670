// PDF extraction module

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::document_processing::error::ExtractionError;

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the text layer of every page, in page order
    ///
    /// Each page contributes its text followed by a newline, the last page
    /// included. Pages without a text layer (scanned images) contribute only
    /// the newline.
    pub fn extract(pdf_path: impl AsRef<Path>) -> Result<String, ExtractionError> {
        let pdf_path = pdf_path.as_ref();

        let bytes = fs::read(pdf_path).map_err(|e| ExtractionError::io(pdf_path, e))?;

        let pages = Self::extract_pages(&bytes)
            .map_err(|cause| ExtractionError::parse(pdf_path, cause))?;

        Ok(Self::join_pages(&pages))
    }

    /// Extract text per page using pdf-extract crate
    ///
    /// pdf-extract panics on some malformed font programs; that is reported
    /// as a parse failure instead of unwinding into the caller.
    fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, String> {
        match panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        })) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(e.to_string()),
            Err(payload) => Err(Self::panic_message(payload.as_ref())),
        }
    }

    fn join_pages(pages: &[String]) -> String {
        let mut text = String::new();
        for page in pages {
            text.push_str(page.trim());
            text.push('\n');
        }
        text
    }

    fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        format!("PDF parser aborted: {}", detail)
    }
}
