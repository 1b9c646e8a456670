// Plain text extractor
use crate::document_processing::error::ExtractionError;
use std::fs;
use std::path::Path;

pub struct TxtExtractor;

impl TxtExtractor {
    /// Extract text from a plain text file
    ///
    /// The file is decoded as UTF-8 and returned unmodified. Bytes that are
    /// not valid UTF-8 fail as an I/O error, like a missing file does.
    pub fn extract(txt_path: impl AsRef<Path>) -> Result<String, ExtractionError> {
        let txt_path = txt_path.as_ref();

        fs::read_to_string(txt_path).map_err(|e| ExtractionError::io(txt_path, e))
    }
}
