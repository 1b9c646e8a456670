// Document Processing Module
//
// Turns an uploaded document into the plain text handed to the
// question-answering prompt.
//
// Main components:
// - format: extension to format mapping and extractor selection
// - extractors: plain text, PDF, DOCX and XLSX extraction
// - observer: start/success/failure callbacks (tracing, recent-event log)
// - error: the unsupported / I/O / parse failure kinds
// - utils: data directory helpers
//
// Usage:
//   1. Pick an extractor with select_extractor, or let ExtractionDispatcher do it
//   2. Run it on a fully written file
//   3. Use the returned text as context for the model
//
// Extraction is a pure function of the file contents: nothing is cached and
// no state survives between calls.

pub mod error;
pub mod extractors;
pub mod format;
pub mod observer;
pub mod utils;

// Re-export commonly used types
pub use error::ExtractionError;
pub use extractors::{DocxExtractor, PdfExtractor, TxtExtractor, XlsxExtractor, NO_TEXT_CONTENT};
pub use format::{select_extractor, Extractor, FormatKind};
pub use observer::{
    EventLevel, ExtractionEvent, ExtractionObserver, NoopObserver, RecentLog, TracingObserver,
    DEFAULT_RECENT_CAPACITY,
};
pub use utils::{ensure_dir_exists, find_documents, DocumentEntry};

use std::path::Path;
use std::sync::Arc;

/// Extract the text of `path` with the extractor its extension selects.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String, ExtractionError> {
    let path = path.as_ref();
    select_extractor(path)?.extract(path)
}

/// Extraction entry point for a hosting application
///
/// Same behaviour as [`extract_text`], with an observer notified around each
/// call. The dispatcher holds no other state and can be shared freely.
#[derive(Clone)]
pub struct ExtractionDispatcher {
    observer: Arc<dyn ExtractionObserver>,
}

impl ExtractionDispatcher {
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }

    pub fn with_observer(observer: impl ExtractionObserver + 'static) -> Self {
        Self {
            observer: Arc::new(observer),
        }
    }

    pub fn extract(&self, path: impl AsRef<Path>) -> Result<String, ExtractionError> {
        let path = path.as_ref();

        let extractor = match select_extractor(path) {
            Ok(extractor) => extractor,
            Err(e) => {
                self.observer.on_failure(path, &e);
                return Err(e);
            }
        };

        let kind = extractor.kind();
        self.observer.on_start(path, kind);

        match extractor.extract(path) {
            Ok(text) => {
                self.observer.on_success(path, kind, &text);
                Ok(text)
            }
            Err(e) => {
                self.observer.on_failure(path, &e);
                Err(e)
            }
        }
    }
}

impl Default for ExtractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
