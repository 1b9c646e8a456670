// In docqa/src/lib.rs

// Re-export modules to be accessible from the CLI harness
pub mod config;
pub mod document_processing;

pub use config::DocQaConfig;
pub use document_processing::{
    extract_text, select_extractor, ExtractionDispatcher, ExtractionError, ExtractionObserver,
    Extractor, FormatKind,
};
