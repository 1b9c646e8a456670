// Utility functions for document processing

pub mod file_utils;

pub use file_utils::{ensure_dir_exists, find_documents, DocumentEntry};
