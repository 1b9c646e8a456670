// File utilities for document processing

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use crate::document_processing::format::FormatKind;

/// A file in the data directory that one of the extractors can read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    pub path: PathBuf,
    pub kind: FormatKind,
}

/// Find every supported document under `base_dir`, sorted by path
///
/// Only the directory itself is scanned unless `recursive` is set.
/// Unreadable entries are skipped.
pub fn find_documents(base_dir: impl AsRef<Path>, recursive: bool) -> Result<Vec<DocumentEntry>> {
    let base_dir = base_dir.as_ref();

    if !base_dir.is_dir() {
        anyhow::bail!("Not a directory: {}", base_dir.display());
    }

    let mut walker = WalkDir::new(base_dir).follow_links(true).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut documents: Vec<DocumentEntry> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let kind = FormatKind::from_path(entry.path());
            kind.is_supported().then(|| DocumentEntry {
                path: entry.into_path(),
                kind,
            })
        })
        .collect();

    documents.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(documents)
}

/// Create directory if it doesn't exist
pub fn ensure_dir_exists(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}
