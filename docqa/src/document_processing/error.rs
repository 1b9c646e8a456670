// Error type shared by every extractor

use std::path::{Path, PathBuf};

/// Failure of a single extraction call.
///
/// All three kinds are terminal for the current request; nothing in this
/// crate retries them.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The file extension is not one of `txt`, `pdf`, `docx`, `xlsx`.
    #[error("Unsupported file type: '.{extension}'")]
    UnsupportedFormat { extension: String },

    /// The file could not be opened, read, or decoded as text.
    #[error("Failed to read {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The container is malformed, encrypted, or otherwise unreadable.
    #[error("Failed to parse {path}: {cause}", path = .path.display())]
    Parse { path: PathBuf, cause: String },
}

impl ExtractionError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, cause: impl ToString) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            cause: cause.to_string(),
        }
    }

    /// Path of the document that failed, if the failure got as far as I/O.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::UnsupportedFormat { .. } => None,
            Self::Io { path, .. } | Self::Parse { path, .. } => Some(path),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}

impl serde::Serialize for ExtractionError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
