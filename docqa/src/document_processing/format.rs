// Extension-based format detection and extractor selection

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::error::ExtractionError;
use super::extractors::{DocxExtractor, PdfExtractor, TxtExtractor, XlsxExtractor};

/// The closed set of document formats, derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    PlainText,
    Pdf,
    WordProcessor,
    Spreadsheet,
    Unsupported,
}

impl FormatKind {
    /// Map a bare extension (no leading dot, any case) to a format.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            "docx" => Self::WordProcessor,
            "xlsx" => Self::Spreadsheet,
            _ => Self::Unsupported,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::from_extension(&extension_of(path.as_ref()))
    }

    /// Canonical extension of a supported format.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::PlainText => Some("txt"),
            Self::Pdf => Some("pdf"),
            Self::WordProcessor => Some("docx"),
            Self::Spreadsheet => Some("xlsx"),
            Self::Unsupported => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self != Self::Unsupported
    }

    pub fn extractor(self) -> Option<Extractor> {
        match self {
            Self::PlainText => Some(Extractor::PlainText),
            Self::Pdf => Some(Extractor::Pdf),
            Self::WordProcessor => Some(Extractor::WordProcessor),
            Self::Spreadsheet => Some(Extractor::Spreadsheet),
            Self::Unsupported => None,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlainText => "text",
            Self::Pdf => "pdf",
            Self::WordProcessor => "word",
            Self::Spreadsheet => "spreadsheet",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// A strategy able to turn one supported format into plain text.
///
/// Unlike [`FormatKind`] this has no `Unsupported` case, so holding an
/// `Extractor` means the format is known to be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    PlainText,
    Pdf,
    WordProcessor,
    Spreadsheet,
}

impl Extractor {
    pub fn kind(self) -> FormatKind {
        match self {
            Self::PlainText => FormatKind::PlainText,
            Self::Pdf => FormatKind::Pdf,
            Self::WordProcessor => FormatKind::WordProcessor,
            Self::Spreadsheet => FormatKind::Spreadsheet,
        }
    }

    /// Run the format-specific extraction on `path`.
    pub fn extract(self, path: impl AsRef<Path>) -> Result<String, ExtractionError> {
        let path = path.as_ref();
        match self {
            Self::PlainText => TxtExtractor::extract(path),
            Self::Pdf => PdfExtractor::extract(path),
            Self::WordProcessor => DocxExtractor::extract(path),
            Self::Spreadsheet => XlsxExtractor::extract(path),
        }
    }
}

/// Pick the extractor for `path` from its extension. Performs no I/O.
pub fn select_extractor(path: impl AsRef<Path>) -> Result<Extractor, ExtractionError> {
    let extension = extension_of(path.as_ref());
    FormatKind::from_extension(&extension)
        .extractor()
        .ok_or(ExtractionError::UnsupportedFormat { extension })
}

/// Lower-cased text after the last `.` of the file name, or `""`.
pub(crate) fn extension_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}
