// Extractors for different document formats

pub mod pdf;
pub mod txt;
pub mod docx;
pub mod xlsx;

pub use pdf::PdfExtractor;
pub use txt::TxtExtractor;
pub use docx::{DocxExtractor, NO_TEXT_CONTENT};
pub use xlsx::XlsxExtractor;
