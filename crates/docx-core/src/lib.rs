//! DOCX Core - Low-level DOCX archive handling
//!
//! This crate provides functionality for:
//! - Opening `.docx` files (OOXML zip containers) from disk or bytes
//! - Reading and replacing the XML parts inside the archive
//! - Saving the archive back with deflate compression
//! - Escaping text for WordprocessingML and extracting plain text lines
//!
//! # Example
//!
//! ```ignore
//! use docx_core::DocxDocument;
//!
//! let mut doc = DocxDocument::open("templates/fieldtrip.docx")?;
//! let xml = doc.part_text("word/document.xml")?.to_string();
//! doc.set_part_text("word/document.xml", xml.replace("old", "new"));
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod text;

pub use document::{DocxDocument, MAIN_DOCUMENT_PART};
pub use text::{escape_xml, plain_text_lines, unescape_xml};

use thiserror::Error;

/// Errors that can occur during DOCX operations
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("Failed to open DOCX: {0}")]
    OpenError(String),

    #[error("Failed to save DOCX: {0}")]
    SaveError(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Part is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;

/// MIME type of a WordprocessingML document
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert!(DOCX_MIME_TYPE.ends_with("wordprocessingml.document"));
    }

    #[test]
    fn test_error_display() {
        let err = DocxError::PartNotFound("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Part not found: word/document.xml");
    }
}
