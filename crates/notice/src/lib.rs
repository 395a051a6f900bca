//! Notice - field-trip notice data and form logic
//!
//! This crate provides:
//! - `NoticeFields`, the sixteen form values of a notice, with defaults
//! - Merging partial request input over the defaults
//! - Newline normalization for the multi-line fields
//! - The plain-text preview layout shown next to the form
//! - The download filename derived from the date
//! - `FormState`, the client-side edit/submit state machine
//!
//! # Example
//!
//! ```ignore
//! use notice::{FieldName, FormState, NoticeFields, PartialNoticeFields};
//!
//! // Server side
//! let partial: PartialNoticeFields = serde_json::from_str(body)?;
//! let fields = NoticeFields::from_request(partial);
//!
//! // Client side
//! let mut form = FormState::default();
//! form.update(FieldName::Date, "2026年2月3日");
//! let text = form.preview();
//! ```

mod fields;
mod filename;
mod form;
mod preview;

pub use fields::{
    normalize_newlines, FieldName, NoticeFields, PartialNoticeFields, DEFAULT_TITLE, SAMPLE_VALUES,
};
pub use filename::{notice_filename, DATE_PLACEHOLDER, FILENAME_PREFIX};
pub use form::{error_message_from_response, FormState};
pub use preview::render_preview;

use thiserror::Error;

/// Path of the document generation endpoint
pub const ENDPOINT_PATH: &str = "/api/letters/fieldtrip";

/// Errors that can occur while handling notice data
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for notice operations
pub type Result<T> = std::result::Result<T, NoticeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_path() {
        assert_eq!(ENDPOINT_PATH, "/api/letters/fieldtrip");
    }

    #[test]
    fn test_unknown_field_message() {
        let err = NoticeError::UnknownField("bus".to_string());
        assert_eq!(err.to_string(), "Unknown field: bus");
    }
}
