//! Client-side form state

use crate::{notice_filename, render_preview, FieldName, NoticeError, NoticeFields, Result};

/// Edit and submit state of the notice form
///
/// Field edits never validate; any string is accepted. A submission moves
/// the state to loading until it is finished with either outcome, and the
/// fields are kept as they were so the user can correct and resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: NoticeFields,
    loading: bool,
    error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(NoticeFields::sample())
    }
}

impl FormState {
    /// Create a form holding `fields`
    pub fn new(fields: NoticeFields) -> Self {
        Self {
            fields,
            loading: false,
            error: None,
        }
    }

    pub fn fields(&self) -> &NoticeFields {
        &self.fields
    }

    /// True while a submission is outstanding
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace one field, keeping the others
    pub fn update(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields = self.fields.with_field(field, value);
    }

    /// Replace one field by its wire name
    pub fn update_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field: FieldName = name.parse()?;
        self.update(field, value);
        Ok(())
    }

    /// Preview text for the current fields
    pub fn preview(&self) -> String {
        render_preview(&self.fields)
    }

    /// Download filename for the current fields
    pub fn filename(&self) -> String {
        notice_filename(&self.fields.date)
    }

    /// Start a submission and return the JSON request body
    ///
    /// Clears the previous error. Fails while another submission is
    /// outstanding.
    pub fn begin_submit(&mut self) -> Result<String> {
        if self.loading {
            return Err(NoticeError::SubmissionInProgress);
        }

        let payload = serde_json::to_string(&self.fields)?;
        self.error = None;
        self.loading = true;
        Ok(payload)
    }

    /// Finish a submission whose document was downloaded
    pub fn finish_success(&mut self) {
        self.loading = false;
    }

    /// Finish a submission that failed with `message`
    pub fn finish_failure(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}

/// User-facing message for a non-success response
///
/// Prefers the body's `detail`, then its `error`, then the bare status.
pub fn error_message_from_response(status: u16, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    let pick = |key: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    pick("detail")
        .or_else(|| pick("error"))
        .unwrap_or_else(|| format!("HTTP {status}"))
}
