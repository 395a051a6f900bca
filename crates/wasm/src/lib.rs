//! WASM bindings for the field-trip notice form
//!
//! This crate provides JavaScript-friendly API for:
//! - Editing the sixteen notice fields
//! - The live plain-text preview
//! - Submitting to the generation endpoint and downloading the result
//! - Mounting a ready-made form into a page
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { NoticeForm, mount } from 'notice-wasm';
//!
//! await init();
//!
//! // Drive your own markup
//! const form = new NoticeForm();
//! form.update('date', '2026年2月3日（火）');
//! preview.textContent = form.preview();
//! const ok = await form.submit();
//! if (!ok) alert(form.error);
//!
//! // Or let the crate build the form
//! mount('app');
//! ```

mod dom;
mod fetch;

use std::cell::RefCell;
use std::rc::Rc;

use notice::{FieldName, FormState, ENDPOINT_PATH};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use dom::mount;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Field metadata exposed to JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldInfo {
    name: &'static str,
    label: &'static str,
    multiline: bool,
}

/// Form state shared with the page
///
/// Clones share the same state, so event handlers can hold their own.
#[wasm_bindgen]
#[derive(Clone)]
pub struct NoticeForm {
    state: Rc<RefCell<FormState>>,
}

#[wasm_bindgen]
impl NoticeForm {
    /// Create a form seeded with the sample values
    #[wasm_bindgen(constructor)]
    pub fn new() -> NoticeForm {
        NoticeForm {
            state: Rc::new(RefCell::new(FormState::default())),
        }
    }

    /// Field names, labels and whether each is multi-line, in form order
    pub fn schema() -> Result<JsValue, JsValue> {
        let fields: Vec<FieldInfo> = FieldName::ALL
            .iter()
            .map(|f| FieldInfo {
                name: f.as_str(),
                label: f.label(),
                multiline: f.is_multiline(),
            })
            .collect();
        serde_wasm_bindgen::to_value(&fields).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace one field
    ///
    /// @param field - Wire name, e.g. "meet_place"
    /// @param value - New text, any string is accepted
    pub fn update(&self, field: &str, value: &str) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .update_by_name(field, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current value of one field
    pub fn value(&self, field: &str) -> Result<String, JsValue> {
        let field: FieldName = field
            .parse()
            .map_err(|e: notice::NoticeError| JsValue::from_str(&e.to_string()))?;
        Ok(self.state.borrow().fields().get(field).to_string())
    }

    /// All fields as a plain object
    pub fn fields(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.borrow().fields())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Preview text for the current fields
    pub fn preview(&self) -> String {
        self.state.borrow().preview()
    }

    /// Download filename for the current fields
    pub fn filename(&self) -> String {
        self.state.borrow().filename()
    }

    #[wasm_bindgen(getter)]
    pub fn loading(&self) -> bool {
        self.state.borrow().loading()
    }

    /// Message from the last failed submission
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    /// Generate the document and trigger the browser download
    ///
    /// @param endpoint - Optional URL, defaults to "/api/letters/fieldtrip"
    /// @returns true when the file was downloaded; on false see `error`
    pub async fn submit(&self, endpoint: Option<String>) -> Result<bool, JsValue> {
        let (payload, filename) = {
            let mut state = self.state.borrow_mut();
            let payload = state
                .begin_submit()
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            (payload, state.filename())
        };

        let url = endpoint.unwrap_or_else(|| ENDPOINT_PATH.to_string());
        let outcome = match fetch::post_notice(&url, &payload).await {
            Ok(blob) => fetch::download_blob(&blob, &filename).map_err(|e| fetch::js_error_message(&e)),
            Err(message) => Err(message),
        };

        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(()) => {
                state.finish_success();
                Ok(true)
            }
            Err(message) => {
                state.finish_failure(message);
                Ok(false)
            }
        }
    }
}

impl Default for NoticeForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_update_and_preview() {
        let form = NoticeForm::new();
        form.update("destination", "奈良公園").unwrap();
        assert_eq!(form.value("destination").unwrap(), "奈良公園");
        assert!(form.preview().contains("■ 行き先\n奈良公園\n"));
    }

    #[wasm_bindgen_test]
    fn test_update_rejects_unknown_field() {
        let form = NoticeForm::new();
        assert!(form.update("bus", "x").is_err());
    }

    #[wasm_bindgen_test]
    fn test_clones_share_state() {
        let form = NoticeForm::new();
        let handle = form.clone();
        handle.update("date", "").unwrap();
        assert_eq!(form.filename(), "校外学習お便り_日付未設定.docx");
        assert!(!form.loading());
        assert_eq!(form.error(), None);
    }
}
