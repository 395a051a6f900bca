//! Error types for the notice server

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use template::{Diagnostic, TemplateError};
use thiserror::Error;
use tracing::error;

/// Message shown to the user for any generation failure
pub const GENERATION_FAILED: &str = "docx生成でエラーが発生しました";

/// Server error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{label} が見つかりません")]
    TemplateNotFound { label: String, path: PathBuf },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi: Option<Vec<Diagnostic>>,
    #[serde(rename = "templatePath", skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            multi: None,
            template_path: None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent for this error
    pub fn body(&self) -> ErrorResponse {
        match self {
            ApiError::TemplateNotFound { path, .. } => ErrorResponse {
                template_path: Some(path.display().to_string()),
                ..ErrorResponse::new(self.to_string())
            },
            ApiError::Template(err) => {
                let diagnostics = err.diagnostics();
                ErrorResponse {
                    detail: Some(err.to_string()),
                    multi: (!diagnostics.is_empty()).then(|| diagnostics.to_vec()),
                    ..ErrorResponse::new(GENERATION_FAILED)
                }
            }
            ApiError::Io(err) => ErrorResponse {
                detail: Some(err.to_string()),
                ..ErrorResponse::new(GENERATION_FAILED)
            },
            ApiError::InvalidRequest(msg) => ErrorResponse {
                detail: Some(msg.clone()),
                ..ErrorResponse::new("リクエストの形式が正しくありません")
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();

        match &self {
            ApiError::Template(err) if !err.diagnostics().is_empty() => {
                let expanded = serde_json::to_string_pretty(err.diagnostics())
                    .unwrap_or_else(|_| err.to_string());
                error!("DOCX render failed: {}\n{}", err, expanded);
            }
            ApiError::InvalidRequest(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
            }
            other => error!("DOCX generation failed: {}", other),
        }

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use template::DiagnosticKind;

    #[test]
    fn test_not_found_body() {
        let err = ApiError::TemplateNotFound {
            label: "templates/fieldtrip.docx".to_string(),
            path: PathBuf::from("/srv/app/templates/fieldtrip.docx"),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "error": "templates/fieldtrip.docx が見つかりません",
                "templatePath": "/srv/app/templates/fieldtrip.docx",
            })
        );
    }

    #[test]
    fn test_render_body_carries_diagnostics() {
        let diagnostic = Diagnostic {
            tag: Some("bus".to_string()),
            ..Diagnostic::of_kind(DiagnosticKind::UndefinedTag)
        };
        let err = ApiError::from(TemplateError::Render(vec![diagnostic.clone()]));

        let body = err.body();
        assert_eq!(body.error, GENERATION_FAILED);
        assert!(body.detail.is_some());
        assert_eq!(body.multi, Some(vec![diagnostic]));
        assert_eq!(body.template_path, None);
    }

    #[test]
    fn test_other_template_errors_have_no_multi() {
        let err = ApiError::from(TemplateError::BindingError("not an object".to_string()));
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], GENERATION_FAILED);
        assert!(body.get("multi").is_none());
    }

    #[test]
    fn test_invalid_request_is_bad_request() {
        let err = ApiError::InvalidRequest("expected value".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().detail.as_deref(), Some("expected value"));
    }
}
