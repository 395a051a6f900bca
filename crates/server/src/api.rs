//! API handlers for the notice server
//!
//! Provides REST endpoints for:
//! - Health checks
//! - Field-trip notice generation

use std::io::ErrorKind;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use docx_core::DOCX_MIME_TYPE;
use notice::{notice_filename, NoticeFields, PartialNoticeFields};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "notice-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /api/letters/fieldtrip
///
/// Fills the template with the request fields and returns the document as
/// an attachment. Absent fields take their defaults.
pub async fn handle_generate_notice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PartialNoticeFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(partial) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let fields = NoticeFields::from_request(partial);

    let template = load_template(&state).await?;
    let bytes = state
        .renderer
        .render_bytes(&template, &fields.to_template_data())?;

    let filename = notice_filename(&fields.date);
    info!("Generated {} ({} bytes)", filename, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        bytes,
    ))
}

/// Read the template from disk, fresh for every request
async fn load_template(state: &AppState) -> Result<Vec<u8>, ApiError> {
    let path = &state.template_path;
    let not_found = || ApiError::TemplateNotFound {
        label: state.template_label.clone(),
        path: path.clone(),
    };

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(not_found()),
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(err) => return Err(err.into()),
    };
    debug!("[TEMPLATE] {}", path.display());
    debug!("[TEMPLATE] size = {}", metadata.len());

    Ok(tokio::fs::read(path).await?)
}

/// `Content-Disposition` value for a download named `filename`
///
/// Uses the RFC 5987 `filename*` form so non-ASCII names survive.
pub fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_disposition_encodes_utf8() {
        assert_eq!(
            content_disposition("校外学習お便り_日付未設定.docx"),
            "attachment; filename*=UTF-8''%E6%A0%A1%E5%A4%96%E5%AD%A6%E7%BF%92%E3%81%8A%E4%BE%BF%E3%82%8A_%E6%97%A5%E4%BB%98%E6%9C%AA%E8%A8%AD%E5%AE%9A.docx"
        );
    }

    #[test]
    fn test_content_disposition_keeps_unreserved_ascii() {
        assert_eq!(
            content_disposition("notice_2026-03-01.docx"),
            "attachment; filename*=UTF-8''notice_2026-03-01.docx"
        );
        assert_eq!(
            content_disposition("a b.docx"),
            "attachment; filename*=UTF-8''a%20b.docx"
        );
    }
}
