//! Notice Server
//!
//! HTTP service that turns field-trip notice form data into a DOCX file
//! by filling a template read from disk on every request.
//!
//! - `GET /health` - liveness probe
//! - `POST /api/letters/fieldtrip` - generate a notice
//!
//! # Example
//!
//! ```ignore
//! use notice_server::{router, AppState, Args};
//!
//! let state = AppState::from_args(&args)?;
//! let app = router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod api;
pub mod config;
pub mod error;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use template::TemplateRenderer;
use tower_http::services::ServeDir;

pub use config::{Args, DelimiterStyle};
pub use error::ApiError;

/// Shared application state
pub struct AppState {
    /// Template path as configured, used in user-facing messages
    pub template_label: String,
    /// Template path resolved against the working directory
    pub template_path: PathBuf,
    pub renderer: TemplateRenderer,
    /// Directory served at `/`, if any
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Build the state for one deployment
    pub fn from_args(args: &Args) -> std::io::Result<Self> {
        let template_path = if args.template.is_absolute() {
            args.template.clone()
        } else {
            std::env::current_dir()?.join(&args.template)
        };

        Ok(Self {
            template_label: args.template.display().to_string(),
            template_path,
            renderer: TemplateRenderer::with_options(args.template_options()),
            static_dir: args.static_dir.clone(),
        })
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();

    let app = Router::new()
        .route("/health", get(api::handle_health))
        .route(notice::ENDPOINT_PATH, post(api::handle_generate_notice))
        .with_state(Arc::new(state));

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}
