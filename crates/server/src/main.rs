//! Field-trip notice server
//!
//! Serves the notice generation endpoint, and optionally the browser form.

use std::net::SocketAddr;

use clap::Parser;
use notice_server::{router, AppState, Args};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting notice server on {}:{}", args.host, args.port);

    let state = AppState::from_args(&args)?;
    if state.template_path.is_file() {
        info!("Template: {}", state.template_path.display());
    } else {
        warn!(
            "Template {} does not exist yet; requests will fail until it is added",
            state.template_path.display()
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Delimiters: {:?}", args.delimiters);

    axum::serve(listener, app).await?;

    Ok(())
}
