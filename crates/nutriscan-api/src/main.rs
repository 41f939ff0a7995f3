//! nutriscan-api server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use nutriscan_api::{build_router, AppState};
use nutriscan_core::defaults;
use nutriscan_inference::GeminiBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "nutriscan=debug,tower_http=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let backend = GeminiBackend::from_env().context("initializing Gemini backend")?;
    let state = AppState::new(Arc::new(backend));
    let app = build_router(state);

    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| defaults::SERVER_PORT.to_string())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
