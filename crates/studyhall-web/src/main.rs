use std::sync::Arc;

use studyhall_core::config::Settings;
use studyhall_core::{Normalizer, OpenAiBackend, Store};
use studyhall_web::{AppState, app};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load();
    if settings.api_key.is_none() {
        warn!("no completion API key configured; AI-backed routes will fail");
    }

    let store = Store::open(&settings.db_path)?;
    info!(db = %settings.db_path.display(), "store opened");

    let backend = Arc::new(OpenAiBackend::new(
        settings.api_key.clone(),
        settings.api_base.clone(),
    ));
    let normalizer = Normalizer::new(backend, settings.model.clone());

    let state = Arc::new(AppState::new(store, normalizer));
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    info!(addr = %settings.bind, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
