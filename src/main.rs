use anyhow::Context;
use tracing_subscriber::EnvFilter;

use pdf_rag::api;
use pdf_rag::config::Config;
use pdf_rag::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Upload directory: {}", config.upload_dir.display());
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.base_url);
    if config.llm.provider == "openai" && config.llm.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; index and chat requests will fail");
    }

    let state = AppState::new(config.clone()).context("Failed to initialise application state")?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("API listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
