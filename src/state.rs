use std::sync::Arc;

use crate::config::Config;
use crate::llm::chat::HttpChatCompleter;
use crate::llm::embeddings::HttpEmbedder;
use crate::llm::{ChatCompleter, Embedder};
use crate::search::store::{DocumentStore, InMemoryDocumentStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub embedder: Arc<dyn Embedder>,
    pub chat: Arc<dyn ChatCompleter>,
}

impl AppState {
    /// State backed by the configured LLM provider and an empty in-memory index.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;

        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        let embedder = HttpEmbedder::new(http_client.clone(), config.llm.clone());
        let chat = HttpChatCompleter::new(http_client, config.llm.clone());

        Ok(Self::with_backends(
            config,
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(embedder),
            Arc::new(chat),
        ))
    }

    /// State over explicit backends; the upload directory must already exist.
    pub fn with_backends(
        config: Config,
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn Embedder>,
        chat: Arc<dyn ChatCompleter>,
    ) -> Self {
        Self {
            config,
            store,
            embedder,
            chat,
        }
    }
}
