use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{RagError, Result};
use crate::llm::Embedder;

/// Embedding client for the configured provider (`openai` or `ollama`).
///
/// Sends the whole batch in one request. No retry, no batch-size cap.
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpEmbedder {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = match self.config.provider.as_str() {
            "openai" => embed_openai(&self.client, &self.config, texts).await?,
            "ollama" => embed_ollama(&self.client, &self.config, texts).await?,
            other => {
                return Err(RagError::Config(format!("Unknown LLM provider: {other}")));
            }
        };

        if embeddings.len() != texts.len() {
            return Err(RagError::Upstream(format!(
                "Embedding API returned {} vectors for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }
        Ok(embeddings)
    }
}

/// The openai provider refuses to run without a key.
pub(crate) fn require_api_key(config: &LlmConfig) -> Result<&str> {
    config
        .api_key
        .as_deref()
        .ok_or_else(|| RagError::Config("OPENAI_API_KEY missing".to_string()))
}

pub(crate) fn authorized(
    request: reqwest::RequestBuilder,
    api_key: &str,
    project: Option<&str>,
) -> reqwest::RequestBuilder {
    let request = request.bearer_auth(api_key);
    match project {
        Some(project) => request.header("OpenAI-Project", project),
        None => request,
    }
}

pub(crate) async fn upstream_failure(api: &str, resp: reqwest::Response) -> RagError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    RagError::Upstream(format!("{api} returned {status}: {body}"))
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OpenAiEmbedResponse {
    data: Vec<OpenAiEmbedData>,
}

#[derive(Deserialize)]
struct OpenAiEmbedData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

async fn embed_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    let api_key = require_api_key(config)?;
    let url = format!("{}/embeddings", config.base_url);

    let req = OpenAiEmbedRequest {
        model: &config.embedding_model,
        input: texts,
    };

    let resp = authorized(client.post(&url), api_key, config.project.as_deref())
        .json(&req)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(upstream_failure("OpenAI embed API", resp).await);
    }

    let mut body: OpenAiEmbedResponse = resp.json().await?;

    // Items carry their input position; restore input order.
    body.data.sort_by_key(|d| d.index);
    Ok(body.data.into_iter().map(|d| d.embedding).collect())
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    truncate: bool,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

async fn embed_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    let url = format!("{}/api/embed", config.base_url);

    let req = OllamaEmbedRequest {
        model: &config.embedding_model,
        input: texts,
        truncate: true,
    };

    let resp = client.post(&url).json(&req).send().await?;

    if !resp.status().is_success() {
        return Err(upstream_failure("Ollama embed API", resp).await);
    }

    let body: OllamaEmbedResponse = resp.json().await?;
    Ok(body.embeddings)
}
