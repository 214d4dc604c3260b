use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{RagError, Result};
use crate::llm::embeddings::{authorized, require_api_key, upstream_failure};
use crate::llm::ChatCompleter;
use crate::models::ChatMessage;

/// Non-streaming chat completion against the configured provider.
pub struct HttpChatCompleter {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpChatCompleter {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ChatCompleter for HttpChatCompleter {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        match self.config.provider.as_str() {
            "openai" => complete_openai(&self.client, &self.config, messages).await,
            "ollama" => complete_ollama(&self.client, &self.config, messages).await,
            other => Err(RagError::Config(format!(
                "Unsupported LLM provider for chat: {other}"
            ))),
        }
    }
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

async fn complete_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    messages: Vec<ChatMessage>,
) -> Result<String> {
    let api_key = require_api_key(config)?;
    let url = format!("{}/chat/completions", config.base_url);

    let req = OpenAiChatRequest {
        model: &config.chat_model,
        messages,
        temperature: config.temperature,
    };

    let resp = authorized(client.post(&url), api_key, config.project.as_deref())
        .json(&req)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(upstream_failure("OpenAI chat API", resp).await);
    }

    let body: OpenAiChatResponse = resp.json().await?;
    Ok(body
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

async fn complete_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    messages: Vec<ChatMessage>,
) -> Result<String> {
    let url = format!("{}/api/chat", config.base_url);

    let req = OllamaChatRequest {
        model: &config.chat_model,
        messages,
        stream: false,
        options: OllamaOptions {
            temperature: config.temperature,
        },
    };

    let resp = client.post(&url).json(&req).send().await?;

    if !resp.status().is_success() {
        return Err(upstream_failure("Ollama chat API", resp).await);
    }

    let body: OllamaChatResponse = resp.json().await?;
    Ok(body.message.map(|m| m.content).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(provider: &str, base_url: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: provider.into(),
            base_url: base_url.into(),
            api_key: api_key.map(String::from),
            ..LlmConfig::default()
        }
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::system("sys"), ChatMessage::user("hi")]
    }

    #[tokio::test]
    async fn test_openai_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "hello"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chat = HttpChatCompleter::new(
            reqwest::Client::new(),
            config("openai", &server.uri(), Some("sk-test")),
        );
        assert_eq!(chat.complete(messages()).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_openai_no_choices_is_empty_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let chat = HttpChatCompleter::new(
            reqwest::Client::new(),
            config("openai", &server.uri(), Some("sk-test")),
        );
        assert_eq!(chat.complete(messages()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_openai_error_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let chat = HttpChatCompleter::new(
            reqwest::Client::new(),
            config("openai", &server.uri(), Some("sk-test")),
        );
        match chat.complete(messages()).await.unwrap_err() {
            RagError::Upstream(msg) => assert!(msg.contains("boom")),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_openai_without_key_is_config_error() {
        let chat = HttpChatCompleter::new(
            reqwest::Client::new(),
            config("openai", "http://127.0.0.1:9", None),
        );
        let err = chat.complete(messages()).await.unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[tokio::test]
    async fn test_ollama_non_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "from ollama"},
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chat =
            HttpChatCompleter::new(reqwest::Client::new(), config("ollama", &server.uri(), None));
        assert_eq!(chat.complete(messages()).await.unwrap(), "from ollama");
    }
}
