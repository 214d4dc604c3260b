use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Where uploaded PDFs are written
    pub upload_dir: PathBuf,
    /// Maximum accepted JSON request body in bytes
    pub json_body_limit: usize,
    /// LLM provider configuration
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama"
    pub provider: String,
    /// Base URL for the LLM API, including any version prefix (e.g. `/v1`)
    pub base_url: String,
    /// Model name for answering questions
    pub chat_model: String,
    /// Model name for embeddings
    pub embedding_model: String,
    /// API key (required by the openai provider)
    pub api_key: Option<String>,
    /// Optional OpenAI project id, sent as the `OpenAI-Project` header
    pub project: Option<String>,
    /// Sampling temperature for answers
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:4000".to_string(),
            upload_dir: PathBuf::from("./storage/uploads"),
            json_body_limit: 2 * 1024 * 1024,
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            api_key: None,
            project: None,
            temperature: 0.2,
        }
    }
}

impl Config {
    /// Build the config from the process environment, after loading `.env`
    /// if one is present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                config.bind_addr = format!("0.0.0.0:{p}");
            }
        }
        if let Some(addr) = lookup("PDF_RAG_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(dir) = lookup("PDF_RAG_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(provider) = lookup("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("MODEL_EMBED") {
            config.llm.embedding_model = model;
        }
        if let Some(model) = lookup("MODEL_CHAT") {
            config.llm.chat_model = model;
        }
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            config.llm.api_key = Some(key);
        }
        if let Some(project) = lookup("OPENAI_PROJECT").filter(|p| !p.is_empty()) {
            config.llm.project = Some(project);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.bind_addr, "0.0.0.0:4000");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.embedding_model, "text-embedding-3-small");
        assert_eq!(config.llm.chat_model, "gpt-4o-mini");
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.json_body_limit, 2 * 1024 * 1024);
    }

    #[test]
    fn test_port_sets_bind_addr() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "8080")]));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_bind_addr_overrides_port() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("PDF_RAG_BIND_ADDR", "127.0.0.1:9000"),
        ]));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_port_keeps_default() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.bind_addr, "0.0.0.0:4000");
    }

    #[test]
    fn test_llm_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_PROJECT", "proj_1"),
            ("MODEL_EMBED", "embed-x"),
            ("MODEL_CHAT", "chat-y"),
        ]));
        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.project.as_deref(), Some("proj_1"));
        assert_eq!(config.llm.embedding_model, "embed-x");
        assert_eq!(config.llm.chat_model, "chat-y");
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "")]));
        assert!(config.llm.api_key.is_none());
    }
}
