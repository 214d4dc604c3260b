//! Clients for the hosted embedding and chat-completion APIs.
//!
//! The pipeline only sees the [`Embedder`] and [`ChatCompleter`] traits, so
//! tests can swap in deterministic doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ChatMessage;

pub mod answer;
pub mod chat;
pub mod embeddings;

/// Text to vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per input text (in order).
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Messages to text.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}
