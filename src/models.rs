use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page with its page vector, as held in the document index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: u32,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// All indexed pages of one document.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub doc_id: String,
    pub pages: Vec<Page>,
    pub indexed_at: DateTime<Utc>,
}

/// A page scored against a question.
#[derive(Debug, Clone)]
pub struct RankedPage {
    pub page: Page,
    pub score: f32,
}

/// Page text as extracted by the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub page_number: u32,
    #[serde(default)]
    pub text: Option<String>,
}

/// Index request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRequest {
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub pages: Option<Vec<PageInput>>,
}

/// Index response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexResponse {
    pub ok: bool,
    pub pages: usize,
}

/// Chat request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub page_number: u32,
}

/// Chat response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
}

/// Upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub doc_id: String,
    pub filename: String,
    pub path: String,
}

/// A single chat turn sent to the completion API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
