//! # pdf-rag
//!
//! A small retrieval-augmented question-answering service for PDFs. The
//! browser uploads a PDF, extracts the text of each page, and posts it for
//! indexing. Questions are answered from the best-matching pages.
//!
//! ## Pipeline
//!
//! ```text
//!   write path                          read path
//!
//!   page text                           question
//!      │                                   │
//!      ▼                                   ▼
//!  ┌─────────┐                       ┌───────────┐
//!  │ Chunker │  1500-char windows    │ Embedder  │  one vector
//!  └────┬────┘                       └─────┬─────┘
//!       ▼                                  ▼
//!  ┌──────────┐                      ┌───────────┐
//!  │ Embedder │  one batch per page  │ Retriever │  cosine, top 4
//!  └────┬─────┘                      └─────┬─────┘
//!       ▼                                  ▼
//!  ┌──────────────┐                  ┌──────────────┐
//!  │ Page indexer │  mean vector     │ Answer       │  context + question
//!  └────┬─────────┘                  │ composer     │  → chat completion
//!       ▼                            └──────────────┘
//!  DocumentStore (in memory, keyed by document id)
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server and LLM provider
//! - [`error`] - `RagError`: validation, config, upstream and io failures
//! - [`models`] - Pages, indexed documents and the JSON request/response types
//! - [`chunking`] - Lazy fixed-window character chunker
//! - [`search::vector`] - Vector mean, cosine similarity and page ranking
//! - [`search::store`] - `DocumentStore` trait and the in-memory index
//! - [`search::indexer`] - Page indexing (chunk, embed, average, store)
//! - [`search::retriever`] - Top-k page retrieval for a question
//! - [`llm`] - `Embedder` / `ChatCompleter` traits and their HTTP clients
//! - [`llm::answer`] - Prompt assembly and the question-answering read path
//! - [`api`] - Axum router and handlers
//! - [`state`] - Shared application state holding the store and LLM clients

pub mod api;
pub mod chunking;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod search;
pub mod state;
