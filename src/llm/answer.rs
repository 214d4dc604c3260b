//! Prompt assembly and the question-answering read path.

use std::fmt::Write;

use crate::error::{RagError, Result};
use crate::llm::{ChatCompleter, Embedder};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, Citation, RankedPage};
use crate::search::retriever::{retrieve, Retrieval};
use crate::search::store::DocumentStore;

/// Answer returned for a document id with nothing indexed.
pub const NOT_INDEXED_ANSWER: &str = "Document not indexed yet.";

/// Characters of each page's text placed in the prompt.
const CONTEXT_CHARS_PER_PAGE: usize = 1200;

const SYSTEM_PROMPT: &str = "Answer based only on provided context. Cite pages used.";

/// Error message for a chat request without a usable id or question.
pub const CHAT_FIELDS_REQUIRED: &str = "docId and question required";

/// Pull the document id and question out of a chat request.
pub fn validate_chat_request(req: ChatRequest) -> Result<(String, String)> {
    match (req.doc_id, req.question) {
        (Some(doc_id), Some(question))
            if !doc_id.trim().is_empty() && !question.trim().is_empty() =>
        {
            Ok((doc_id, question))
        }
        _ => Err(RagError::Validation(CHAT_FIELDS_REQUIRED.to_string())),
    }
}

/// Retrieve the best pages for `question` and have the chat model answer
/// from them.
///
/// Citations are the retrieved pages, in rank order, whether or not the
/// model's text mentions them.
pub async fn answer_question(
    embedder: &dyn Embedder,
    chat: &dyn ChatCompleter,
    store: &dyn DocumentStore,
    doc_id: &str,
    question: &str,
) -> Result<ChatResponse> {
    let ranked = match retrieve(embedder, store, doc_id, question).await? {
        Retrieval::NotIndexed => {
            tracing::info!(doc_id, "Chat against unindexed document");
            return Ok(ChatResponse {
                answer: NOT_INDEXED_ANSWER.to_string(),
                citations: Vec::new(),
            });
        }
        Retrieval::Ranked(ranked) => ranked,
    };

    tracing::info!(doc_id, retrieved = ranked.len(), "Answering question");

    let context = build_context(&ranked);
    let answer = chat.complete(build_messages(&context, question)).await?;

    Ok(ChatResponse {
        answer,
        citations: ranked
            .iter()
            .map(|r| Citation {
                page_number: r.page.page_number,
            })
            .collect(),
    })
}

fn build_context(ranked: &[RankedPage]) -> String {
    let mut ctx = String::new();
    for (i, r) in ranked.iter().enumerate() {
        if i > 0 {
            ctx.push_str("\n\n");
        }
        let excerpt: String = r.page.text.chars().take(CONTEXT_CHARS_PER_PAGE).collect();
        // Writing to a String cannot fail.
        let _ = write!(ctx, "Page {}: {}", r.page.page_number, excerpt);
    }
    ctx
}

fn build_messages(context: &str, question: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "You are a helpful assistant answering questions about a PDF. \
         Use the context to answer concisely and include citations as a list of \
         page numbers you used. Keep the answer brief.\n\n\
         Context:\n{context}\n\nQuestion: {question}"
    );
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}
