use crate::error::{RagError, Result};
use crate::llm::Embedder;
use crate::models::RankedPage;
use crate::search::store::DocumentStore;
use crate::search::vector::rank_pages;

/// Pages handed to the answer composer. Fixed, not a tunable.
pub const TOP_K: usize = 4;

#[derive(Debug)]
pub enum Retrieval {
    /// No pages are stored under the document id.
    NotIndexed,
    /// Best pages first, at most [`TOP_K`].
    Ranked(Vec<RankedPage>),
}

/// Embed `question` and rank the document's pages against it.
///
/// An unknown document id short-circuits before any embedding call.
pub async fn retrieve(
    embedder: &dyn Embedder,
    store: &dyn DocumentStore,
    doc_id: &str,
    question: &str,
) -> Result<Retrieval> {
    let Some(document) = store.get(doc_id).filter(|d| !d.pages.is_empty()) else {
        return Ok(Retrieval::NotIndexed);
    };

    let query = embedder
        .embed(&[question.to_string()])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| RagError::Upstream("No embedding returned for question".to_string()))?;

    Ok(Retrieval::Ranked(rank_pages(&query, &document.pages, TOP_K)))
}
