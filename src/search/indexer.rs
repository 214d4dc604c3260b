use chrono::Utc;

use crate::chunking::{chunk_text, PAGE_CHUNK_CHARS};
use crate::error::{RagError, Result};
use crate::llm::Embedder;
use crate::models::{IndexRequest, IndexedDocument, Page, PageInput};
use crate::search::store::DocumentStore;
use crate::search::vector::average_vectors;

/// Error message for an index request without a usable id or page list.
pub const INDEX_FIELDS_REQUIRED: &str = "docId and pages required";

/// Pull the document id and page list out of an index request.
pub fn validate_index_request(req: IndexRequest) -> Result<(String, Vec<PageInput>)> {
    let doc_id = req
        .doc_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(required)?;
    let pages = req.pages.filter(|p| !p.is_empty()).ok_or_else(required)?;
    check_page_numbers(&pages)?;
    Ok((doc_id, pages))
}

fn required() -> RagError {
    RagError::Validation(INDEX_FIELDS_REQUIRED.to_string())
}

/// Page numbers are 1-based.
fn check_page_numbers(pages: &[PageInput]) -> Result<()> {
    if pages.iter().any(|p| p.page_number == 0) {
        return Err(RagError::Validation(
            "pageNumber must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Embed every page and store the document, replacing any earlier entry
/// under the same id. Returns the number of pages written.
///
/// Each page is chunked and its chunks embedded in one batch; the page vector
/// is the mean of the chunk vectors. Nothing is written if any page fails.
pub async fn index_pages(
    embedder: &dyn Embedder,
    store: &dyn DocumentStore,
    doc_id: &str,
    pages: Vec<PageInput>,
) -> Result<usize> {
    if doc_id.trim().is_empty() || pages.is_empty() {
        return Err(required());
    }
    check_page_numbers(&pages)?;

    let mut rows: Vec<Page> = Vec::with_capacity(pages.len());
    for input in pages {
        let text = input.text.unwrap_or_default();
        let chunks: Vec<String> = chunk_text(&text, PAGE_CHUNK_CHARS)
            .map(str::to_string)
            .collect();

        let vectors = embedder.embed(&chunks).await?;
        let embedding = average_vectors(&vectors).ok_or_else(|| {
            RagError::Upstream(format!(
                "Embedding API returned unusable vectors for page {}",
                input.page_number
            ))
        })?;

        if let Some(first) = rows.first() {
            if first.embedding.len() != embedding.len() {
                return Err(RagError::Upstream(format!(
                    "Embedding dimension changed within document: expected {}, got {}",
                    first.embedding.len(),
                    embedding.len()
                )));
            }
        }

        rows.push(Page {
            page_number: input.page_number,
            text,
            embedding,
        });
    }

    let count = rows.len();
    store.put(IndexedDocument {
        doc_id: doc_id.to_string(),
        pages: rows,
        indexed_at: Utc::now(),
    });
    tracing::info!(
        doc_id,
        pages = count,
        documents = store.document_count(),
        "Indexed document"
    );
    Ok(count)
}
