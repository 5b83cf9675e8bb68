//! Document retrieval for the answer context.
//!
//! The workflow consumes the [`Retriever`] capability: similarity search
//! over ingested documentation chunks. Shipped implementation:
//! [`VectorRetriever`], cosine similarity between an [`Embedder`]'s vectors
//! over an in-memory index, optionally loaded from a
//! [`SqliteDocumentStore`].

mod embedder;
mod sqlite;
mod vector;

pub use embedder::{
    Embedder, OpenAiEmbedder, DEFAULT_EMBEDDING_DIMENSION, DEFAULT_EMBEDDING_MODEL,
};
pub use sqlite::SqliteDocumentStore;
pub use vector::{IndexedDocument, VectorRetriever};

use async_trait::async_trait;
use thiserror::Error;

/// Error type for retrieval and embedding operations.
#[derive(Debug, Error)]
pub enum RetrieverError {
    #[error("embedding: {0}")]
    Embedding(String),
    #[error("storage: {0}")]
    Storage(String),
}

/// One search hit, ranked by descending score.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    /// Chunk text.
    pub content: String,
    /// Page or section title, when known.
    pub title: Option<String>,
    /// Source page URL, when known.
    pub source_url: Option<String>,
    /// Similarity score in [-1, 1]; higher is closer.
    pub score: f32,
}

/// Similarity search over ingested documentation.
///
/// **Interaction**: Injected into the workflow as `Arc<dyn Retriever>`;
/// called once per cycle by the retrieval stage.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns up to `k` documents ranked by similarity to `query`.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>, RetrieverError>;
}
