//! In-memory cosine-similarity retriever.
//!
//! Holds embedded documentation chunks in memory; search embeds the query
//! and ranks chunks by cosine similarity. FAQ corpora are small, so a
//! brute-force scan is the whole index.

use std::sync::Arc;

use async_trait::async_trait;

use crate::retriever::embedder::Embedder;
use crate::retriever::{Retriever, RetrieverError, ScoredDocument};

/// One embedded chunk in the index.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub content: String,
    pub title: Option<String>,
    pub source_url: Option<String>,
    pub vector: Vec<f32>,
}

/// Cosine-similarity retriever over an in-memory chunk index.
///
/// **Interaction**: Built from a [`crate::retriever::SqliteDocumentStore`]
/// at startup (or from `add_document` during ingestion) and injected into
/// the workflow as `Arc<dyn Retriever>`.
pub struct VectorRetriever {
    embedder: Arc<dyn Embedder>,
    documents: Vec<IndexedDocument>,
}

impl VectorRetriever {
    /// Empty index over `embedder`.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            documents: Vec::new(),
        }
    }

    /// Index over pre-embedded documents (e.g. loaded from the store).
    pub fn with_documents(embedder: Arc<dyn Embedder>, documents: Vec<IndexedDocument>) -> Self {
        Self {
            embedder,
            documents,
        }
    }

    /// Embeds `content` and adds it to the index. Returns the stored entry.
    pub async fn add_document(
        &mut self,
        content: &str,
        title: Option<String>,
        source_url: Option<String>,
    ) -> Result<&IndexedDocument, RetrieverError> {
        let vectors = self.embedder.embed(&[content]).await?;
        let vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| RetrieverError::Embedding("no vector returned".into()))?;
        self.documents.push(IndexedDocument {
            content: content.to_string(),
            title,
            source_url,
            vector,
        });
        Ok(self
            .documents
            .last()
            .ok_or_else(|| RetrieverError::Storage("index empty after push".into()))?)
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing has been ingested.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Cosine similarity; 0.0 when either vector has zero magnitude.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot / (norm_a * norm_b)
        }
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>, RetrieverError> {
        if self.documents.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        let vectors = self.embedder.embed(&[query]).await?;
        let query_vec = vectors
            .into_iter()
            .next()
            .ok_or_else(|| RetrieverError::Embedding("no vector returned".into()))?;

        let mut scored: Vec<ScoredDocument> = self
            .documents
            .iter()
            .map(|doc| ScoredDocument {
                content: doc.content.clone(),
                title: doc.title.clone(),
                source_url: doc.source_url.clone(),
                score: Self::cosine_similarity(&query_vec, &doc.vector),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }
}
