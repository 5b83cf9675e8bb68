//! Embedder trait and the OpenAI implementation.
//!
//! Produces fixed-size float vectors from text, for ingestion and for query
//! embedding at search time.

use async_openai::config::OpenAIConfig;
use async_openai::types::CreateEmbeddingRequestArgs;
use async_openai::Client;
use async_trait::async_trait;

use crate::retriever::RetrieverError;

/// Default embedding model when none is configured.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Dimension of the default embedding model's vectors.
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

/// Produces fixed-size float vectors from text.
///
/// Implementations must be `Send + Sync` for use behind `Arc`.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds each text into a vector of dimension [`Embedder::dimension`].
    /// Returns one vector per input text in the same order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, RetrieverError>;

    /// Vector dimension returned by [`Embedder::embed`].
    fn dimension(&self) -> usize;
}

/// `Embedder` over the OpenAI embeddings API.
///
/// Reads `OPENAI_API_KEY` from the environment via the client config.
pub struct OpenAiEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedder {
    /// Embedder for `model` with the given vector dimension.
    pub fn new(model: impl Into<String>, dimension: usize) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            dimension,
        }
    }

    /// Embedder for the default model.
    pub fn default_model() -> Self {
        Self::new(DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_DIMENSION)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, RetrieverError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let input: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(input)
            .build()
            .map_err(|e| RetrieverError::Embedding(e.to_string()))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| RetrieverError::Embedding(e.to_string()))?;

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
