//! Retrieval stage: fetch supporting documents for the current query.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::graph::{Next, Node};
use crate::retriever::Retriever;
use crate::state::{ConversationState, RetrievedDocument};

/// Default number of documents requested per cycle.
pub const DEFAULT_TOP_K: usize = 5;

/// Retrieves ranked documents for the latest message and records soft
/// failures.
///
/// Empty results and retriever errors both degrade to an empty context plus
/// an error record; the run always continues.
pub struct RetrieveNode {
    retriever: Arc<dyn Retriever>,
    top_k: usize,
}

impl RetrieveNode {
    pub fn new(retriever: Arc<dyn Retriever>, top_k: usize) -> Self {
        Self { retriever, top_k }
    }
}

#[async_trait]
impl Node<ConversationState> for RetrieveNode {
    fn id(&self) -> &str {
        "retrieve"
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), WorkflowError> {
        let query = state.last_message_text().to_string();
        let mut update = state.update_base();

        match self.retriever.search(&query, self.top_k).await {
            Ok(hits) if hits.is_empty() => {
                debug!(query = %query, "retrieval returned no documents");
                update.retrieved_documents = Vec::new();
                update
                    .errors
                    .push(format!("no relevant documents found for query: {}", query));
            }
            Ok(hits) => {
                debug!(query = %query, count = hits.len(), "retrieval succeeded");
                update.retrieved_documents = hits
                    .into_iter()
                    .map(|hit| RetrievedDocument {
                        content: hit.content,
                        title: hit.title,
                        source_url: hit.source_url,
                    })
                    .collect();
            }
            Err(e) => {
                warn!(error = %e, "retrieval failed; continuing with empty context");
                update.retrieved_documents = Vec::new();
                update.errors.push(format!("retrieval failed: {}", e));
            }
        }

        Ok((update, Next::Continue))
    }
}
