//! Generation stage: produce the final user-facing answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::ConversationState;
use crate::workflow::prompts::{answer_system_prompt, format_context, GENERATION_APOLOGY};

/// Builds the grounded prompt, invokes the LLM once, and records the
/// answer.
///
/// Always leaves `answer` and a new assistant message set: an invocation
/// error substitutes a fixed apology. Consumes any pending append message.
pub struct GenerateNode {
    llm: Arc<dyn LlmClient>,
}

impl GenerateNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// System prompt + prior history (excluding the current query) + query.
    fn build_prompt(state: &ConversationState) -> Vec<Message> {
        let context = format_context(&state.retrieved_documents);
        let mut prompt = vec![Message::system(answer_system_prompt(&context))];
        if let Some((current, history)) = state.messages.split_last() {
            prompt.extend(history.iter().cloned());
            prompt.push(Message::user(current.content()));
        }
        prompt
    }
}

#[async_trait]
impl Node<ConversationState> for GenerateNode {
    fn id(&self) -> &str {
        "generate"
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), WorkflowError> {
        let prompt = Self::build_prompt(&state);
        let mut update = state.update_base();

        match self.llm.complete(&prompt).await {
            Ok(text) => {
                let mut answer = text;
                if !state.append_message.is_empty() {
                    answer.push_str("\n\n");
                    answer.push_str(&state.append_message);
                }
                debug!(chars = answer.len(), "answer generated");
                update.answer = answer.clone();
                update.messages.push(Message::assistant(answer));
            }
            Err(e) => {
                warn!(error = %e, "generation failed; returning apology");
                update.answer = GENERATION_APOLOGY.to_string();
                update.messages.push(Message::assistant(GENERATION_APOLOGY));
                update.errors.push(format!("generation failed: {}", e));
            }
        }

        // The pending suffix is consumed this cycle either way.
        update.append_message = String::new();

        Ok((update, Next::Continue))
    }
}
