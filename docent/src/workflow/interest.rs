//! Interest evaluation stage: score purchase interest 0-10 with one LLM call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::ConversationState;
use crate::workflow::extract::parse_interest_score;
use crate::workflow::prompts::{render_transcript, INTEREST_RUBRIC};

/// Below this many total messages (no full exchange yet) the evaluator
/// yields 0 without calling the LLM.
pub const MIN_MESSAGES_FOR_SCORING: usize = 3;

/// How many trailing messages the evaluator sees (three exchanges).
pub const SCORING_WINDOW: usize = 6;

/// Scores lead interest from the recent transcript.
///
/// Skips entirely while contact collection is in progress. The computed
/// score merges through the max-reducer, so a failed or low evaluation can
/// never lower a historical high.
pub struct InterestNode {
    llm: Arc<dyn LlmClient>,
}

impl InterestNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ConversationState> for InterestNode {
    fn id(&self) -> &str {
        "score_interest"
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), WorkflowError> {
        // Evaluation is suspended while actively gathering contact details.
        if state.collecting_contact {
            return Ok((state.update_base(), Next::Continue));
        }

        let mut update = state.update_base();

        if state.messages.len() < MIN_MESSAGES_FOR_SCORING {
            update.interest_score = 0;
            return Ok((update, Next::Continue));
        }

        let window_start = state.messages.len().saturating_sub(SCORING_WINDOW);
        let transcript = render_transcript(&state.messages[window_start..]);
        let prompt = [Message::system(INTEREST_RUBRIC), Message::user(transcript)];

        match self.llm.complete(&prompt).await {
            Ok(response) => match parse_interest_score(&response) {
                Some(score) => {
                    debug!(score, "interest evaluated");
                    update.interest_score = score;
                }
                None => {
                    warn!(response = %response, "interest response had no parsable score");
                }
            },
            Err(e) => {
                warn!(error = %e, "interest evaluation call failed");
            }
        }

        Ok((update, Next::Continue))
    }
}
