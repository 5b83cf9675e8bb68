//! Contact collection stage: extract or solicit contact details.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::WorkflowError;
use crate::graph::{Next, Node};
use crate::state::{ContactInfo, ConversationState};
use crate::workflow::extract::contact_patterns;
use crate::workflow::prompts::{contact_request, thank_you};

/// Extracts contact details from the latest user utterance, or enters
/// collection mode and queues a solicitation for the next answer.
///
/// Extraction is regex-based and best-effort; misses simply leave the
/// conversation in collection mode for a later turn.
pub struct ContactNode;

impl ContactNode {
    pub fn new() -> Self {
        Self
    }

    /// True when the conversation has mentioned a company or business,
    /// which makes the solicitation ask for the company name too.
    fn history_mentions_company(state: &ConversationState) -> bool {
        state.messages.iter().any(|m| {
            let text = m.content().to_lowercase();
            text.contains("company") || text.contains("business")
        })
    }
}

impl Default for ContactNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<ConversationState> for ContactNode {
    fn id(&self) -> &str {
        "collect_contact"
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), WorkflowError> {
        // Contact is captured at most once per thread; re-extraction or
        // re-solicitation after that would break the collected/collecting
        // exclusivity.
        if state.contact_info.collected {
            return Ok((state.update_base(), Next::Continue));
        }

        let mut update = state.update_base();

        let Some(patterns) = contact_patterns() else {
            warn!("contact patterns unavailable; leaving collection mode");
            update.collecting_contact = false;
            return Ok((update, Next::Continue));
        };

        let text = state.last_user_text();
        if let Some(email) = patterns.email(text) {
            let name = patterns.name(text);
            let company = patterns.company(text);
            info!(email = %email, "contact details captured");
            update.append_message = thank_you(name.as_deref());
            update.contact_info = ContactInfo {
                name,
                email: Some(email),
                company,
                collected: true,
            };
            update.collecting_contact = false;
        } else if !state.collecting_contact {
            update.collecting_contact = true;
            update.append_message = contact_request(Self::history_mentions_company(&state));
        }
        // Already collecting and still no email: stay in collection mode and
        // answer normally this turn.

        Ok((update, Next::Continue))
    }
}
