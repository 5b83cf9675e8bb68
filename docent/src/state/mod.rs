//! Conversation state threaded through the workflow graph.
//!
//! One [`ConversationState`] exists per conversation thread, loaded from a
//! checkpointer before each run and saved after. Nodes return partial
//! updates built from [`ConversationState::update_base`]; the updater from
//! [`conversation_updater`] merges them field by field:
//!
//! | field               | merge rule        |
//! |---------------------|-------------------|
//! | messages            | concatenate       |
//! | retrieved_documents | replace           |
//! | answer              | replace           |
//! | errors              | concatenate       |
//! | interest_score      | max(old, new)     |
//! | contact_info        | replace           |
//! | collecting_contact  | replace           |
//! | append_message      | replace           |
//! | lead_notified       | replace           |

use std::sync::Arc;

use crate::graph::{BoxedStateUpdater, FieldBasedUpdater};
use crate::message::Message;

/// Maximum interest score the evaluator can assign.
pub const MAX_INTEREST_SCORE: u8 = 10;

/// One document returned by the retriever for the current cycle.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RetrievedDocument {
    /// Chunk text used as answer context.
    pub content: String,
    /// Page or section title, when the source had one.
    pub title: Option<String>,
    /// Where the chunk came from (page URL).
    pub source_url: Option<String>,
}

/// Contact details captured from the conversation.
///
/// `collected` flips false -> true exactly once, when an email is captured,
/// and is never reset by the workflow.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub collected: bool,
}

/// The single mutable record threaded through the graph, one per thread.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ConversationState {
    /// Full conversation history, append-only across the thread's lifetime.
    pub messages: Vec<Message>,
    /// Documents retrieved for the current cycle only; replaced each run.
    pub retrieved_documents: Vec<RetrievedDocument>,
    /// Most recently generated answer; replaced each run.
    pub answer: String,
    /// Diagnostic error strings, append-only across the thread's lifetime.
    pub errors: Vec<String>,
    /// Lead interest in [0, 10]; monotonically non-decreasing (max-merge).
    pub interest_score: u8,
    /// Captured contact details.
    pub contact_info: ContactInfo,
    /// True while the bot has asked for contact details and is waiting.
    pub collecting_contact: bool,
    /// Transient suffix for the next generated answer; consumed by the
    /// generation stage within the same cycle.
    pub append_message: String,
    /// True once the lead notification for this thread has been attempted.
    pub lead_notified: bool,
}

impl ConversationState {
    /// Starting point for a node's returned update.
    ///
    /// Append-semantics fields (`messages`, `errors`) start empty so the
    /// updater concatenates only what the node adds; replace-semantics
    /// fields carry their current values so untouched fields merge as
    /// no-ops. `interest_score` carries the current value, which the
    /// max-merge also treats as a no-op.
    pub fn update_base(&self) -> ConversationState {
        ConversationState {
            messages: Vec::new(),
            errors: Vec::new(),
            ..self.clone()
        }
    }

    /// Text of the most recent message regardless of author, or "" when the
    /// history is empty. The retrieval stage uses this as the query.
    pub fn last_message_text(&self) -> &str {
        self.messages.last().map(Message::content).unwrap_or("")
    }

    /// Text of the most recent user-authored message, scanning backward, or
    /// "" when the user has not written anything yet.
    pub fn last_user_text(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(Message::content)
            .unwrap_or("")
    }
}

/// Builds the field-based updater implementing the merge table above.
///
/// Installed via `StateGraph::with_state_updater`; applied after every node.
pub fn conversation_updater() -> BoxedStateUpdater<ConversationState> {
    Arc::new(FieldBasedUpdater::new(
        |current: &mut ConversationState, update: &ConversationState| {
            current.messages.extend(update.messages.iter().cloned());
            current.retrieved_documents = update.retrieved_documents.clone();
            current.answer = update.answer.clone();
            current.errors.extend(update.errors.iter().cloned());
            current.interest_score = current.interest_score.max(update.interest_score);
            current.contact_info = update.contact_info.clone();
            current.collecting_contact = update.collecting_contact;
            current.append_message = update.append_message.clone();
            current.lead_notified = update.lead_notified;
        },
    ))
}
