//! The conversation workflow: retrieve -> score interest -> optionally
//! collect contact -> generate -> optionally notify.
//!
//! [`Chatbot`] wires the five stage nodes into a [`StateGraph`] over
//! [`ConversationState`] with the per-field reducer, and drives one run per
//! inbound user message: load the thread's checkpoint, append the
//! utterance, invoke the graph (which saves the new checkpoint), return the
//! answer. Runs for the same thread are serialized through a per-thread
//! lock; different threads proceed concurrently.

mod contact;
mod extract;
mod generate;
mod interest;
mod notify_node;
mod prompts;
mod retrieve;
mod router;

pub use contact::ContactNode;
pub use extract::{contact_patterns, parse_interest_score, ContactPatterns};
pub use generate::GenerateNode;
pub use interest::{InterestNode, MIN_MESSAGES_FOR_SCORING, SCORING_WINDOW};
pub use notify_node::NotifyNode;
pub use prompts::{
    answer_system_prompt, contact_request, format_context, render_transcript, thank_you,
    GENERATION_APOLOGY, INTEREST_RUBRIC, NO_CONTEXT_PLACEHOLDER,
};
pub use retrieve::{RetrieveNode, DEFAULT_TOP_K};
pub use router::{after_generate, after_interest, Route, INTEREST_THRESHOLD};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::WorkflowError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::memory::{Checkpointer, RunnableConfig};
use crate::message::Message;
use crate::notify::Notifier;
use crate::retriever::Retriever;
use crate::state::{conversation_updater, ConversationState};

/// Node ids in the workflow graph.
pub const RETRIEVE: &str = "retrieve";
pub const SCORE_INTEREST: &str = "score_interest";
pub const COLLECT_CONTACT: &str = "collect_contact";
pub const GENERATE: &str = "generate";
pub const NOTIFY: &str = "notify";

/// External capabilities the workflow consumes.
///
/// Explicit dependency injection: the collaborators are constructor
/// arguments, not captured environment.
pub struct Capabilities {
    pub llm: Arc<dyn LlmClient>,
    pub retriever: Arc<dyn Retriever>,
    pub notifier: Arc<dyn Notifier>,
    pub checkpointer: Arc<dyn Checkpointer<ConversationState>>,
}

/// The FAQ chatbot: compiled workflow graph plus thread bookkeeping.
pub struct Chatbot {
    graph: CompiledStateGraph<ConversationState>,
    checkpointer: Arc<dyn Checkpointer<ConversationState>>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Chatbot {
    /// Builds the workflow graph over the given capabilities, requesting
    /// `top_k` documents per retrieval.
    pub fn new(capabilities: Capabilities, top_k: usize) -> Result<Self, CompilationError> {
        let checkpointer = Arc::clone(&capabilities.checkpointer);
        let graph = build_graph(capabilities, top_k)?;
        Ok(Self {
            graph,
            checkpointer,
            locks: DashMap::new(),
        })
    }

    /// Handles one user utterance for `thread_id` and returns the answer.
    ///
    /// The state read at the start reflects all mutations committed by the
    /// preceding run for the thread: runs per thread are serialized here,
    /// and the graph persists the final state before returning.
    pub async fn respond(&self, thread_id: &str, user_text: &str) -> Result<String, WorkflowError> {
        let lock = self
            .locks
            .entry(thread_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let config = RunnableConfig::for_thread(thread_id);
        let mut state = self
            .checkpointer
            .get(&config)
            .await
            .map_err(|e| WorkflowError::ExecutionFailed(format!("load checkpoint: {}", e)))?
            .map(|checkpoint| checkpoint.state)
            .unwrap_or_default();

        state.messages.push(Message::user(user_text));
        info!(thread = %thread_id, messages = state.messages.len(), "workflow run starting");

        let state = self.graph.invoke(state, Some(&config)).await?;
        Ok(state.answer)
    }
}

/// Wires nodes, edges, and routing into a compiled graph.
fn build_graph(
    capabilities: Capabilities,
    top_k: usize,
) -> Result<CompiledStateGraph<ConversationState>, CompilationError> {
    let Capabilities {
        llm,
        retriever,
        notifier,
        checkpointer,
    } = capabilities;

    let mut graph =
        StateGraph::<ConversationState>::new().with_state_updater(conversation_updater());

    graph
        .add_node(RETRIEVE, Arc::new(RetrieveNode::new(retriever, top_k)))
        .add_node(SCORE_INTEREST, Arc::new(InterestNode::new(Arc::clone(&llm))))
        .add_node(COLLECT_CONTACT, Arc::new(ContactNode::new()))
        .add_node(GENERATE, Arc::new(GenerateNode::new(llm)))
        .add_node(NOTIFY, Arc::new(NotifyNode::new(notifier)));

    graph
        .add_edge(START, RETRIEVE)
        .add_edge(RETRIEVE, SCORE_INTEREST)
        .add_edge(COLLECT_CONTACT, GENERATE)
        .add_edge(NOTIFY, END);

    graph.add_conditional_edges(
        SCORE_INTEREST,
        Arc::new(|state: &ConversationState| after_interest(state).key().to_string()),
        Some(
            [
                (Route::CollectContact.key().to_string(), COLLECT_CONTACT.to_string()),
                (Route::Generate.key().to_string(), GENERATE.to_string()),
            ]
            .into_iter()
            .collect(),
        ),
    );
    graph.add_conditional_edges(
        GENERATE,
        Arc::new(|state: &ConversationState| after_generate(state).key().to_string()),
        Some(
            [
                (Route::Notify.key().to_string(), NOTIFY.to_string()),
                (Route::End.key().to_string(), END.to_string()),
            ]
            .into_iter()
            .collect(),
        ),
    );

    graph.compile_with_checkpointer(checkpointer)
}
