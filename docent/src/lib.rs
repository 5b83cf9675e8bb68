//! Docent: a retrieval-augmented FAQ chatbot with lead capture.
//!
//! The core is a conversation workflow state machine: retrieve supporting
//! documents, score lead interest, optionally collect contact details,
//! generate a grounded answer, and notify a webhook when a lead is
//! captured. Stages are graph nodes over a shared [`ConversationState`]
//! whose fields merge through per-field reducers; routing between stages is
//! pure functions over the merged state.
//!
//! # Layout
//!
//! - [`graph`]: generic state-graph runtime (nodes, edges, conditional
//!   routing, state updaters, compile/invoke)
//! - [`state`]: the conversation state and its reducer
//! - [`workflow`]: the five stage nodes, routing policy, and the
//!   [`Chatbot`] facade
//! - [`llm`], [`retriever`], [`notify`]: collaborator capabilities
//! - [`memory`]: checkpoint persistence per conversation thread
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docent::memory::MemorySaver;
//! use docent::retriever::{OpenAiEmbedder, VectorRetriever};
//! use docent::notify::SlackNotifier;
//! use docent::llm::ChatOpenAI;
//! use docent::workflow::{Capabilities, Chatbot, DEFAULT_TOP_K};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = Arc::new(OpenAiEmbedder::default_model());
//! let chatbot = Chatbot::new(
//!     Capabilities {
//!         llm: Arc::new(ChatOpenAI::new("gpt-4o-mini")),
//!         retriever: Arc::new(VectorRetriever::new(embedder)),
//!         notifier: Arc::new(SlackNotifier::new(None)),
//!         checkpointer: Arc::new(MemorySaver::new()),
//!     },
//!     DEFAULT_TOP_K,
//! )?;
//! let answer = chatbot.respond("thread-1", "How do I reset my password?").await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod notify;
pub mod retriever;
pub mod state;
pub mod workflow;

pub use error::WorkflowError;
pub use message::Message;
pub use state::{ContactInfo, ConversationState, RetrievedDocument};
pub use workflow::{Capabilities, Chatbot};
