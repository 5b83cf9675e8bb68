//! LLM client abstraction for the scoring and generation stages.
//!
//! Both stages depend on a callable that turns a message list into assistant
//! text; this module defines the trait and ships [`ChatOpenAI`] (real API)
//! and [`MockLlm`] (scripted replies, for tests and offline runs).

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::WorkflowError;
use crate::message::Message;

/// LLM chat capability: given messages, returns assistant text.
///
/// Used once per cycle by the interest-evaluation stage and once by the
/// generation stage. Callers own their failure policy; this trait only
/// reports the error.
///
/// **Interaction**: Injected into the workflow as `Arc<dyn LlmClient>`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion: read messages, return assistant content.
    async fn complete(&self, messages: &[Message]) -> Result<String, WorkflowError>;
}
