//! Mock LLM client with scripted replies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::WorkflowError;
use crate::llm::LlmClient;
use crate::message::Message;

/// Scripted `LlmClient` for tests and offline runs.
///
/// Replies are popped from a queue in order; when the queue is empty the
/// fixed fallback reply is returned. `failing()` builds a client whose
/// every call errors, for exercising stage failure policies.
pub struct MockLlm {
    replies: Mutex<VecDeque<String>>,
    fallback: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockLlm {
    /// Always replies with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: reply.into(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Replies from `replies` in order, then with the last entry repeated.
    pub fn with_replies<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let queue: VecDeque<String> = replies.into_iter().map(Into::into).collect();
        let fallback = queue.back().cloned().unwrap_or_default();
        Self {
            replies: Mutex::new(queue),
            fallback,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call returns an error.
    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _messages: &[Message]) -> Result<String, WorkflowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(WorkflowError::ExecutionFailed("mock llm failure".into()));
        }
        let mut queue = self
            .replies
            .lock()
            .map_err(|_| WorkflowError::ExecutionFailed("mock llm poisoned".into()))?;
        Ok(queue.pop_front().unwrap_or_else(|| self.fallback.clone()))
    }
}
