//! Shared test doubles for workflow integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use docent::notify::{LeadNotification, Notifier, NotifyError};
use docent::retriever::{Retriever, RetrieverError, ScoredDocument};

/// Retriever returning a fixed document list, truncated to `k`.
pub struct StaticRetriever {
    docs: Vec<ScoredDocument>,
}

impl StaticRetriever {
    pub fn new(docs: Vec<ScoredDocument>) -> Self {
        Self { docs }
    }

    pub fn empty() -> Self {
        Self { docs: Vec::new() }
    }

    pub fn single(content: &str, title: &str) -> Self {
        Self::new(vec![ScoredDocument {
            content: content.to_string(),
            title: Some(title.to_string()),
            source_url: Some("https://docs.test/page".to_string()),
            score: 0.9,
        }])
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    async fn search(&self, _query: &str, k: usize) -> Result<Vec<ScoredDocument>, RetrieverError> {
        Ok(self.docs.iter().take(k).cloned().collect())
    }
}

/// Retriever whose every call fails.
pub struct FailingRetriever;

#[async_trait]
impl Retriever for FailingRetriever {
    async fn search(&self, _query: &str, _k: usize) -> Result<Vec<ScoredDocument>, RetrieverError> {
        Err(RetrieverError::Storage("vector store unreachable".into()))
    }
}

/// Notifier recording every delivered lead; can be set to fail delivery.
pub struct RecordingNotifier {
    pub leads: Mutex<Vec<LeadNotification>>,
    fail: bool,
    calls: AtomicUsize,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            leads: Mutex::new(Vec::new()),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            leads: Mutex::new(Vec::new()),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Delivery("webhook returned 500".into()));
        }
        self.leads
            .lock()
            .expect("notifier mutex")
            .push(lead.clone());
        Ok(())
    }
}
