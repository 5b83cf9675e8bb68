//! Notification stage: best-effort delivery of the captured lead.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::WorkflowError;
use crate::graph::{Next, Node};
use crate::notify::{LeadNotification, Notifier};
use crate::state::ConversationState;

/// Posts the captured lead once and marks the thread notified.
///
/// Delivery failures are logged and never affect the user-visible answer;
/// there is no retry, so the notified flag is set regardless of outcome.
pub struct NotifyNode {
    notifier: Arc<dyn Notifier>,
}

impl NotifyNode {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Node<ConversationState> for NotifyNode {
    fn id(&self) -> &str {
        "notify"
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), WorkflowError> {
        let mut update = state.update_base();
        update.lead_notified = true;

        match state.contact_info.email.clone() {
            Some(email) => {
                let lead = LeadNotification::new(
                    state.contact_info.name.clone(),
                    email,
                    state.contact_info.company.clone(),
                    state.interest_score,
                );
                if let Err(e) = self.notifier.notify(&lead).await {
                    warn!(error = %e, "lead notification failed");
                }
            }
            None => {
                // Collected implies an email; reaching here means the
                // invariant broke upstream.
                warn!("notify stage reached without a captured email");
            }
        }

        Ok((update, Next::Continue))
    }
}
