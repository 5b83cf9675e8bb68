//! Lead notification sink.
//!
//! When contact details are captured, the workflow posts one structured
//! message to an external webhook. Delivery is best-effort: the notify
//! stage logs failures and the run always proceeds to termination.

mod slack;

pub use slack::SlackNotifier;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// No webhook URL configured for this deployment.
    #[error("webhook not configured")]
    NotConfigured,
    /// Request failed or the sink returned a non-success status.
    #[error("delivery: {0}")]
    Delivery(String),
}

/// One captured lead, ready for delivery.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LeadNotification {
    pub name: Option<String>,
    pub email: String,
    pub company: Option<String>,
    pub interest_score: u8,
    /// RFC 3339 capture timestamp.
    pub captured_at: String,
}

impl LeadNotification {
    /// Lead stamped with the current time.
    pub fn new(
        name: Option<String>,
        email: String,
        company: Option<String>,
        interest_score: u8,
    ) -> Self {
        Self {
            name,
            email,
            company,
            interest_score,
            captured_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Notification sink: one POST per captured lead, no retry.
///
/// **Interaction**: Injected into the workflow as `Arc<dyn Notifier>`;
/// called by the notify stage, which logs (and never propagates) errors.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `lead` once. Success means the sink acknowledged receipt.
    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError>;
}
