//! Slack incoming-webhook notifier.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::notify::{LeadNotification, Notifier, NotifyError};

/// Posts captured leads to a Slack incoming webhook as one text message.
///
/// Built with `Option<url>` so deployments without a webhook can still wire
/// the workflow; `notify` then returns [`NotifyError::NotConfigured`] and
/// the notify stage logs it.
pub struct SlackNotifier {
    webhook_url: Option<String>,
    http: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            http: reqwest::Client::new(),
        }
    }

    /// Message body: header line plus one labeled line per field.
    fn format_message(lead: &LeadNotification) -> String {
        let mut lines = vec!["New lead captured".to_string()];
        lines.push(format!("Name: {}", lead.name.as_deref().unwrap_or("-")));
        lines.push(format!("Email: {}", lead.email));
        lines.push(format!(
            "Company: {}",
            lead.company.as_deref().unwrap_or("-")
        ));
        lines.push(format!("Interest score: {}/10", lead.interest_score));
        lines.push(format!("Captured at: {}", lead.captured_at));
        lines.join("\n")
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(NotifyError::NotConfigured)?;

        let body = json!({ "text": Self::format_message(lead) });
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Delivery(format!(
                "webhook returned {}",
                response.status()
            )));
        }
        info!(email = %lead.email, "lead notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: the message carries every labeled field and the header.
    #[test]
    fn format_message_includes_all_fields() {
        let lead = LeadNotification {
            name: Some("Jane".into()),
            email: "jane@acme.test".into(),
            company: Some("Acme".into()),
            interest_score: 9,
            captured_at: "2025-06-01T12:00:00+00:00".into(),
        };
        let text = SlackNotifier::format_message(&lead);
        assert!(text.starts_with("New lead captured"));
        assert!(text.contains("Name: Jane"));
        assert!(text.contains("Email: jane@acme.test"));
        assert!(text.contains("Company: Acme"));
        assert!(text.contains("Interest score: 9/10"));
        assert!(text.contains("2025-06-01"));
    }

    /// **Scenario**: missing fields render as "-" instead of vanishing.
    #[test]
    fn format_message_dashes_for_missing() {
        let lead = LeadNotification {
            name: None,
            email: "a@b.test".into(),
            company: None,
            interest_score: 7,
            captured_at: "2025-06-01T12:00:00+00:00".into(),
        };
        let text = SlackNotifier::format_message(&lead);
        assert!(text.contains("Name: -"));
        assert!(text.contains("Company: -"));
    }

    /// **Scenario**: no webhook configured surfaces as NotConfigured.
    #[tokio::test]
    async fn unconfigured_webhook_errors() {
        let notifier = SlackNotifier::new(None);
        let lead = LeadNotification::new(None, "a@b.test".into(), None, 7);
        assert!(matches!(
            notifier.notify(&lead).await,
            Err(NotifyError::NotConfigured)
        ));
    }
}
