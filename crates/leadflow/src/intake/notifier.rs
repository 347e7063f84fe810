use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::domain::{Lead, LeadId};

/// Outbound hook told about each captured lead (e-mail notification services, CRMs).
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify(&self, lead: &Lead) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("notification endpoint rejected lead ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Body forwarded to the notification webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadNotification<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub budget: &'a str,
    pub urgency: &'a str,
    pub task_volume: &'a str,
    pub qualification_score: u8,
    pub qualified: bool,
    pub lead_id: &'a LeadId,
}

impl<'a> From<&'a Lead> for LeadNotification<'a> {
    fn from(lead: &'a Lead) -> Self {
        Self {
            name: &lead.name,
            email: &lead.email,
            message: &lead.message,
            budget: &lead.budget,
            urgency: &lead.urgency,
            task_volume: &lead.task_volume,
            qualification_score: lead.qualification_score,
            qualified: lead.qualified,
            lead_id: &lead.id,
        }
    }
}

/// Posts lead details as JSON to a form-notification webhook. A missing URL disables it.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl LeadNotifier for WebhookNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), NotifyError> {
        let Some(url) = self.url.as_deref() else {
            tracing::debug!(lead_id = %lead.id, "lead webhook disabled; skipping forward");
            return Ok(());
        };

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&LeadNotification::from(lead))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
