use tracing::info;

use super::leads::LeadRow;
use super::pacing::{DelayWindow, Sleeper};
use super::send_log::{SendLog, SendLogEntry};
use super::template::{render, MessageTemplate, TemplateVars};
use super::unsubscribe::{unsubscribe_footer, unsubscribe_link, unsubscribe_token};
use super::CampaignError;
use crate::mail::{MailRelay, OutboundMessage};

/// How a run delivers its messages.
pub enum Delivery<'a, R> {
    /// Render and log every message without contacting the relay.
    DryRun,
    Relay(&'a R),
}

/// Counts reported once a run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignSummary {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
}

/// A message rendered for a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalizedMessage {
    pub recipient: String,
    pub subject: String,
    pub text: String,
}

/// Receives the per-recipient progress lines of a run.
pub trait Progress: Send + Sync {
    fn note(&self, line: &str);
    fn alert(&self, line: &str);
}

/// Progress on the terminal: notes to stdout, alerts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn note(&self, line: &str) {
        println!("{line}");
    }

    fn alert(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// Sends one template to a list of leads, strictly one at a time.
pub struct CampaignRunner<S, P> {
    template: MessageTemplate,
    unsubscribe_base: String,
    delays: DelayWindow,
    log: SendLog,
    sleeper: S,
    progress: P,
}

impl<S: Sleeper, P: Progress> CampaignRunner<S, P> {
    pub fn new(
        template: MessageTemplate,
        unsubscribe_base: impl Into<String>,
        delays: DelayWindow,
        log: SendLog,
        sleeper: S,
        progress: P,
    ) -> Self {
        Self {
            template,
            unsubscribe_base: unsubscribe_base.into(),
            delays,
            log,
            sleeper,
            progress,
        }
    }

    pub fn personalize(&self, lead: &LeadRow, recipient: &str) -> PersonalizedMessage {
        let token = unsubscribe_token(recipient);
        let link = unsubscribe_link(&self.unsubscribe_base, recipient, &token);

        let footer = unsubscribe_footer(&link);

        let mut vars: TemplateVars = lead.fields().clone();
        vars.insert("email".to_string(), recipient.to_string());
        vars.insert("unsubscribe_token".to_string(), token);
        vars.insert("unsubscribe_link".to_string(), link);

        let subject = render(&self.template.subject, &vars);
        let mut text = render(&self.template.body, &vars);
        text.push_str(&footer);

        PersonalizedMessage {
            recipient: recipient.to_string(),
            subject,
            text,
        }
    }

    /// Deliver to every lead in order. Per-recipient failures are logged and counted;
    /// relay verification and send-log failures abort the run.
    pub async fn run<R: MailRelay>(
        &self,
        leads: &[LeadRow],
        delivery: Delivery<'_, R>,
    ) -> Result<CampaignSummary, CampaignError> {
        if let Delivery::Relay(relay) = &delivery {
            relay.verify().await.map_err(CampaignError::RelayVerification)?;
        }

        let mut summary = CampaignSummary {
            total: leads.len(),
            ..CampaignSummary::default()
        };

        for (index, lead) in leads.iter().enumerate() {
            let position = index + 1;

            let Some(recipient) = lead.recipient() else {
                summary.failed += 1;
                self.log.record(&SendLogEntry::missing_email())?;
                self.progress
                    .alert(&format!("Skipping lead {position}: missing email field."));
                continue;
            };

            let message = self.personalize(lead, recipient);
            match &delivery {
                Delivery::DryRun => {
                    summary.sent += 1;
                    self.log
                        .record(&SendLogEntry::dry_run(&message.recipient, &message.subject))?;
                    self.progress.note(&format!(
                        "[DRY RUN {position}/{}] {} | {}",
                        summary.total, message.recipient, message.subject
                    ));
                }
                Delivery::Relay(relay) => {
                    let outbound = OutboundMessage::text(
                        message.recipient.as_str(),
                        message.subject.as_str(),
                        message.text.as_str(),
                    );
                    match relay.send(&outbound).await {
                        Ok(message_id) => {
                            summary.sent += 1;
                            self.progress.note(&format!(
                                "[SENT {position}/{}] {} | messageId={}",
                                summary.total,
                                message.recipient,
                                if message_id.is_empty() { "n/a" } else { message_id.as_str() }
                            ));
                            self.log.record(&SendLogEntry::sent(
                                &message.recipient,
                                &message.subject,
                                message_id,
                            ))?;
                        }
                        Err(err) => {
                            summary.failed += 1;
                            self.progress.alert(&format!(
                                "[FAILED {position}/{}] {} | {err}",
                                summary.total, message.recipient
                            ));
                            self.log.record(&SendLogEntry::failed(
                                &message.recipient,
                                &message.subject,
                                err.to_string(),
                            ))?;
                        }
                    }
                }
            }

            if position < summary.total {
                let delay = self.delays.sample(&mut rand::thread_rng());
                self.progress
                    .note(&format!("Waiting {}s before next send...", delay.as_secs()));
                self.sleeper.sleep(delay).await;
            }
        }

        info!(
            sent = summary.sent,
            failed = summary.failed,
            total = summary.total,
            "campaign finished"
        );
        Ok(summary)
    }
}
