//! Paced bulk e-mail campaigns to a list of leads.
//!
//! A run loads the recipient list and template, verifies the relay once (unless
//! it is a dry run), then renders, delivers, and logs each message in turn with a
//! random pause between recipients.

pub mod leads;
pub mod options;
pub mod pacing;
pub mod runner;
pub mod send_log;
pub mod template;
pub mod unsubscribe;

pub use leads::{load_leads, parse_csv_leads, parse_csv_record, parse_json_leads, LeadRow, LeadsError};
pub use options::CampaignOptions;
pub use pacing::{DelayWindow, Sleeper, TokioSleeper};
pub use runner::{
    CampaignRunner, CampaignSummary, ConsoleProgress, Delivery, PersonalizedMessage, Progress,
};
pub use send_log::{SendLog, SendLogEntry, SendStatus};
pub use template::{render, MessageTemplate, TemplateError, TemplateVars};
pub use unsubscribe::{unsubscribe_link, unsubscribe_token, DEFAULT_UNSUBSCRIBE_BASE_URL};

use tracing::info;

use crate::journal::JournalError;
use crate::mail::{MailError, MailRelay};

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("{0}")]
    InvalidOption(String),
    #[error(transparent)]
    Leads(#[from] LeadsError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("relay verification failed: {0}")]
    RelayVerification(#[source] MailError),
    #[error("a mail relay is required unless --dry-run is set")]
    RelayRequired,
    #[error("unable to write send log: {0}")]
    Log(#[from] JournalError),
}

/// Run a campaign end to end. `relay` is ignored when `options.dry_run` is set.
pub async fn send_campaign<R, S, P>(
    options: &CampaignOptions,
    relay: Option<&R>,
    sleeper: S,
    progress: P,
) -> Result<CampaignSummary, CampaignError>
where
    R: MailRelay,
    S: Sleeper,
    P: Progress,
{
    let delays = options.validate()?;

    let mut leads = load_leads(&options.leads_path)?;
    if let Some(max) = options.max_recipients {
        leads.truncate(max);
    }
    let template = MessageTemplate::load(&options.template_path)?;

    let delivery = if options.dry_run {
        Delivery::DryRun
    } else {
        Delivery::Relay(relay.ok_or(CampaignError::RelayRequired)?)
    };

    let unsubscribe_base = options
        .unsubscribe_base_url
        .clone()
        .or_else(|| template.unsubscribe_base_url.clone())
        .unwrap_or_else(|| DEFAULT_UNSUBSCRIBE_BASE_URL.to_string());

    info!(
        leads = leads.len(),
        source = %options.leads_path.display(),
        dry_run = options.dry_run,
        "campaign loaded"
    );

    let runner = CampaignRunner::new(
        template,
        unsubscribe_base,
        delays,
        SendLog::new(&options.log_path),
        sleeper,
        progress,
    );
    runner.run(&leads, delivery).await
}
