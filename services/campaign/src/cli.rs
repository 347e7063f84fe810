use std::path::PathBuf;

use clap::Parser;
use leadflow::campaign::options::{
    DEFAULT_MAX_DELAY_SECS, DEFAULT_MIN_DELAY_SECS, DEFAULT_SEND_LOG_PATH,
};
use leadflow::campaign::CampaignOptions;

/// Send a paced, personalised e-mail campaign to a JSON or CSV lead list.
#[derive(Parser, Debug)]
#[command(name = "send-campaign", version)]
pub(crate) struct CampaignArgs {
    /// Leads file (.json array of objects or .csv with a header row)
    #[arg(long)]
    leads: PathBuf,
    /// Template JSON with "subject" and "body"
    #[arg(long)]
    template: PathBuf,
    /// Only send to the first N leads
    #[arg(long = "max")]
    max_recipients: Option<usize>,
    /// Minimum pause between sends, in seconds
    #[arg(long, default_value_t = DEFAULT_MIN_DELAY_SECS)]
    min_delay: u64,
    /// Maximum pause between sends, in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY_SECS)]
    max_delay: u64,
    /// Append-only JSONL send log
    #[arg(long = "log", default_value = DEFAULT_SEND_LOG_PATH)]
    log_path: PathBuf,
    /// Render and log every message without contacting the relay
    #[arg(long)]
    dry_run: bool,
    /// Overrides the template's unsubscribeBaseUrl
    #[arg(long)]
    unsubscribe_base_url: Option<String>,
}

impl CampaignArgs {
    pub(crate) fn into_options(self) -> CampaignOptions {
        let mut options = CampaignOptions::new(self.leads, self.template);
        options.max_recipients = self.max_recipients;
        options.min_delay_secs = self.min_delay;
        options.max_delay_secs = self.max_delay;
        options.log_path = self.log_path;
        options.dry_run = self.dry_run;
        options.unsubscribe_base_url = self.unsubscribe_base_url;
        options
    }
}
