use std::path::PathBuf;

use super::pacing::DelayWindow;
use super::CampaignError;

pub const DEFAULT_MIN_DELAY_SECS: u64 = 20;
pub const DEFAULT_MAX_DELAY_SECS: u64 = 60;
pub const DEFAULT_SEND_LOG_PATH: &str = "data/campaign-sends.jsonl";

/// Everything a campaign run needs besides the relay itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignOptions {
    pub leads_path: PathBuf,
    pub template_path: PathBuf,
    /// Cap on recipients taken from the top of the leads file; `None` sends to all.
    pub max_recipients: Option<usize>,
    pub min_delay_secs: u64,
    pub max_delay_secs: u64,
    pub log_path: PathBuf,
    pub dry_run: bool,
    pub unsubscribe_base_url: Option<String>,
}

impl CampaignOptions {
    pub fn new(leads_path: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
        Self {
            leads_path: leads_path.into(),
            template_path: template_path.into(),
            max_recipients: None,
            min_delay_secs: DEFAULT_MIN_DELAY_SECS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
            log_path: PathBuf::from(DEFAULT_SEND_LOG_PATH),
            dry_run: false,
            unsubscribe_base_url: None,
        }
    }

    pub fn validate(&self) -> Result<DelayWindow, CampaignError> {
        if self.max_recipients == Some(0) {
            return Err(CampaignError::InvalidOption(
                "--max must be a positive number".to_string(),
            ));
        }
        DelayWindow::new(self.min_delay_secs, self.max_delay_secs)
    }
}
