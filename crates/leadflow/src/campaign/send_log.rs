use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::journal::{Journal, JournalError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    Sent,
    Failed,
    DryRun,
}

/// One line of the campaign send log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendLogEntry {
    #[serde(with = "crate::journal::rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub status: SendStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_response_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendLogEntry {
    pub fn missing_email() -> Self {
        Self {
            timestamp: Utc::now(),
            recipient: None,
            subject: None,
            status: SendStatus::Failed,
            provider_response_id: None,
            error: Some("Lead missing email field".to_string()),
        }
    }

    pub fn dry_run(recipient: &str, subject: &str) -> Self {
        Self::attempt(recipient, subject, SendStatus::DryRun)
    }

    pub fn sent(recipient: &str, subject: &str, message_id: String) -> Self {
        Self {
            provider_response_id: Some(message_id).filter(|id| !id.is_empty()),
            ..Self::attempt(recipient, subject, SendStatus::Sent)
        }
    }

    pub fn failed(recipient: &str, subject: &str, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::attempt(recipient, subject, SendStatus::Failed)
        }
    }

    fn attempt(recipient: &str, subject: &str, status: SendStatus) -> Self {
        Self {
            timestamp: Utc::now(),
            recipient: Some(recipient.to_string()),
            subject: Some(subject.to_string()),
            status,
            provider_response_id: None,
            error: None,
        }
    }
}

/// Append-only record of every campaign send attempt.
#[derive(Debug, Clone)]
pub struct SendLog {
    journal: Journal,
}

impl SendLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            journal: Journal::new(path),
        }
    }

    pub fn record(&self, entry: &SendLogEntry) -> Result<(), JournalError> {
        self.journal.append(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_in_snake_case() {
        let value = serde_json::to_value(SendLogEntry::dry_run("a@x.com", "Hi")).expect("json");
        assert_eq!(value["status"], "dry_run");
        assert_eq!(value["recipient"], "a@x.com");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn timestamp_is_written_with_millisecond_precision() {
        let mut entry = SendLogEntry::sent("a@x.com", "Hi", "<id@relay>".to_string());
        entry.timestamp =
            DateTime::from_timestamp(1_700_000_000, 123_456_789).expect("valid timestamp");

        let value = serde_json::to_value(&entry).expect("json");
        assert_eq!(value["timestamp"], "2023-11-14T22:13:20.123Z");
        assert_eq!(value["providerResponseId"], "<id@relay>");

        let back: SendLogEntry = serde_json::from_value(value).expect("entry parses");
        assert_eq!(back.timestamp.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn missing_email_entry_has_null_recipient() {
        let value = serde_json::to_value(SendLogEntry::missing_email()).expect("json");
        assert_eq!(value["status"], "failed");
        assert!(value["recipient"].is_null());
        assert!(value["subject"].is_null());
        assert_eq!(value["error"], "Lead missing email field");
    }

    #[test]
    fn sent_entry_keeps_provider_id() {
        let entry = SendLogEntry::sent("a@x.com", "Hi", "<abc@relay>".to_string());
        let value = serde_json::to_value(&entry).expect("json");
        assert_eq!(value["providerResponseId"], "<abc@relay>");
    }
}
