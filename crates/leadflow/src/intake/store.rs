use std::path::PathBuf;

use super::domain::Lead;
use crate::journal::{Journal, JournalError};

/// Append-only persistence for captured leads.
pub trait LeadStore: Send + Sync {
    fn append(&self, lead: &Lead) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Journal(#[from] JournalError),
}

/// Lead store backed by a JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonlLeadStore {
    journal: Journal,
}

impl JsonlLeadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            journal: Journal::new(path),
        }
    }
}

impl LeadStore for JsonlLeadStore {
    fn append(&self, lead: &Lead) -> Result<(), StoreError> {
        self.journal.append(lead)?;
        Ok(())
    }
}
