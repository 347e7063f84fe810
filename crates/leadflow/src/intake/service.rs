use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{Lead, LeadId, LeadReceipt, LeadSubmission};
use super::notifier::LeadNotifier;
use super::store::{LeadStore, StoreError};

/// Service composing validation, scoring, persistence, and the notification forward.
pub struct LeadIntakeService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> LeadIntakeService<S, N>
where
    S: LeadStore + 'static,
    N: LeadNotifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Capture a lead: validate, score, persist, then forward without letting the
    /// forward affect the outcome.
    pub async fn submit(&self, submission: LeadSubmission) -> Result<LeadReceipt, IntakeError> {
        let (name, email) = match (
            present(submission.name.as_deref()),
            present(submission.email.as_deref()),
        ) {
            (Some(name), Some(email)) => (name, email),
            _ => return Err(IntakeError::MissingContact),
        };

        let now = Utc::now();
        let lead = Lead::from_submission(LeadId::generate(now), name, email, &submission, now);

        self.store.append(&lead)?;
        info!(
            lead_id = %lead.id,
            score = lead.qualification_score,
            qualified = lead.qualified,
            "lead captured"
        );

        if let Err(err) = self.notifier.notify(&lead).await {
            warn!(lead_id = %lead.id, error = %err, "lead forward failed (non-blocking)");
        }

        Ok(LeadReceipt::for_lead(&lead))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Name and email required")]
    MissingContact,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::domain::Lead;
    use crate::intake::notifier::NotifyError;
    use crate::journal::JournalError;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        leads: Mutex<Vec<Lead>>,
    }

    impl LeadStore for MemoryStore {
        fn append(&self, lead: &Lead) -> Result<(), StoreError> {
            self.leads.lock().expect("store mutex").push(lead.clone());
            Ok(())
        }
    }

    struct BrokenStore;

    impl LeadStore for BrokenStore {
        fn append(&self, _lead: &Lead) -> Result<(), StoreError> {
            Err(StoreError::Journal(JournalError::Write {
                path: PathBuf::from("data/leads.jsonl"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            }))
        }
    }

    #[derive(Default)]
    struct FailingNotifier {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl LeadNotifier for FailingNotifier {
        async fn notify(&self, _lead: &Lead) -> Result<(), NotifyError> {
            *self.calls.lock().expect("notifier mutex") += 1;
            Err(NotifyError::Rejected {
                status: 503,
                body: "maintenance".to_string(),
            })
        }
    }

    fn submission(name: Option<&str>, email: Option<&str>) -> LeadSubmission {
        LeadSubmission {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            budget: Some("500+".to_string()),
            urgency: Some("asap".to_string()),
            task_volume: Some("medium".to_string()),
            ..LeadSubmission::default()
        }
    }

    #[tokio::test]
    async fn forward_failure_does_not_reach_caller() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(FailingNotifier::default());
        let service = LeadIntakeService::new(store.clone(), notifier.clone());

        let receipt = service
            .submit(submission(Some("Ann"), Some("ANN@example.com")))
            .await
            .expect("capture succeeds");

        assert!(receipt.success);
        assert!(receipt.qualified);
        assert_eq!(receipt.qualification_score, 85);
        assert_eq!(*notifier.calls.lock().unwrap(), 1);

        let leads = store.leads.lock().unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].email, "ann@example.com");
        assert_eq!(leads[0].id, receipt.id);
    }

    #[tokio::test]
    async fn missing_or_blank_contact_is_rejected_before_persisting() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(FailingNotifier::default());
        let service = LeadIntakeService::new(store.clone(), notifier.clone());

        for (name, email) in [
            (None, Some("ann@example.com")),
            (Some("Ann"), None),
            (Some("   "), Some("ann@example.com")),
        ] {
            let err = service
                .submit(submission(name, email))
                .await
                .expect_err("contact required");
            assert!(matches!(err, IntakeError::MissingContact));
        }

        assert!(store.leads.lock().unwrap().is_empty());
        assert_eq!(*notifier.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn store_failure_skips_forward() {
        let notifier = Arc::new(FailingNotifier::default());
        let service = LeadIntakeService::new(Arc::new(BrokenStore), notifier.clone());

        let err = service
            .submit(submission(Some("Ann"), Some("ann@example.com")))
            .await
            .expect_err("store failure surfaces");

        assert!(matches!(err, IntakeError::Store(_)));
        assert_eq!(*notifier.calls.lock().unwrap(), 0);
    }
}
