//! Landing-page lead capture: scoring, persistence, and the notification forward.

pub mod domain;
pub mod notifier;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Lead, LeadId, LeadReceipt, LeadSubmission, PackageOffer, LANDING_PAGE_SOURCE,
    PACKAGE_CATALOG,
};
pub use notifier::{LeadNotification, LeadNotifier, NotifyError, WebhookNotifier};
pub use router::lead_router;
pub use scoring::{
    qualification_score, BudgetTier, Qualification, TaskVolumeTier, UrgencyTier,
    QUALIFICATION_THRESHOLD,
};
pub use service::{IntakeError, LeadIntakeService};
pub use store::{JsonlLeadStore, LeadStore, StoreError};
