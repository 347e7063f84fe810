use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::scoring::Qualification;

pub const LANDING_PAGE_SOURCE: &str = "landing_page";

const ID_SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a captured lead: `lead_<unix-millis>_<base36 suffix>`.
///
/// Uniqueness is best-effort; two submissions in the same millisecond can collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl LeadId {
    pub fn generate(now: DateTime<Utc>) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("lead_{}_{}", now.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw form payload as posted by the landing page.
///
/// Every field accepts any JSON scalar and keeps it as text, so `"budget": 500` is
/// stored as `"500"` and simply scores nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub urgency: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub task_volume: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// Stored lead record. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub budget: String,
    pub urgency: String,
    pub task_volume: String,
    pub qualification_score: u8,
    pub qualified: bool,
    pub source: String,
    #[serde(with = "crate::journal::rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Normalize a submission whose name and email are already known to be present.
    pub(crate) fn from_submission(
        id: LeadId,
        name: &str,
        email: &str,
        submission: &LeadSubmission,
        created_at: DateTime<Utc>,
    ) -> Self {
        let budget = submission.budget.clone().unwrap_or_default();
        let urgency = submission.urgency.clone().unwrap_or_default();
        let task_volume = submission.task_volume.clone().unwrap_or_default();
        let qualification = Qualification::assess(&budget, &urgency, &task_volume);

        Self {
            id,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            message: submission
                .message
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            budget,
            urgency,
            task_volume,
            qualification_score: qualification.score,
            qualified: qualification.qualified,
            source: LANDING_PAGE_SOURCE.to_string(),
            created_at,
        }
    }

    pub fn status_url(&self) -> String {
        format!("/status.html?id={}", self.id)
    }
}

/// Upsell tier offered to qualified leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOffer {
    pub key: &'static str,
    pub name: &'static str,
    pub price_eur: u32,
    pub description: &'static str,
}

pub const PACKAGE_CATALOG: [PackageOffer; 3] = [
    PackageOffer {
        key: "starter",
        name: "AI Starter",
        price_eur: 99,
        description: "Single automation workflow — perfect for one specific task",
    },
    PackageOffer {
        key: "growth",
        name: "AI Growth",
        price_eur: 249,
        description: "Multi-step automation + integrations — ideal for connected workflows",
    },
    PackageOffer {
        key: "pro",
        name: "AI Pro",
        price_eur: 499,
        description: "Full custom AI agent setup — voice, chat, and automation",
    },
];

/// Response returned to the form after a successful capture.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReceipt {
    pub success: bool,
    pub id: LeadId,
    pub qualified: bool,
    pub qualification_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<PackageOffer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
}

impl LeadReceipt {
    pub fn for_lead(lead: &Lead) -> Self {
        let (packages, status_url) = if lead.qualified {
            (Some(PACKAGE_CATALOG.to_vec()), Some(lead.status_url()))
        } else {
            (None, None)
        };

        Self {
            success: true,
            id: lead.id.clone(),
            qualified: lead.qualified,
            qualification_score: lead.qualification_score,
            packages,
            status_url,
        }
    }
}
