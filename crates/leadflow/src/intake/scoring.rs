//! Qualification scoring for landing-page intake answers.

use serde::Serialize;

/// Leads scoring strictly above this value are considered sales-ready.
pub const QUALIFICATION_THRESHOLD: u8 = 60;
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Unspecified,
    Entry,
    Mid,
    Premium,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 4] = [
        BudgetTier::Unspecified,
        BudgetTier::Entry,
        BudgetTier::Mid,
        BudgetTier::Premium,
    ];

    pub fn from_answer(answer: &str) -> Self {
        match answer {
            "500+" => Self::Premium,
            "250-499" => Self::Mid,
            "99-249" => Self::Entry,
            _ => Self::Unspecified,
        }
    }

    pub fn points(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Entry => 10,
            Self::Mid => 25,
            Self::Premium => 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyTier {
    Unspecified,
    ThisMonth,
    ThisWeek,
    Asap,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Unspecified,
        UrgencyTier::ThisMonth,
        UrgencyTier::ThisWeek,
        UrgencyTier::Asap,
    ];

    pub fn from_answer(answer: &str) -> Self {
        match answer {
            "asap" => Self::Asap,
            "this-week" => Self::ThisWeek,
            "this-month" => Self::ThisMonth,
            _ => Self::Unspecified,
        }
    }

    pub fn points(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::ThisMonth => 10,
            Self::ThisWeek => 20,
            Self::Asap => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskVolumeTier {
    Unspecified,
    Medium,
    High,
}

impl TaskVolumeTier {
    pub const ALL: [TaskVolumeTier; 3] = [
        TaskVolumeTier::Unspecified,
        TaskVolumeTier::Medium,
        TaskVolumeTier::High,
    ];

    pub fn from_answer(answer: &str) -> Self {
        match answer {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Unspecified,
        }
    }

    pub fn points(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Medium => 15,
            Self::High => 30,
        }
    }
}

/// Score plus the derived qualification flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    pub score: u8,
    pub qualified: bool,
}

impl Qualification {
    pub fn from_score(score: u8) -> Self {
        let score = score.min(MAX_SCORE);
        Self {
            score,
            qualified: score > QUALIFICATION_THRESHOLD,
        }
    }

    pub fn assess(budget: &str, urgency: &str, task_volume: &str) -> Self {
        Self::from_score(qualification_score(
            BudgetTier::from_answer(budget),
            UrgencyTier::from_answer(urgency),
            TaskVolumeTier::from_answer(task_volume),
        ))
    }
}

pub fn qualification_score(
    budget: BudgetTier,
    urgency: UrgencyTier,
    task_volume: TaskVolumeTier,
) -> u8 {
    let total = u16::from(budget.points())
        + u16::from(urgency.points())
        + u16::from(task_volume.points());
    total.min(u16::from(MAX_SCORE)) as u8
}
