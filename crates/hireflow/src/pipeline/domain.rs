use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PipelineError;

pub const MAX_AI_SCORE: u8 = 100;

/// Identifier wrapper for candidates tracked on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Fixed pipeline phases. Declaration order is the board's column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl PipelineStage {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Applied,
            Self::Screening,
            Self::Interview,
            Self::Offer,
            Self::Hired,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    /// Lower-case label used in move notices ("moved to screening").
    pub const fn notice_label(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Applied => "APPLIED",
            Self::Screening => "SCREENING",
            Self::Interview => "INTERVIEW",
            Self::Offer => "OFFER",
            Self::Hired => "HIRED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Terminal stages are excluded from "in progress" aggregates.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PipelineStage {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ordered()
            .into_iter()
            .find(|stage| normalized.eq_ignore_ascii_case(stage.code()))
            .ok_or_else(|| PipelineError::InvalidStage {
                value: value.to_string(),
            })
    }
}

/// A candidate record as supplied by the intake side of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub applied_position: String,
    pub applied_date: DateTime<Utc>,
    pub stage: PipelineStage,
    #[serde(
        default,
        deserialize_with = "deserialize_ai_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_score: Option<u8>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<String>,
}

impl Candidate {
    /// Build a freshly applied candidate. Optional contact data, score and skills start empty.
    pub fn applied(
        id: CandidateId,
        full_name: impl Into<String>,
        applied_position: impl Into<String>,
        applied_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: None,
            phone: None,
            applied_position: applied_position.into(),
            applied_date,
            stage: PipelineStage::Applied,
            ai_score: None,
            skills: Vec::new(),
            cv_file_name: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_stage(mut self, stage: PipelineStage) -> Self {
        self.stage = stage;
        self
    }

    /// Scores above 100 are clamped; the board treats the value as opaque otherwise.
    pub fn with_ai_score(mut self, score: u8) -> Self {
        self.ai_score = Some(score.min(MAX_AI_SCORE));
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

fn deserialize_ai_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u8>::deserialize(deserializer)? {
        Some(score) if score > MAX_AI_SCORE => Err(de::Error::custom(format!(
            "ai_score {score} is outside 0-{MAX_AI_SCORE}"
        ))),
        score => Ok(score),
    }
}
