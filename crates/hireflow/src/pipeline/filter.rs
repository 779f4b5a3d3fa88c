use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::columns::{total_count, PipelineColumn};
use super::domain::Candidate;
use super::error::PipelineError;

/// Score bucket applied on top of the text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl ScoreFilter {
    pub const HIGH_THRESHOLD: u8 = 85;
    pub const MEDIUM_THRESHOLD: u8 = 70;

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// A missing score never matches a bucket; only `All` lets it through.
    pub fn matches(self, ai_score: Option<u8>) -> bool {
        match (self, ai_score) {
            (Self::All, _) => true,
            (_, None) => false,
            (Self::High, Some(score)) => score >= Self::HIGH_THRESHOLD,
            (Self::Medium, Some(score)) => {
                (Self::MEDIUM_THRESHOLD..Self::HIGH_THRESHOLD).contains(&score)
            }
            (Self::Low, Some(score)) => score < Self::MEDIUM_THRESHOLD,
        }
    }
}

impl FromStr for ScoreFilter {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(PipelineError::InvalidScoreFilter {
                value: value.to_string(),
            }),
        }
    }
}

/// Search text and score bucket currently applied to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub score: ScoreFilter,
}

impl ColumnFilter {
    pub fn new(query: impl Into<String>, score: ScoreFilter) -> Self {
        Self {
            query: query.into(),
            score,
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty() || self.score != ScoreFilter::All
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        matches_query(candidate, &self.query) && self.score.matches(candidate.ai_score)
    }
}

/// Filtered board together with the before/after totals shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredBoard {
    pub columns: Vec<PipelineColumn>,
    pub total_candidates: usize,
    pub filtered_total: usize,
    pub has_active_filters: bool,
}

/// Return new columns holding only candidates that satisfy every active predicate.
///
/// Counts are recomputed from the filtered membership. The input is left untouched so clearing
/// the filters can go back to it.
pub fn filter_columns(
    columns: &[PipelineColumn],
    query: &str,
    score_filter: ScoreFilter,
) -> Vec<PipelineColumn> {
    let filter = ColumnFilter::new(query, score_filter);
    columns
        .iter()
        .map(|column| {
            let candidates = column
                .candidates
                .iter()
                .filter(|candidate| filter.matches(candidate))
                .cloned()
                .collect();
            PipelineColumn::new(column.id, candidates)
        })
        .collect()
}

pub fn filter_board(columns: &[PipelineColumn], filter: &ColumnFilter) -> FilteredBoard {
    let filtered = filter_columns(columns, &filter.query, filter.score);
    let total_candidates = total_count(columns);
    let filtered_total = total_count(&filtered);
    debug!(
        query = %filter.query,
        score = filter.score.label(),
        total_candidates,
        filtered_total,
        "filtered pipeline columns"
    );

    FilteredBoard {
        columns: filtered,
        total_candidates,
        filtered_total,
        has_active_filters: filter.has_active_filters(),
    }
}

/// Case-insensitive substring match on name, position, or e-mail. Blank queries match everything.
pub(crate) fn matches_query(candidate: &Candidate, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
    contains(&candidate.full_name)
        || contains(&candidate.applied_position)
        || candidate.email.as_deref().is_some_and(contains)
}
