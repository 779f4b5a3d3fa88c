use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use super::domain::{Candidate, CandidateId, PipelineStage};

/// Candidates currently sitting in one stage, plus the cached count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineColumn {
    pub id: PipelineStage,
    pub title: &'static str,
    pub candidates: Vec<Candidate>,
    pub count: usize,
}

impl PipelineColumn {
    pub fn new(stage: PipelineStage, candidates: Vec<Candidate>) -> Self {
        let count = candidates.len();
        Self {
            id: stage,
            title: stage.label(),
            candidates,
            count,
        }
    }

    pub fn empty(stage: PipelineStage) -> Self {
        Self::new(stage, Vec::new())
    }

    pub fn contains(&self, candidate_id: &CandidateId) -> bool {
        self.candidates
            .iter()
            .any(|candidate| &candidate.id == candidate_id)
    }

    pub(crate) fn position(&self, candidate_id: &CandidateId) -> Option<usize> {
        self.candidates
            .iter()
            .position(|candidate| &candidate.id == candidate_id)
    }

    pub(crate) fn recount(&mut self) {
        self.count = self.candidates.len();
    }
}

/// Partition candidates into one column per stage, in stage order.
///
/// Empty stages still get a column. Relative order within a stage follows the input. A repeated
/// id keeps its first occurrence so the result stays a partition.
pub fn columns_from_candidates<I>(candidates: I) -> Vec<PipelineColumn>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut columns: Vec<PipelineColumn> = PipelineStage::ordered()
        .into_iter()
        .map(PipelineColumn::empty)
        .collect();
    let mut seen = HashSet::new();

    for candidate in candidates {
        if !seen.insert(candidate.id.clone()) {
            warn!(candidate_id = %candidate.id, "skipping duplicate candidate id");
            continue;
        }
        let index = stage_index(candidate.stage);
        columns[index].candidates.push(candidate);
    }

    for column in &mut columns {
        column.recount();
    }
    columns
}

pub(crate) fn stage_index(stage: PipelineStage) -> usize {
    PipelineStage::ordered()
        .iter()
        .position(|candidate_stage| *candidate_stage == stage)
        .unwrap_or_default()
}

/// Locate the column holding `candidate_id`, returning the column index and position within it.
pub(crate) fn locate(
    columns: &[PipelineColumn],
    candidate_id: &CandidateId,
) -> Option<(usize, usize)> {
    columns.iter().enumerate().find_map(|(column_index, column)| {
        column
            .position(candidate_id)
            .map(|position| (column_index, position))
    })
}

/// Look up a candidate anywhere on the board.
pub fn find_candidate<'a>(
    columns: &'a [PipelineColumn],
    candidate_id: &CandidateId,
) -> Option<&'a Candidate> {
    locate(columns, candidate_id).map(|(column, position)| &columns[column].candidates[position])
}

/// Index of the column for `stage`, inserting an empty one in stage order if it is missing.
pub(crate) fn column_index_or_insert(
    columns: &mut Vec<PipelineColumn>,
    stage: PipelineStage,
) -> usize {
    if let Some(index) = columns.iter().position(|column| column.id == stage) {
        return index;
    }
    let insert_at = columns
        .iter()
        .position(|column| stage_index(column.id) > stage_index(stage))
        .unwrap_or(columns.len());
    columns.insert(insert_at, PipelineColumn::empty(stage));
    insert_at
}

/// Append a new candidate to the end of its stage column. Returns false if the id is already on
/// the board.
pub(crate) fn admit(columns: &mut Vec<PipelineColumn>, candidate: Candidate) -> bool {
    if locate(columns, &candidate.id).is_some() {
        return false;
    }
    let index = column_index_or_insert(columns, candidate.stage);
    columns[index].candidates.push(candidate);
    columns[index].recount();
    true
}

/// Sum of cached counts across the given columns.
pub fn total_count(columns: &[PipelineColumn]) -> usize {
    columns.iter().map(|column| column.count).sum()
}
