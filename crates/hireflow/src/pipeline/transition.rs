use serde::Serialize;
use tracing::info;

use super::columns::{column_index_or_insert, locate, PipelineColumn};
use super::domain::{CandidateId, PipelineStage};
use super::error::PipelineError;

/// Message handed to the notification collaborator after a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageChangeNotice {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub target_stage_label: &'static str,
}

impl StageChangeNotice {
    pub fn message(&self) -> String {
        format!(
            "{} moved to {}",
            self.candidate_name, self.target_stage_label
        )
    }
}

/// Result of a transition request. `notice` is `None` for same-stage moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub columns: Vec<PipelineColumn>,
    pub notice: Option<StageChangeNotice>,
}

impl MoveOutcome {
    pub fn is_noop(&self) -> bool {
        self.notice.is_none()
    }
}

/// Move a candidate to `target_stage`, appending it to the end of the target column.
///
/// Moving a candidate onto its own stage returns the columns unchanged. Any stage can reach any
/// other, including moving a rejected candidate back into the pipeline.
pub fn move_candidate(
    columns: &[PipelineColumn],
    candidate_id: &CandidateId,
    target_stage: PipelineStage,
) -> Result<MoveOutcome, PipelineError> {
    let (source_index, position) =
        locate(columns, candidate_id).ok_or_else(|| PipelineError::CandidateNotFound {
            candidate_id: candidate_id.clone(),
        })?;

    let current_stage = columns[source_index].candidates[position].stage;
    if current_stage == target_stage {
        return Ok(MoveOutcome {
            columns: columns.to_vec(),
            notice: None,
        });
    }

    let mut next = columns.to_vec();
    let mut candidate = next[source_index].candidates.remove(position);
    next[source_index].recount();

    candidate.stage = target_stage;
    let notice = StageChangeNotice {
        candidate_id: candidate.id.clone(),
        candidate_name: candidate.full_name.clone(),
        target_stage_label: target_stage.notice_label(),
    };

    let target_index = column_index_or_insert(&mut next, target_stage);
    next[target_index].candidates.push(candidate);
    next[target_index].recount();

    info!(
        candidate_id = %candidate_id,
        from = current_stage.code(),
        to = target_stage.code(),
        "candidate moved"
    );

    Ok(MoveOutcome {
        columns: next,
        notice: Some(notice),
    })
}
