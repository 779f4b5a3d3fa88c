//! Adapter between drag gestures reported by the board UI and the transition engine.
//!
//! Pointer recognition stays with the UI library; this module only sees the start/over/end
//! contract and keeps the candidate that is currently being dragged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::columns::{find_candidate, PipelineColumn};
use super::domain::{Candidate, CandidateId, PipelineStage};
use super::error::PipelineError;
use super::transition::{move_candidate, MoveOutcome};

/// Drag events as emitted by the board's drag-and-drop library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragEvent {
    Start { candidate_id: CandidateId },
    Over { target: Option<PipelineStage> },
    End { target: Option<PipelineStage> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Candidate),
}

#[derive(Debug, Default)]
pub struct DragAdapter {
    state: DragState,
    hovered: Option<PipelineStage>,
}

impl DragAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn dragged(&self) -> Option<&Candidate> {
        match &self.state {
            DragState::Dragging(candidate) => Some(candidate),
            _ => None,
        }
    }

    /// Column currently under the pointer, for highlighting only.
    pub fn hovered(&self) -> Option<PipelineStage> {
        self.hovered
    }

    pub fn handle(
        &mut self,
        columns: &[PipelineColumn],
        event: DragEvent,
    ) -> Option<MoveOutcome> {
        match event {
            DragEvent::Start { candidate_id } => {
                self.drag_start(columns, &candidate_id);
                None
            }
            DragEvent::Over { target } => {
                self.drag_over(target);
                None
            }
            DragEvent::End { target } => self.drag_end(columns, target),
        }
    }

    pub fn drag_start(&mut self, columns: &[PipelineColumn], candidate_id: &CandidateId) {
        self.hovered = None;
        self.state = match find_candidate(columns, candidate_id) {
            Some(candidate) => DragState::Dragging(candidate.clone()),
            None => {
                warn!(candidate_id = %candidate_id, "drag started for unknown candidate");
                DragState::Idle
            }
        };
    }

    pub fn drag_over(&mut self, target: Option<PipelineStage>) {
        if matches!(self.state, DragState::Dragging(_)) {
            self.hovered = target;
        }
    }

    /// Finish the gesture. Returns the transition when the drop changed the board.
    ///
    /// The adapter is idle again on return whatever the outcome. A candidate that vanished from
    /// the board between start and drop is logged and ignored.
    pub fn drag_end(
        &mut self,
        columns: &[PipelineColumn],
        target: Option<PipelineStage>,
    ) -> Option<MoveOutcome> {
        let state = std::mem::take(&mut self.state);
        self.hovered = None;

        match (state, target) {
            (DragState::Dragging(candidate), Some(stage)) => {
                match move_candidate(columns, &candidate.id, stage) {
                    Ok(outcome) if outcome.is_noop() => None,
                    Ok(outcome) => Some(outcome),
                    Err(PipelineError::CandidateNotFound { candidate_id }) => {
                        warn!(candidate_id = %candidate_id, "dropped candidate is no longer on the board");
                        None
                    }
                    Err(err) => {
                        warn!(error = %err, "drop rejected");
                        None
                    }
                }
            }
            (DragState::Dragging(candidate), None) => {
                debug!(candidate_id = %candidate.id, "drag cancelled outside any column");
                None
            }
            (DragState::Idle, _) => None,
        }
    }

    /// Abandon an in-progress gesture (navigation away, escape key).
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
        self.hovered = None;
    }
}
