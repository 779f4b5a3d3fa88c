use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};

use super::columns::{
    admit, columns_from_candidates, find_candidate, total_count, PipelineColumn,
};
use super::domain::{Candidate, CandidateId, PipelineStage};
use super::drag::{DragAdapter, DragEvent};
use super::error::PipelineError;
use super::filter::{filter_board, ColumnFilter, FilteredBoard};
use super::notify::NotificationSink;
use super::projection::{
    all_filtered_candidates, stage_breakdown, PipelineSummary, StageCountEntry,
};
use super::transition::{move_candidate, MoveOutcome, StageChangeNotice};
use super::upload::{next_candidate_id, UploadError, UploadGate, UploadRequest};

/// Single owner of the board state. Views and intents go through here.
pub struct PipelineService<N> {
    board: Mutex<Vec<PipelineColumn>>,
    drag: Mutex<DragAdapter>,
    uploads: UploadGate,
    notifications: Arc<N>,
}

impl<N> PipelineService<N>
where
    N: NotificationSink + 'static,
{
    pub fn new(
        candidates: Vec<Candidate>,
        notifications: Arc<N>,
        upload_latency: Duration,
    ) -> Self {
        Self::from_columns(
            columns_from_candidates(candidates),
            notifications,
            upload_latency,
        )
    }

    pub fn from_columns(
        columns: Vec<PipelineColumn>,
        notifications: Arc<N>,
        upload_latency: Duration,
    ) -> Self {
        Self {
            board: Mutex::new(columns),
            drag: Mutex::new(DragAdapter::new()),
            uploads: UploadGate::new(upload_latency),
            notifications,
        }
    }

    fn board(&self) -> Result<MutexGuard<'_, Vec<PipelineColumn>>, PipelineServiceError> {
        self.board
            .lock()
            .map_err(|_| PipelineServiceError::StatePoisoned)
    }

    /// Unfiltered copy of the board.
    pub fn snapshot(&self) -> Result<Vec<PipelineColumn>, PipelineServiceError> {
        Ok(self.board()?.clone())
    }

    pub fn columns(&self, filter: &ColumnFilter) -> Result<FilteredBoard, PipelineServiceError> {
        let board = self.board()?;
        Ok(filter_board(&board, filter))
    }

    pub fn list(&self, filter: &ColumnFilter) -> Result<Vec<Candidate>, PipelineServiceError> {
        let filtered = self.columns(filter)?;
        Ok(all_filtered_candidates(&filtered.columns))
    }

    /// Header statistics always use the unfiltered board.
    pub fn summary(&self) -> Result<PipelineSummary, PipelineServiceError> {
        Ok(PipelineSummary::from_columns(&self.board()?))
    }

    /// Summary and per-stage counts taken from one view of the board, so the counts always add
    /// up to the summary total.
    pub fn overview(
        &self,
    ) -> Result<(PipelineSummary, Vec<StageCountEntry>), PipelineServiceError> {
        let board = self.board()?;
        Ok((PipelineSummary::from_columns(&board), stage_breakdown(&board)))
    }

    pub fn candidate(&self, candidate_id: &CandidateId) -> Result<Candidate, PipelineServiceError> {
        let board = self.board()?;
        find_candidate(&board, candidate_id).cloned().ok_or_else(|| {
            PipelineError::CandidateNotFound {
                candidate_id: candidate_id.clone(),
            }
            .into()
        })
    }

    /// Explicit move request (list view menu, API). Unknown ids are reported to the caller.
    pub fn move_candidate(
        &self,
        candidate_id: &CandidateId,
        target_stage: PipelineStage,
    ) -> Result<Option<StageChangeNotice>, PipelineServiceError> {
        let mut board = self.board()?;
        let outcome = move_candidate(&board, candidate_id, target_stage)?;
        Ok(self.commit(&mut board, outcome))
    }

    /// Feed one drag event through the adapter. Stale drops are swallowed by the adapter.
    pub fn handle_drag(
        &self,
        event: DragEvent,
    ) -> Result<Option<StageChangeNotice>, PipelineServiceError> {
        let mut board = self.board()?;
        let mut drag = self
            .drag
            .lock()
            .map_err(|_| PipelineServiceError::StatePoisoned)?;
        Ok(match drag.handle(&board, event) {
            Some(outcome) => self.commit(&mut board, outcome),
            None => None,
        })
    }

    /// Run the simulated upload and admit the new candidate into `APPLIED`.
    ///
    /// A generated id that is already on the board is replaced with the next free one.
    pub async fn upload(&self, request: UploadRequest) -> Result<Candidate, PipelineServiceError> {
        let mut candidate = self.uploads.submit(request, Utc::now()).await?;
        let mut board = self.board()?;
        while !admit(&mut board, candidate.clone()) {
            warn!(candidate_id = %candidate.id, "generated candidate id already taken");
            candidate.id = next_candidate_id();
        }
        info!(
            candidate_id = %candidate.id,
            total_candidates = total_count(&board),
            "candidate added to pipeline"
        );
        Ok(candidate)
    }

    pub fn upload_in_flight(&self) -> bool {
        self.uploads.is_in_flight()
    }

    fn commit(
        &self,
        board: &mut Vec<PipelineColumn>,
        outcome: MoveOutcome,
    ) -> Option<StageChangeNotice> {
        let MoveOutcome { columns, notice } = outcome;
        *board = columns;

        if let Some(notice) = &notice {
            if let Err(err) = self.notifications.notify(notice.clone()) {
                warn!(error = %err, candidate_id = %notice.candidate_id, "move notice not delivered");
            }
        }
        notice
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineServiceError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("pipeline state lock poisoned")]
    StatePoisoned,
}
