//! Candidate pipeline: six fixed stages, the filter/search engine, stage transitions, drag
//! handling, and the projections the candidates page renders.

pub mod columns;
pub mod domain;
pub mod drag;
mod error;
pub mod filter;
pub mod jobs;
pub mod notify;
pub mod projection;
pub mod router;
pub mod scoring;
pub mod seed;
pub mod service;
pub mod session;
pub mod transition;
pub mod upload;

#[cfg(test)]
mod tests;

pub use columns::{columns_from_candidates, find_candidate, total_count, PipelineColumn};
pub use domain::{Candidate, CandidateId, PipelineStage};
pub use drag::{DragAdapter, DragEvent, DragState};
pub use error::PipelineError;
pub use filter::{filter_board, filter_columns, ColumnFilter, FilteredBoard, ScoreFilter};
pub use jobs::{filter_jobs, JobPosting, JobStatus};
pub use notify::{InMemoryNotifications, NotificationError, NotificationSink, TracingNotifications};
pub use projection::{all_filtered_candidates, PipelineSummary, StageCountEntry};
pub use router::{jobs_router, pipeline_router};
pub use scoring::ScoreBreakdown;
pub use service::{PipelineService, PipelineServiceError};
pub use transition::{move_candidate, MoveOutcome, StageChangeNotice};
pub use upload::{UploadError, UploadGate, UploadRequest};
