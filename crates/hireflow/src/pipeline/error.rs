use super::domain::CandidateId;

/// Referential-integrity failures raised by the pipeline core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("candidate {candidate_id} not found in any column")]
    CandidateNotFound { candidate_id: CandidateId },
    #[error("unknown pipeline stage '{value}'")]
    InvalidStage { value: String },
    #[error("unknown score filter '{value}' (expected all, high, medium, or low)")]
    InvalidScoreFilter { value: String },
    #[error("unknown job status '{value}' (expected open, paused, or closed)")]
    InvalidJobStatus { value: String },
}
