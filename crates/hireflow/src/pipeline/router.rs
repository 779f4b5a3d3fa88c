use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateId, PipelineStage};
use super::error::PipelineError;
use super::filter::{ColumnFilter, ScoreFilter};
use super::jobs::{filter_jobs, JobPosting, JobStatus};
use super::notify::NotificationSink;
use super::scoring::ScoreBreakdown;
use super::service::{PipelineService, PipelineServiceError};
use super::upload::{UploadError, UploadRequest};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BoardQuery {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    score: Option<String>,
}

impl BoardQuery {
    fn into_filter(self) -> Result<ColumnFilter, PipelineError> {
        let score = match self.score.as_deref() {
            Some(raw) => raw.parse::<ScoreFilter>()?,
            None => ScoreFilter::All,
        };
        Ok(ColumnFilter::new(self.query.unwrap_or_default(), score))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageChangeRequest {
    stage: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobQuery {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Router exposing the board views, stage changes, and CV uploads.
pub fn pipeline_router<N>(service: Arc<PipelineService<N>>) -> Router
where
    N: NotificationSink + 'static,
{
    Router::new()
        .route("/api/v1/pipeline/columns", get(columns_handler::<N>))
        .route("/api/v1/pipeline/candidates", get(list_handler::<N>))
        .route("/api/v1/pipeline/summary", get(summary_handler::<N>))
        .route(
            "/api/v1/pipeline/candidates/:candidate_id",
            get(candidate_handler::<N>),
        )
        .route(
            "/api/v1/pipeline/candidates/:candidate_id/stage",
            post(stage_handler::<N>),
        )
        .route("/api/v1/pipeline/uploads", post(upload_handler::<N>))
        .with_state(service)
}

pub fn jobs_router(jobs: Arc<Vec<JobPosting>>) -> Router {
    Router::new()
        .route("/api/v1/jobs", get(jobs_handler))
        .with_state(jobs)
}

pub(crate) async fn columns_handler<N>(
    State(service): State<Arc<PipelineService<N>>>,
    Query(query): Query<BoardQuery>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let result = query
        .into_filter()
        .map_err(PipelineServiceError::from)
        .and_then(|filter| service.columns(&filter));
    match result {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<N>(
    State(service): State<Arc<PipelineService<N>>>,
    Query(query): Query<BoardQuery>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let result = query
        .into_filter()
        .map_err(PipelineServiceError::from)
        .and_then(|filter| service.list(&filter));
    match result {
        Ok(candidates) => {
            let payload = json!({
                "count": candidates.len(),
                "candidates": candidates,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn summary_handler<N>(State(service): State<Arc<PipelineService<N>>>) -> Response
where
    N: NotificationSink + 'static,
{
    match service.overview() {
        Ok((summary, stages)) => {
            let payload = json!({
                "total_candidates": summary.total_candidates,
                "in_progress_count": summary.in_progress_count,
                "hired_count": summary.hired_count,
                "conversion_rate": summary.conversion_rate,
                "stages": stages,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn candidate_handler<N>(
    State(service): State<Arc<PipelineService<N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    N: NotificationSink + 'static,
{
    match service.candidate(&CandidateId(candidate_id)) {
        Ok(candidate) => {
            let score_breakdown = ScoreBreakdown::for_candidate(&candidate);
            let payload = json!({
                "candidate": candidate,
                "score_breakdown": score_breakdown,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stage_handler<N>(
    State(service): State<Arc<PipelineService<N>>>,
    Path(candidate_id): Path<String>,
    axum::Json(request): axum::Json<StageChangeRequest>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let id = CandidateId(candidate_id);
    let result = request
        .stage
        .parse::<PipelineStage>()
        .map_err(PipelineServiceError::from)
        .and_then(|stage| service.move_candidate(&id, stage).map(|notice| (stage, notice)));

    match result {
        Ok((stage, notice)) => {
            let payload = json!({
                "candidate_id": id,
                "stage": stage,
                "moved": notice.is_some(),
                "message": notice.map(|notice| notice.message()),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn upload_handler<N>(
    State(service): State<Arc<PipelineService<N>>>,
    axum::Json(request): axum::Json<UploadRequest>,
) -> Response
where
    N: NotificationSink + 'static,
{
    match service.upload(request).await {
        Ok(candidate) => (StatusCode::ACCEPTED, axum::Json(candidate)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn jobs_handler(
    State(jobs): State<Arc<Vec<JobPosting>>>,
    Query(query): Query<JobQuery>,
) -> Response {
    let status = match query.status.as_deref().map(str::parse::<JobStatus>).transpose() {
        Ok(status) => status,
        Err(err) => return error_response(err.into()),
    };

    let matches = filter_jobs(&jobs, query.query.as_deref().unwrap_or_default(), status);
    let payload = json!({
        "count": matches.len(),
        "jobs": matches,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(err: PipelineServiceError) -> Response {
    let status = match &err {
        PipelineServiceError::Pipeline(PipelineError::CandidateNotFound { .. }) => {
            StatusCode::NOT_FOUND
        }
        PipelineServiceError::Pipeline(_) => StatusCode::BAD_REQUEST,
        PipelineServiceError::Upload(UploadError::InFlight) => StatusCode::CONFLICT,
        PipelineServiceError::Upload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineServiceError::StatePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
