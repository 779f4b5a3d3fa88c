use chrono::Utc;
use hireflow::pipeline::seed::{demo_candidates, demo_jobs};
use hireflow::pipeline::{JobPosting, NotificationSink, PipelineService, ScoreFilter};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Pipeline service seeded with the mock board.
pub(crate) fn seeded_service<N>(
    upload_latency: Duration,
    notifications: Arc<N>,
) -> PipelineService<N>
where
    N: NotificationSink + 'static,
{
    PipelineService::new(demo_candidates(Utc::now()), notifications, upload_latency)
}

pub(crate) fn seeded_jobs() -> Arc<Vec<JobPosting>> {
    Arc::new(demo_jobs(Utc::now().date_naive()))
}

pub(crate) fn parse_score_filter(raw: &str) -> Result<ScoreFilter, String> {
    raw.parse::<ScoreFilter>().map_err(|err| err.to_string())
}
