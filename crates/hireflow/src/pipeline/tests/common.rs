use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::pipeline::columns::{columns_from_candidates, PipelineColumn};
use crate::pipeline::domain::{Candidate, CandidateId, PipelineStage};
use crate::pipeline::notify::InMemoryNotifications;
use crate::pipeline::service::PipelineService;

pub(super) fn applied_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 12, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn candidate(id: &str, name: &str, position: &str, stage: PipelineStage) -> Candidate {
    Candidate::applied(CandidateId::new(id), name, position, applied_at()).with_stage(stage)
}

pub(super) fn roster() -> Vec<Candidate> {
    vec![
        candidate("1", "Ada Lovelace", "Frontend Developer", PipelineStage::Applied)
            .with_email("ada@analytical.engine")
            .with_ai_score(92),
        candidate("2", "Grace Hopper", "Backend Engineer", PipelineStage::Applied)
            .with_ai_score(72),
        candidate("3", "Alan Turing", "Data Scientist", PipelineStage::Screening),
        candidate("4", "Barbara Liskov", "Staff Engineer", PipelineStage::Interview)
            .with_email("liskov@substitution.dev")
            .with_ai_score(64),
        candidate("5", "Edsger Dijkstra", "Frontend Lead", PipelineStage::Offer)
            .with_ai_score(85),
        candidate("6", "Katherine Johnson", "Data Analyst", PipelineStage::Hired)
            .with_ai_score(70),
        candidate("7", "Dennis Ritchie", "Systems Engineer", PipelineStage::Rejected)
            .with_ai_score(69),
    ]
}

pub(super) fn board() -> Vec<PipelineColumn> {
    columns_from_candidates(roster())
}

pub(super) fn column(columns: &[PipelineColumn], stage: PipelineStage) -> &PipelineColumn {
    columns
        .iter()
        .find(|column| column.id == stage)
        .expect("column present")
}

pub(super) fn ids(column: &PipelineColumn) -> Vec<&str> {
    column
        .candidates
        .iter()
        .map(|candidate| candidate.id.as_str())
        .collect()
}

/// Every candidate appears exactly once and every count matches its list.
pub(super) fn assert_partition(columns: &[PipelineColumn], expected: &HashSet<String>) {
    let mut seen = HashSet::new();
    for column in columns {
        assert_eq!(column.count, column.candidates.len(), "count drift in {:?}", column.id);
        for candidate in &column.candidates {
            assert_eq!(candidate.stage, column.id, "stage tag mismatch");
            assert!(
                seen.insert(candidate.id.0.clone()),
                "candidate {} appears twice",
                candidate.id
            );
        }
    }
    assert_eq!(&seen, expected);
}

pub(super) fn roster_ids() -> HashSet<String> {
    roster().into_iter().map(|candidate| candidate.id.0).collect()
}

pub(super) fn build_service() -> (
    PipelineService<InMemoryNotifications>,
    Arc<InMemoryNotifications>,
) {
    let notifications = Arc::new(InMemoryNotifications::default());
    let service = PipelineService::new(
        roster(),
        notifications.clone(),
        Duration::from_millis(5),
    );
    (service, notifications)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
