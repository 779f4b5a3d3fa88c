use super::common::*;
use crate::pipeline::domain::{CandidateId, PipelineStage};
use crate::pipeline::drag::{DragAdapter, DragEvent, DragState};

#[test]
fn drag_start_captures_candidate() {
    let columns = board();
    let mut adapter = DragAdapter::new();
    adapter.drag_start(&columns, &CandidateId::new("3"));

    let dragged = adapter.dragged().expect("dragging");
    assert_eq!(dragged.full_name, "Alan Turing");
}

#[test]
fn drag_start_with_unknown_id_stays_idle() {
    let mut adapter = DragAdapter::new();
    adapter.drag_start(&board(), &CandidateId::new("ghost"));
    assert_eq!(adapter.state(), &DragState::Idle);
    assert!(adapter.dragged().is_none());
}

#[test]
fn drop_on_column_moves_candidate_and_resets() {
    let columns = board();
    let mut adapter = DragAdapter::new();

    assert!(adapter
        .handle(&columns, DragEvent::Start { candidate_id: CandidateId::new("3") })
        .is_none());
    assert!(adapter
        .handle(&columns, DragEvent::Over { target: Some(PipelineStage::Offer) })
        .is_none());
    assert_eq!(adapter.hovered(), Some(PipelineStage::Offer));

    let outcome = adapter
        .handle(&columns, DragEvent::End { target: Some(PipelineStage::Offer) })
        .expect("drop moves candidate");

    assert_eq!(ids(column(&outcome.columns, PipelineStage::Offer)), vec!["5", "3"]);
    assert_eq!(
        outcome.notice.expect("notice").target_stage_label,
        "offer"
    );
    assert_eq!(adapter.state(), &DragState::Idle);
    assert_eq!(adapter.hovered(), None);
}

#[test]
fn drag_over_never_mutates_columns() {
    let columns = board();
    let snapshot = columns.clone();
    let mut adapter = DragAdapter::new();
    adapter.drag_start(&columns, &CandidateId::new("1"));
    for stage in PipelineStage::ordered() {
        adapter.drag_over(Some(stage));
    }
    adapter.drag_over(None);
    assert_eq!(columns, snapshot);
    assert!(adapter.dragged().is_some());
}

#[test]
fn drop_outside_any_column_cancels() {
    let columns = board();
    let mut adapter = DragAdapter::new();
    adapter.drag_start(&columns, &CandidateId::new("1"));

    assert!(adapter.drag_end(&columns, None).is_none());
    assert_eq!(adapter.state(), &DragState::Idle);
}

#[test]
fn drop_on_own_column_is_a_noop() {
    let columns = board();
    let mut adapter = DragAdapter::new();
    adapter.drag_start(&columns, &CandidateId::new("1"));

    assert!(adapter
        .drag_end(&columns, Some(PipelineStage::Applied))
        .is_none());
    assert_eq!(adapter.state(), &DragState::Idle);
}

#[test]
fn stale_drop_is_swallowed() {
    let columns = board();
    let mut adapter = DragAdapter::new();
    adapter.drag_start(&columns, &CandidateId::new("1"));

    // The candidate disappears from the board between start and drop.
    let stale: Vec<_> = columns
        .iter()
        .cloned()
        .map(|mut column| {
            column.candidates.retain(|candidate| candidate.id.as_str() != "1");
            column.count = column.candidates.len();
            column
        })
        .collect();

    assert!(adapter.drag_end(&stale, Some(PipelineStage::Hired)).is_none());
    assert_eq!(adapter.state(), &DragState::Idle);
}

#[test]
fn drop_without_start_is_ignored() {
    let columns = board();
    let mut adapter = DragAdapter::new();
    assert!(adapter
        .drag_end(&columns, Some(PipelineStage::Hired))
        .is_none());
}

#[test]
fn cancel_abandons_gesture() {
    let columns = board();
    let mut adapter = DragAdapter::new();
    adapter.drag_start(&columns, &CandidateId::new("2"));
    adapter.drag_over(Some(PipelineStage::Offer));
    adapter.cancel();
    assert_eq!(adapter.state(), &DragState::Idle);
    assert_eq!(adapter.hovered(), None);
}

#[test]
fn drag_events_deserialize_from_tagged_json() {
    let event: DragEvent =
        serde_json::from_str(r#"{"type":"end","target":"HIRED"}"#).expect("parses");
    assert_eq!(
        event,
        DragEvent::End {
            target: Some(PipelineStage::Hired)
        }
    );
}
