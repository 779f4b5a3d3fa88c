use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::pipeline::notify::InMemoryNotifications;
use crate::pipeline::router::{jobs_router, pipeline_router};
use crate::pipeline::seed::demo_jobs;
use crate::pipeline::service::PipelineService;
use crate::pipeline::upload::UploadRequest;

fn router() -> (axum::Router, Arc<InMemoryNotifications>) {
    let (service, notifications) = build_service();
    (pipeline_router(Arc::new(service)), notifications)
}

#[tokio::test]
async fn columns_route_applies_query_and_score() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::get("/api/v1/pipeline/columns?query=front&score=high")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_candidates"], 7);
    assert_eq!(payload["filtered_total"], 2);
    assert_eq!(payload["has_active_filters"], true);
    assert_eq!(payload["columns"].as_array().map(Vec::len), Some(6));
    assert_eq!(payload["columns"][0]["id"], "APPLIED");
    assert_eq!(payload["columns"][0]["count"], 1);
}

#[tokio::test]
async fn columns_route_rejects_unknown_score_bucket() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::get("/api/v1/pipeline/columns?score=stellar")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stage_route_moves_candidate() {
    let (app, notifications) = router();
    let response = app
        .oneshot(
            Request::post("/api/v1/pipeline/candidates/3/stage")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "stage": "interview" }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["moved"], true);
    assert_eq!(payload["stage"], "INTERVIEW");
    assert_eq!(payload["message"], "Alan Turing moved to interview");
    assert_eq!(notifications.events().len(), 1);
}

#[tokio::test]
async fn stage_route_returns_not_found_for_unknown_candidate() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::post("/api/v1/pipeline/candidates/ghost/stage")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "stage": "HIRED" }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stage_route_rejects_unknown_stage() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::post("/api/v1/pipeline/candidates/3/stage")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "stage": "ONBOARDING" }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("ONBOARDING"));
}

#[tokio::test]
async fn summary_handler_reports_conversion() {
    let (service, _) = build_service();
    let response = crate::pipeline::router::summary_handler::<InMemoryNotifications>(State(
        Arc::new(service),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_candidates"], 7);
    assert_eq!(payload["in_progress_count"], 5);
    assert_eq!(payload["hired_count"], 1);
    assert_eq!(payload["conversion_rate"], 14);
    let stages = payload["stages"].as_array().expect("stages array");
    assert_eq!(stages.len(), 6);
    let staged: u64 = stages
        .iter()
        .map(|entry| entry["count"].as_u64().expect("count"))
        .sum();
    assert_eq!(staged, 7);
}

#[tokio::test]
async fn upload_route_accepts_cv() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::post("/api/v1/pipeline/uploads")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "file_name": "resume.pdf",
                        "full_name": "Margaret Hamilton",
                        "applied_position": "Flight Software Engineer",
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["stage"], "APPLIED");
    assert_eq!(payload["cv_file_name"], "resume.pdf");
}

#[tokio::test]
async fn upload_route_rejects_unsupported_file() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::post("/api/v1/pipeline/uploads")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "file_name": "resume.exe",
                        "full_name": "Margaret Hamilton",
                        "applied_position": "Flight Software Engineer",
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn candidate_route_returns_record() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::get("/api/v1/pipeline/candidates/4")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["candidate"]["full_name"], "Barbara Liskov");
    assert_eq!(payload["candidate"]["ai_score"], 64);
    assert!(payload["score_breakdown"]["skills_match"].is_u64());
}

#[tokio::test]
async fn jobs_route_filters_by_status() {
    let today = applied_at().date_naive();
    let app = jobs_router(Arc::new(demo_jobs(today)));
    let response = app
        .oneshot(
            Request::get("/api/v1/jobs?status=open&query=engineer")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let jobs = payload["jobs"].as_array().expect("jobs array");
    assert!(!jobs.is_empty());
    assert!(jobs.iter().all(|job| job["status"] == "open"));
}

#[tokio::test]
async fn candidate_route_returns_not_found_for_unknown_id() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::get("/api/v1/pipeline/candidates/ghost")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("ghost"));
}

#[tokio::test]
async fn candidate_route_omits_breakdown_for_unscored_candidate() {
    let (app, _) = router();
    let response = app
        .oneshot(
            Request::get("/api/v1/pipeline/candidates/3")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["candidate"]["full_name"], "Alan Turing");
    assert!(payload["candidate"].get("ai_score").is_none());
    assert!(payload["score_breakdown"].is_null());
}

#[tokio::test]
async fn upload_route_conflicts_while_another_upload_is_running() {
    let service = Arc::new(PipelineService::new(
        roster(),
        Arc::new(InMemoryNotifications::default()),
        Duration::from_millis(200),
    ));
    let app = pipeline_router(service.clone());

    let first = service.upload(UploadRequest {
        file_name: "hamilton.pdf".to_string(),
        full_name: "Margaret Hamilton".to_string(),
        email: None,
        phone: None,
        applied_position: "Flight Software Engineer".to_string(),
        skills: Vec::new(),
    });
    let second = async {
        // Let the first upload take the gate before the route is called.
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.oneshot(
            Request::post("/api/v1/pipeline/uploads")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "file_name": "resume.pdf",
                        "full_name": "Radia Perlman",
                        "applied_position": "Network Engineer",
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds")
    };

    let (first, response) = tokio::join!(first, second);
    first.expect("first upload completes");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("already in progress"));
    assert_eq!(service.summary().expect("summary").total_candidates, 8);
}

#[tokio::test]
async fn jobs_route_rejects_unknown_status() {
    let today = applied_at().date_naive();
    let app = jobs_router(Arc::new(demo_jobs(today)));
    let response = app
        .oneshot(
            Request::get("/api/v1/jobs?status=archived")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("archived"));
}
