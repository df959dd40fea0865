use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::pipeline::router::{intake_router, submit_handler};
use crate::pipeline::SubmissionRequest;

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn submit_handler_rejects_missing_sender() {
    let (orchestrator, _) = build_orchestrator();
    let orchestrator = Arc::new(orchestrator);
    let request = SubmissionRequest {
        sender_id: String::new(),
        sender_name: "John Smith".to_string(),
        message: "resume".to_string(),
        file_path: None,
        file_type: None,
        received_at: None,
    };

    let response = submit_handler(State(orchestrator.clone()), axum::Json(request))
        .await
        .expect_err("validation fails");
    let response = axum::response::IntoResponse::into_response(response);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "invalid submission: Sender ID and name are required"
    );
    assert!(orchestrator.pending().is_empty());
}

#[tokio::test]
async fn submit_route_queues_valid_payloads() {
    let (orchestrator, _) = build_orchestrator();
    let router = intake_router(Arc::new(orchestrator));

    let response = router
        .oneshot(post_json(
            "/api/v1/submissions",
            &json!({
                "sender_id": "9876543210",
                "sender_name": "John Smith",
                "message": JOHN_SMITH_RESUME,
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "queued");
    assert_eq!(body["queue"]["pending_messages"], 1);
}

#[tokio::test]
async fn process_route_drains_and_reports() {
    let (orchestrator, sink) = build_orchestrator();
    let orchestrator = Arc::new(orchestrator);
    orchestrator.receive(text_submission("John Smith", JOHN_SMITH_RESUME));
    orchestrator.receive(blank_submission("Rajesh Kumar"));
    let router = intake_router(orchestrator.clone());

    let pending = router
        .clone()
        .oneshot(get("/api/v1/submissions/pending"))
        .await
        .expect("route responds");
    let pending = read_json_body(pending).await;
    assert_eq!(pending.as_array().map(Vec::len), Some(2));

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/submissions/process", &json!({})))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["processed"], 2);
    assert_eq!(body["results"][0]["status"], "success");
    assert_eq!(body["results"][1]["status"], "failed");
    assert_eq!(body["summary"]["failed"], 1);
    assert_eq!(sink.rows().len(), 1);

    let candidates = router
        .oneshot(get("/api/v1/candidates"))
        .await
        .expect("route responds");
    let candidates = read_json_body(candidates).await;
    assert_eq!(candidates[0]["email"], "john.smith@email.com");
}

#[tokio::test]
async fn summary_route_reflects_queue_state() {
    let (orchestrator, _) = build_orchestrator();
    orchestrator.receive(text_submission("Sarah Johnson", "Sarah Johnson"));
    let router = intake_router(Arc::new(orchestrator));

    let response = router
        .oneshot(get("/api/v1/summary"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_processed"], 0);
    assert_eq!(body["queue_stats"]["pending_messages"], 1);
}
