use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use leadflow::intake::{lead_router, JsonlLeadStore, Lead, LeadIntakeService, WebhookNotifier};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn captured_lead_is_persisted_even_when_forward_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("data/leads.jsonl");

    let service = LeadIntakeService::new(
        Arc::new(JsonlLeadStore::new(&log_path)),
        Arc::new(WebhookNotifier::new(Some(
            "http://127.0.0.1:9/unreachable".to_string(),
        ))),
    );
    let router = lead_router(Arc::new(service));

    let body = json!({
        "name": "Ann",
        "email": " ANN@example.com ",
        "budget": "250-499",
        "urgency": "this-week",
        "taskVolume": "high"
    });
    let response = router
        .oneshot(
            Request::post("/leads")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json payload");
    assert_eq!(payload["qualificationScore"], 75);
    assert_eq!(payload["qualified"], true);

    let raw = std::fs::read_to_string(&log_path).expect("lead log written");
    let leads: Vec<Lead> = raw
        .lines()
        .map(|line| serde_json::from_str(line).expect("lead line"))
        .collect();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].email, "ann@example.com");
    assert_eq!(leads[0].id.as_str(), payload["id"].as_str().unwrap());
    assert_eq!(leads[0].source, "landing_page");
}
