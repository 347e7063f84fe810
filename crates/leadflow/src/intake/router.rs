use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::LeadSubmission;
use super::notifier::LeadNotifier;
use super::service::{IntakeError, LeadIntakeService};
use super::store::LeadStore;

/// Router builder exposing the lead capture endpoint at `/leads` and `/api/leads`.
pub fn lead_router<S, N>(service: Arc<LeadIntakeService<S, N>>) -> Router
where
    S: LeadStore + 'static,
    N: LeadNotifier + 'static,
{
    Router::new()
        .route(
            "/leads",
            post(submit_handler::<S, N>).get(method_not_allowed),
        )
        .route(
            "/api/leads",
            post(submit_handler::<S, N>).get(method_not_allowed),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<LeadIntakeService<S, N>>>,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> Response
where
    S: LeadStore + 'static,
    N: LeadNotifier + 'static,
{
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            let payload = json!({
                "success": false,
                "error": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match service.submit(submission).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(IntakeError::MissingContact) => {
            let payload = json!({
                "success": false,
                "error": IntakeError::MissingContact.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(other) => {
            error!(error = %other, "lead capture error");
            let payload = json!({
                "success": false,
                "error": "Server error",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn method_not_allowed() -> Response {
    let payload = json!({
        "error": "Method not allowed. Use POST to submit leads.",
    });
    (StatusCode::METHOD_NOT_ALLOWED, Json(payload)).into_response()
}
