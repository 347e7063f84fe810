use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::intake::{
    lead_router, Lead, LeadIntakeService, LeadNotifier, LeadStore, NotifyError, StoreError,
};
use crate::journal::JournalError;

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) leads: Arc<Mutex<Vec<Lead>>>,
}

impl LeadStore for MemoryStore {
    fn append(&self, lead: &Lead) -> Result<(), StoreError> {
        self.leads.lock().expect("store mutex").push(lead.clone());
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl LeadStore for UnavailableStore {
    fn append(&self, _lead: &Lead) -> Result<(), StoreError> {
        Err(StoreError::Journal(JournalError::Write {
            path: PathBuf::from("data/leads.jsonl"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only filesystem"),
        }))
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingNotifier {
    pub(super) forwarded: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LeadNotifier for RecordingNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), NotifyError> {
        self.forwarded
            .lock()
            .expect("notifier mutex")
            .push(lead.id.0.clone());
        Ok(())
    }
}

pub(super) fn build_router() -> (axum::Router, MemoryStore, RecordingNotifier) {
    let store = MemoryStore::default();
    let notifier = RecordingNotifier::default();
    let service = LeadIntakeService::new(Arc::new(store.clone()), Arc::new(notifier.clone()));
    (lead_router(Arc::new(service)), store, notifier)
}

pub(super) fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
