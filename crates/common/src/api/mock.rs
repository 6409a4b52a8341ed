//! In-memory transport for tests
//!
//! Routes are keyed by method and path (query excluded). Unknown routes
//! answer 404. Every request and upload is recorded.

use super::{ApiRequest, RawResponse, Transport};
use crate::errors::Result;
use crate::models::ImageFile;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A request the mock received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), RawResponse>>,
    upload_reply: Mutex<Option<RawResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    uploads: Mutex<Vec<String>>,
}

/// A payload that cannot be serialized is replaced by `null`, which then
/// fails the client's decode like any other malformed answer
fn to_json<T: Serialize>(value: T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Mock payload failed to serialize");
        serde_json::Value::Null
    })
}

/// A test that panicked while holding a lock must not hide later requests
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn json_response(status: u16, body: serde_json::Value) -> RawResponse {
    RawResponse {
        status,
        body: body.to_string().into_bytes(),
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer with `{ data, message: "Success", code: 200 }`
    pub fn respond<T: Serialize>(&self, method: Method, path: &str, data: T) {
        let body = json!({ "data": to_json(data), "message": "Success", "code": 200 });
        self.respond_raw(method, path, 200, body);
    }

    /// Answer with a paginated envelope
    pub fn respond_page<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        data: T,
        has_next: bool,
        next_cursor: Option<i64>,
    ) {
        let body = json!({
            "data": to_json(data),
            "message": "Success",
            "code": 200,
            "pagination": { "hasNext": has_next, "nextCursor": next_cursor },
        });
        self.respond_raw(method, path, 200, body);
    }

    /// Answer with an arbitrary status and body
    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        lock(&self.routes).insert((method, path.to_string()), json_response(status, body));
    }

    /// Answer with an error status and message
    pub fn fail(&self, method: Method, path: &str, status: u16, message: &str) {
        let body = json!({ "data": null, "message": message, "code": status });
        self.respond_raw(method, path, status, body);
    }

    pub fn respond_upload(&self, url: &str) {
        let body = json!({ "data": { "url": url }, "message": "Success", "code": 200 });
        *lock(&self.upload_reply) = Some(json_response(200, body));
    }

    pub fn fail_upload(&self, status: u16, message: &str) {
        let body = json!({ "data": null, "message": message, "code": status });
        *lock(&self.upload_reply) = Some(json_response(status, body));
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Requests received for one method and path
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// File names of uploaded images, in order
    pub fn uploads(&self) -> Vec<String> {
        lock(&self.uploads).clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let key = (request.method.clone(), request.path.clone());
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            path: request.path,
            query: request.query,
            body: request.body,
        });

        let reply = lock(&self.routes).get(&key).cloned();
        Ok(reply.unwrap_or_else(|| {
            json_response(
                404,
                json!({ "data": null, "message": format!("no mock route for {} {}", key.0, key.1), "code": 404 }),
            )
        }))
    }

    async fn upload(&self, file: &ImageFile) -> Result<RawResponse> {
        lock(&self.uploads).push(file.file_name.clone());

        let reply = lock(&self.upload_reply).clone();
        Ok(reply.unwrap_or_else(|| {
            json_response(404, json!({ "data": null, "message": "no mock upload route", "code": 404 }))
        }))
    }
}
