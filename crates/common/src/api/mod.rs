//! Remote data client
//!
//! `ApiClient` issues typed calls against the CMS REST backend and decodes
//! every response strictly into its envelope. The wire work sits behind the
//! `Transport` trait:
//! - `HttpTransport` talks to the real backend with reqwest
//! - `MockTransport` answers from canned routes for tests

mod envelope;
mod http;
mod mock;

pub use envelope::{DeleteAck, Envelope, Page, PagedEnvelope, Pagination};
pub use http::HttpTransport;
pub use mock::{MockTransport, RecordedRequest};

use crate::config::ApiConfig;
use crate::errors::{AppError, Result};
use crate::metrics::RequestMetrics;
use crate::models::{ImageFile, UploadedImage};
use async_trait::async_trait;
use envelope::ErrorBody;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// A request as seen by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }
}

/// Status and undecoded body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Wire seam between the typed client and the network
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON request
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;

    /// Upload an image as multipart form data
    async fn upload(&self, file: &ImageFile) -> Result<RawResponse>;
}

/// Typed client over a transport
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client backed by reqwest, configured from `ApiConfig`
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let mut request = ApiRequest::new(Method::GET, path);
        request.query = owned_query(query);
        self.call(request).await
    }

    /// GET a cursor-paginated listing
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>> {
        let mut request = ApiRequest::new(Method::GET, path);
        request.query = owned_query(query);
        let raw = self.execute(&request).await?;
        let envelope: PagedEnvelope<T> = decode(path, &raw.body)?;
        Ok(envelope.into())
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.call(with_body(Method::POST, path, body)?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.call(with_body(Method::PUT, path, body)?).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.call(with_body(Method::PATCH, path, body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(ApiRequest::new(Method::DELETE, path)).await
    }

    /// Upload an image and return its public URL
    pub async fn upload_image(&self, file: &ImageFile) -> Result<String> {
        let metrics = RequestMetrics::start("POST", "upload");
        let raw = match self.transport.upload(file).await {
            Ok(raw) => raw,
            Err(e) => {
                metrics.finish(0);
                return Err(e);
            }
        };
        metrics.finish(raw.status);

        if !raw.is_success() {
            let body: ErrorBody = serde_json::from_slice(&raw.body).unwrap_or_default();
            return Err(AppError::Upload {
                message: body
                    .message
                    .unwrap_or_else(|| format!("status {}", raw.status)),
            });
        }

        let envelope: Envelope<UploadedImage> = decode("upload", &raw.body)?;
        tracing::debug!(file = %file.file_name, url = %envelope.data.url, "Image uploaded");
        Ok(envelope.data.url)
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let raw = self.execute(&request).await?;
        let envelope: Envelope<T> = decode(&request.path, &raw.body)?;
        Ok(envelope.data)
    }

    /// Send and turn non-2xx answers into `AppError::Status`
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse> {
        let metrics = RequestMetrics::start(request.method.as_str(), &request.path);

        let raw = match self.transport.send(request.clone()).await {
            Ok(raw) => raw,
            Err(e) => {
                metrics.finish(0);
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %e,
                    "Request failed before a response arrived"
                );
                return Err(e);
            }
        };
        metrics.finish(raw.status);

        if !raw.is_success() {
            let body: ErrorBody = serde_json::from_slice(&raw.body).unwrap_or_default();
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                status = raw.status,
                "Request rejected by server"
            );
            return Err(AppError::Status {
                endpoint: request.path.clone(),
                status: raw.status,
                message: body.message.unwrap_or_default(),
            });
        }

        Ok(raw)
    }
}

/// Join path segments into `/a/b/c`, percent-encoding each segment so free
/// text (tags) cannot add segments, a query or a fragment
pub fn encoded_path(segments: &[&str]) -> Result<String> {
    let mut url = reqwest::Url::parse("http://localhost/").map_err(|e| AppError::Validation {
        message: format!("Failed to build path: {}", e),
        field: None,
    })?;
    url.path_segments_mut()
        .map_err(|_| AppError::Validation {
            message: "Failed to build path".to_string(),
            field: None,
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url.path().to_string())
}

fn owned_query(query: &[(&str, String)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn with_body<B: Serialize>(method: Method, path: &str, body: &B) -> Result<ApiRequest> {
    let mut request = ApiRequest::new(method, path);
    request.body = Some(serde_json::to_value(body)?);
    Ok(request)
}

/// Strict decode: any mismatch with the expected shape is a schema error
fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!(endpoint = %endpoint, error = %e, "Response failed schema validation");
        AppError::schema(endpoint, e)
    })
}
