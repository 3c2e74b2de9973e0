//! Transport layer, the single point where requests leave the process.
//!
//! Repositories build an `ApiRequest`, hand it to a `Transport`, and pass the
//! `RawResponse` through the envelope decoder. No retries, no caching: every
//! call is a fresh request.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, multipart, Client, Method};
use serde_json::Value;
use tracing::debug;

use crate::errors::ClientError;

/// A file plus optional metadata sent as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Bytes,
    /// Extra text parts, in the order they are appended to the form.
    pub text_fields: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartUpload),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `/ranking/3`.
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: RequestBody::Json(body),
        }
    }

    pub fn post_empty(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_multipart(path: impl Into<String>, upload: MultipartUpload) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: RequestBody::Multipart(upload),
        }
    }
}

/// What came back over the wire, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: Bytes::from(body.to_string()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            content_type: None,
            body: Bytes::new(),
        }
    }
}

/// Sends one request and returns the raw response.
/// Only a failure to reach the server is an error here; HTTP status codes are
/// left to the envelope decoder.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError>;
}

/// `reqwest`-backed transport. Timeouts live here and nowhere else.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let builder = self.client.request(request.method.clone(), &url);
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            // Content type (with boundary) is set by reqwest from the form itself.
            RequestBody::Multipart(upload) => builder.multipart(build_form(upload)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        debug!("{} {} -> {} ({} bytes)", request.method, url, status, body.len());

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

fn build_form(upload: MultipartUpload) -> Result<multipart::Form, ClientError> {
    let mut part = multipart::Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name);
    if let Some(mime) = upload.mime_type.as_deref() {
        part = part
            .mime_str(mime)
            .map_err(|e| ClientError::InvalidInput(format!("invalid mime type '{mime}': {e}")))?;
    }

    let mut form = multipart::Form::new().part("file", part);
    for (name, value) in upload.text_fields {
        form = form.text(name, value);
    }
    Ok(form)
}
