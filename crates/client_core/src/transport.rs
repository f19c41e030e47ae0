//! Upload transport: the single network call the component makes.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::ACCEPT,
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::protocol::{summarize_url, FILE_FIELD};
use tracing::{debug, warn};

use crate::types::SelectedFile;

/// Status text for requests that never got a response and for codes without
/// a reason phrase.
pub const UNREACHABLE_STATUS_TEXT: &str = "Unknown Error";

/// Body of a non-2xx response, as far as the client could make sense of it.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureBody {
    Absent,
    Text(String),
    Structured(serde_json::Value),
    Binary(Vec<u8>),
}

impl FailureBody {
    /// Any non-empty body is read as text, lossily when it is not UTF-8.
    /// `Structured` and `Binary` are for transports that decode bodies
    /// themselves.
    pub fn from_response(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Absent;
        }
        Self::Text(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "text",
            Self::Structured(_) => "structured",
            Self::Binary(_) => "binary",
        }
    }
}

/// Reason phrase for `status`, or `Unknown Error` for non-standard codes.
pub fn status_text(status: StatusCode) -> &'static str {
    status
        .canonical_reason()
        .unwrap_or(UNREACHABLE_STATUS_TEXT)
}

/// Raw failure signal of one upload. `status == 0` means no response arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFailure {
    pub status: u16,
    pub status_text: String,
    pub body: FailureBody,
}

impl UploadFailure {
    pub fn new(status: u16, status_text: impl Into<String>, body: FailureBody) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    pub fn unreachable() -> Self {
        Self::new(0, UNREACHABLE_STATUS_TEXT, FailureBody::Absent)
    }
}

#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Sends `file` to the summarize endpoint and returns the response text.
    async fn upload(&self, file: &SelectedFile) -> std::result::Result<String, UploadFailure>;
}

#[async_trait]
impl<T: UploadTransport + ?Sized> UploadTransport for Arc<T> {
    async fn upload(&self, file: &SelectedFile) -> std::result::Result<String, UploadFailure> {
        (**self).upload(file).await
    }
}

pub struct HttpTransport {
    http: Client,
    summarize_url: String,
}

impl HttpTransport {
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self::with_client(http, backend_url))
    }

    pub fn with_client(http: Client, backend_url: &str) -> Self {
        Self {
            http,
            summarize_url: summarize_url(backend_url),
        }
    }

    pub fn summarize_url(&self) -> &str {
        &self.summarize_url
    }
}

fn file_part(file: &SelectedFile) -> Part {
    let part = Part::bytes(file.content.clone()).file_name(file.name.clone());
    match part.mime_str(&file.media_type) {
        Ok(part) => part,
        Err(error) => {
            debug!(media_type = %file.media_type, %error, "sending file part without media type");
            Part::bytes(file.content.clone()).file_name(file.name.clone())
        }
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn upload(&self, file: &SelectedFile) -> std::result::Result<String, UploadFailure> {
        let form = Form::new().part(FILE_FIELD, file_part(file));

        let response = self
            .http
            .post(&self.summarize_url)
            .header(ACCEPT, "text/plain, */*")
            .multipart(form)
            .send()
            .await
            .map_err(|error| {
                warn!(url = %self.summarize_url, %error, timed_out = error.is_timeout(), "summarize request got no response");
                UploadFailure::unreachable()
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|error| {
            warn!(url = %self.summarize_url, %error, "summarize response body was cut off");
            UploadFailure::unreachable()
        })?;

        if status.is_success() {
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }

        Err(UploadFailure::new(
            status.as_u16(),
            status_text(status),
            FailureBody::from_response(&bytes),
        ))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
