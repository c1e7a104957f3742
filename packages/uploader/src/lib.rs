//! # Upload Side-Channel
//!
//! Client for the document-storage upload endpoint used by the image and
//! avatar panels.
//!
//! Protocol: multipart form POST to
//! `{api_base_url}/api/Documents/Upload?location=tempfiles` with fields
//! `identifier`, `component`, `AccessControl`, and `file`. The response is
//! `{ "payload": [{ "url": … }] }`; the resulting image reference is
//! `{api_base_url}{url}?download=false`.
//!
//! Failures never touch the document store; the panel only merges the
//! returned reference after a successful transfer. In-flight uploads
//! cannot be cancelled; a superseding edit simply races the completion and
//! the last write wins.

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const UPLOAD_PATH: &str = "/api/Documents/Upload?location=tempfiles";
const UPLOAD_COMPONENT: &str = "wysiwyg";
const UPLOAD_ACCESS_CONTROL: &str = "Public";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upload failed: {0}")]
    Status(StatusCode),

    #[error("Malformed upload response: no payload entry")]
    MalformedResponse,
}

/// One file to transfer
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Caller tag, e.g. `image-block` or `avatar-block`
    pub identifier: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    payload: Vec<UploadedDocument>,
}

#[derive(Debug, Deserialize)]
struct UploadedDocument {
    url: String,
}

/// Client bound to one document-storage service
#[derive(Debug, Clone)]
pub struct Uploader {
    client: reqwest::Client,
    api_base_url: String,
}

impl Uploader {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: api_base_url.into(),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Transfer a file and return the downloadable reference on success
    pub async fn upload(&self, request: UploadRequest) -> Result<String, UploadError> {
        let form = Form::new()
            .text("identifier", request.identifier)
            .text("component", UPLOAD_COMPONENT)
            .text("AccessControl", UPLOAD_ACCESS_CONTROL)
            .part("file", Part::bytes(request.bytes).file_name(request.file_name));

        let endpoint = format!("{}{UPLOAD_PATH}", self.api_base_url);
        debug!(%endpoint, "uploading file");

        let response = self.client.post(&endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status(status));
        }

        let body: UploadResponse = response.json().await?;
        let uploaded = body.payload.first().ok_or(UploadError::MalformedResponse)?;

        Ok(format!(
            "{}{}?download=false",
            self.api_base_url, uploaded.url
        ))
    }
}
