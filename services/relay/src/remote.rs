use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::types::AugType;

pub const ROUTE_UPLOAD: &str = "/flask/upload";
pub const ROUTE_AUGMENT_DOWNLOAD: &str = "/flask/augment_download";
pub const ROUTE_TSNE: &str = "/flask/t-sne";
pub const ROUTE_PERFORMANCE: &str = "/flask/performance";
pub const ROUTE_AUGDATA: &str = "/flask/augdata";
pub const ROUTE_CHATBOT: &str = "/flask/chatbot";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid JSON response from remote server: {0}")]
    InvalidJson(String),
}

/// Status and body of a remote call. Non-2xx answers are data, not errors;
/// each caller decides what counts as success.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RemoteResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }

    /// The training service signals success with exactly 200.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn json(&self) -> Result<Value, RemoteError> {
        serde_json::from_slice(&self.body).map_err(|e| RemoteError::InvalidJson(e.to_string()))
    }
}

/// The GPU-side augmentation/training service.
#[async_trait]
pub trait AugmentService: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<RemoteResponse, RemoteError>;
    async fn augment_download(&self, aug_type: AugType) -> Result<RemoteResponse, RemoteError>;
    async fn tsne(&self) -> Result<RemoteResponse, RemoteError>;
    async fn performance(&self) -> Result<RemoteResponse, RemoteError>;
    async fn augdata(&self, payload: &Value) -> Result<RemoteResponse, RemoteError>;
    async fn chatbot(&self, payload: &Value) -> Result<RemoteResponse, RemoteError>;
    fn base_url(&self) -> &str;
}

pub struct HttpAugmentService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAugmentService {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, RemoteError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    async fn collect(resp: reqwest::Response) -> Result<RemoteResponse, RemoteError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        Ok(RemoteResponse { status, body })
    }
}

#[async_trait]
impl AugmentService for HttpAugmentService {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<RemoteResponse, RemoteError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let resp = self.client.post(self.url(ROUTE_UPLOAD)).multipart(form).send().await?;
        Self::collect(resp).await
    }

    async fn augment_download(&self, aug_type: AugType) -> Result<RemoteResponse, RemoteError> {
        let resp = self
            .client
            .get(self.url(ROUTE_AUGMENT_DOWNLOAD))
            .query(&[("aug_type", aug_type.code())])
            .send()
            .await?;
        Self::collect(resp).await
    }

    async fn tsne(&self) -> Result<RemoteResponse, RemoteError> {
        let resp = self.client.get(self.url(ROUTE_TSNE)).send().await?;
        Self::collect(resp).await
    }

    async fn performance(&self) -> Result<RemoteResponse, RemoteError> {
        let resp = self.client.get(self.url(ROUTE_PERFORMANCE)).send().await?;
        Self::collect(resp).await
    }

    async fn augdata(&self, payload: &Value) -> Result<RemoteResponse, RemoteError> {
        let resp = self.client.post(self.url(ROUTE_AUGDATA)).json(payload).send().await?;
        Self::collect(resp).await
    }

    async fn chatbot(&self, payload: &Value) -> Result<RemoteResponse, RemoteError> {
        let resp = self.client.post(self.url(ROUTE_CHATBOT)).json(payload).send().await?;
        Self::collect(resp).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
