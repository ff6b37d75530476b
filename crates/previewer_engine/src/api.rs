use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use previewer_logging::{log_debug, log_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::SubmitRequest;
use crate::{ApiError, EntryRecord, FailureKind, HistoryPageRecord};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
            allowed_content_types: vec![JSON.to_string()],
        }
    }
}

/// The two remote services the previewer talks to.
#[async_trait::async_trait]
pub trait PreviewApi: Send + Sync {
    /// `POST {base}/submit` with `{"url": ...}`; answers with one entry.
    async fn submit_url(&self, url: &str) -> Result<EntryRecord, ApiError>;

    /// `GET {base}/history?limit=..[&cursor=..]`; answers with one page,
    /// newest first.
    async fn get_history(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<HistoryPageRecord, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPreviewApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestPreviewApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, segment: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, "base url cannot have a path"))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !self.is_content_type_allowed(ct) {
                return Err(ApiError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body.freeze())
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl PreviewApi for ReqwestPreviewApi {
    async fn submit_url(&self, url: &str) -> Result<EntryRecord, ApiError> {
        let endpoint = self.endpoint("submit")?;
        let body = serde_json::to_vec(&SubmitRequest { url })
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        log_debug!("POST {endpoint} url={url}");

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        self.read_json(response).await.inspect_err(|err| {
            log_warn!("submit failed url={url}: {err}");
        })
    }

    async fn get_history(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<HistoryPageRecord, ApiError> {
        let mut endpoint = self.endpoint("history")?;
        {
            let mut query = endpoint.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("cursor", cursor);
            }
        }
        log_debug!("GET {endpoint}");

        let response = self
            .client
            .get(endpoint)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        self.read_json(response).await.inspect_err(|err| {
            log_warn!("history fetch failed cursor={cursor:?}: {err}");
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ApiError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
