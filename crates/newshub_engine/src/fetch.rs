use std::time::Duration;

use futures_util::StreamExt;
use newshub_core::{Category, Cursor, FetchTag, ResultPage};
use newshub_logging::{news_debug, news_warn};
use url::Url;

use crate::payload::decode_page;
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://newsdata.io/api/1/latest";

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            language: "en".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Parameters of one upstream page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub category: Category,
    pub search: String,
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// First page of `top` without a search term.
    pub fn headlines() -> Self {
        Self {
            category: Category::Top,
            search: String::new(),
            cursor: None,
        }
    }
}

impl From<&FetchTag> for PageRequest {
    fn from(tag: &FetchTag) -> Self {
        Self {
            category: tag.category,
            search: tag.search.clone(),
            cursor: tag.cursor.clone(),
        }
    }
}

#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ResultPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestNewsSource {
    settings: SourceSettings,
    client: reqwest::Client,
}

impl ReqwestNewsSource {
    pub fn new(settings: SourceSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    /// Full request URL. `q` is only sent for a non-blank search and `page`
    /// carries the cursor verbatim.
    pub fn request_url(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("apikey", &self.settings.api_key)
                .append_pair("language", &self.settings.language)
                .append_pair("category", request.category.as_str());
            let search = request.search.trim();
            if !search.is_empty() {
                query.append_pair("q", search);
            }
            if let Some(cursor) = &request.cursor {
                query.append_pair("page", cursor.as_str());
            }
        }
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl NewsSource for ReqwestNewsSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ResultPage, FetchError> {
        let url = self.request_url(request)?;
        news_debug!(
            "GET category={} search={:?} cursor={:?}",
            request.category,
            request.search,
            request.cursor
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        decode_page(&bytes).map_err(|err| {
            news_warn!("Undecodable page for category {}: {}", request.category, err);
            FetchError::new(FailureKind::Malformed, err.to_string())
        })
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
