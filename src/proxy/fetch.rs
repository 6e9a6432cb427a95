//! Network leg of the cache proxy
//!
//! `Fetcher` abstracts the transport so the proxy policy can be tested
//! against scripted fakes. The real implementation wraps a `reqwest`
//! client with an explicit request timeout.

use crate::error::{EpilabError, EpilabResult};
use crate::proxy::store::CachedResponse;
use async_trait::async_trait;
use std::time::Duration;

/// How a request is being used, which selects the caching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Full-page load; always resolves to some page
    Navigation,
    /// Subordinate resource or API call
    Resource,
}

/// An outgoing request as the proxy sees it
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: String,
    pub url: String,
    pub kind: RequestKind,
}

impl ProxyRequest {
    /// A GET request for a subordinate resource
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            kind: RequestKind::Resource,
        }
    }

    /// A full-page navigation request
    pub fn navigation(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            kind: RequestKind::Navigation,
        }
    }

    /// Cache key: method plus URL
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}

/// Transport abstraction for the proxy's network attempts
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &ProxyRequest) -> EpilabResult<CachedResponse>;
}

/// Real transport backed by `reqwest`
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with an explicit request timeout
    pub fn new(timeout: Duration) -> EpilabResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EpilabError::Internal(format!("building http client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &ProxyRequest) -> EpilabResult<CachedResponse> {
        let method: reqwest::Method = request
            .method
            .parse()
            .map_err(|_| EpilabError::UrlInvalid(format!("bad method {}", request.method)))?;

        let response = self
            .client
            .request(method, &request.url)
            .send()
            .await
            .map_err(|e| EpilabError::fetch(&request.url, e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| EpilabError::fetch(&request.url, e.to_string()))?
            .to_vec();

        Ok(CachedResponse {
            status,
            content_type,
            body,
        })
    }
}
