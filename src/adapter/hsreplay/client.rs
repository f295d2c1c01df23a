//! Replay Service HTTP Transport
//!
//! HTTPトランスポートの抽象化と reqwest による実装

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

#[cfg(test)]
use mockall::automock;

/// Trait for the raw HTTP calls made during an upload
/// This enables mocking in tests while using reqwest in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReplayTransport: Send + Sync {
    /// POST a JSON body and decode the JSON response
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
    ) -> Result<serde_json::Value>;

    /// PUT raw bytes
    async fn put_bytes(&self, url: &str, headers: &[(String, String)], body: Vec<u8>)
        -> Result<()>;
}

/// reqwest based transport
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("replaysync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

/// Convert name/value pairs into a reqwest header map
pub fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("Invalid header name: {}", name))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("Invalid value for header {}", name))?;
        map.insert(name, value);
    }
    Ok(map)
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("HTTP {}: {}", status.as_u16(), body);
    }
    Ok(response)
}

#[async_trait]
impl ReplayTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(url)
            .headers(header_map(headers)?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        ensure_success(response)
            .await?
            .json()
            .await
            .context("Response is not valid JSON")
    }

    async fn put_bytes(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<()> {
        let response = self
            .http
            .put(url)
            .headers(header_map(headers)?)
            .body(body)
            .send()
            .await
            .with_context(|| format!("PUT {} failed", url))?;

        ensure_success(response).await?;
        Ok(())
    }
}
