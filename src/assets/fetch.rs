use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{AdcraftError, AdcraftResult};

/// Where an asset reference points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AssetLocation {
    /// `http://` or `https://` URL.
    Remote(String),
    /// `file://` URL or bare filesystem path.
    Local(PathBuf),
}

impl AssetLocation {
    /// Classify an asset reference string.
    pub(crate) fn parse(source: &str) -> AdcraftResult<Self> {
        let s = source.trim();
        if s.is_empty() {
            return Err(AdcraftError::validation("asset reference must be non-empty"));
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Remote(s.to_owned()));
        }
        if let Some(rest) = s.strip_prefix("file://") {
            return Ok(Self::Local(PathBuf::from(rest)));
        }
        if lower.contains("://") {
            return Err(AdcraftError::validation(format!(
                "unsupported asset scheme in \"{s}\""
            )));
        }
        Ok(Self::Local(PathBuf::from(s)))
    }
}

/// Shared HTTP client for asset fetches and object uploads.
pub(crate) fn http_client() -> AdcraftResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("adcraft/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AdcraftError::validation(format!("http client: {e}")))
}

/// Fetches asset bytes over HTTP or from the local filesystem, each call bounded by a timeout.
#[derive(Clone, Debug)]
pub(crate) struct AssetLoader {
    http: reqwest::Client,
    timeout: Duration,
}

impl AssetLoader {
    pub(crate) fn new(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    /// Fetch the bytes behind `source`.
    ///
    /// Exceeding the timeout is reported as an error; callers decide whether it is fatal.
    pub(crate) async fn fetch(&self, source: &str) -> AdcraftResult<Vec<u8>> {
        let location = AssetLocation::parse(source)?;
        match tokio::time::timeout(self.timeout, self.fetch_location(&location)).await {
            Ok(res) => res,
            Err(_) => Err(AdcraftError::render(format!(
                "timed out after {} ms loading \"{source}\"",
                self.timeout.as_millis()
            ))),
        }
    }

    async fn fetch_location(&self, location: &AssetLocation) -> AdcraftResult<Vec<u8>> {
        match location {
            AssetLocation::Remote(url) => {
                let resp = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("request asset '{url}'"))?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(AdcraftError::render(format!(
                        "asset '{url}' returned HTTP {status}"
                    )));
                }
                let bytes = resp
                    .bytes()
                    .await
                    .with_context(|| format!("read asset body '{url}'"))?;
                Ok(bytes.to_vec())
            }
            AssetLocation::Local(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("read asset '{}'", path.display()))?;
                Ok(bytes)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
