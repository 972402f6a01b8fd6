use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{AdcraftError, AdcraftResult};

/// Object storage that can publish bytes under a key.
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` at `key` with public-read access and return the public URL.
    fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = AdcraftResult<String>> + Send;
}

fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

/// Reject keys that would escape the store root.
fn check_key(key: &str) -> AdcraftResult<()> {
    if key.is_empty() || key.starts_with('/') || key.split('/').any(|seg| seg == ".." || seg.is_empty()) {
        return Err(AdcraftError::validation(format!("invalid object key \"{key}\"")));
    }
    Ok(())
}

/// Filesystem-backed store serving files from a public directory.
#[derive(Clone, Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ObjectStore for LocalObjectStore {
    async fn put_public(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> AdcraftResult<String> {
        check_key(key)?;
        let path = self.root.join(key);
        let write = async {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("create '{}'", parent.display()))?;
            }
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("write '{}'", path.display()))
        };
        write
            .await
            .map_err(|e: anyhow::Error| AdcraftError::upload(format!("{e:#}")))?;
        Ok(join_url(&self.public_base_url, key))
    }
}

/// S3-compatible store addressed as `PUT {endpoint}/{bucket}/{key}`.
#[derive(Clone, Debug)]
pub struct HttpObjectStore {
    http: reqwest::Client,
    endpoint: String,
    bucket: String,
    public_base_url: String,
    bearer_token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
        bearer_token: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
            bearer_token,
        }
    }

    fn object_url(&self, key: &str) -> String {
        join_url(&join_url(&self.endpoint, &self.bucket), key)
    }
}

impl ObjectStore for HttpObjectStore {
    async fn put_public(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AdcraftResult<String> {
        check_key(key)?;
        let url = self.object_url(key);
        let mut req = self
            .http
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-amz-acl", "public-read")
            .body(bytes);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AdcraftError::upload(format!("PUT {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdcraftError::upload(format!(
                "PUT {url} returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }
        Ok(join_url(&self.public_base_url, key))
    }
}

/// Store selected at runtime from configuration.
#[derive(Clone, Debug)]
pub enum AnyObjectStore {
    Local(LocalObjectStore),
    Http(HttpObjectStore),
}

impl ObjectStore for AnyObjectStore {
    async fn put_public(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AdcraftResult<String> {
        match self {
            Self::Local(s) => s.put_public(key, bytes, content_type).await,
            Self::Http(s) => s.put_public(key, bytes, content_type).await,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/object.rs"]
mod tests;
