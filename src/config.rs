use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::store::object::{AnyObjectStore, HttpObjectStore, LocalObjectStore};

/// Where finished artifacts are published.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectStoreConfig {
    /// Copy into a directory served at `public_base_url`.
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    /// S3-compatible HTTP endpoint.
    Http {
        endpoint: String,
        bucket: String,
        public_base_url: String,
        #[serde(default)]
        bearer_token: Option<String>,
    },
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self::Local {
            root: PathBuf::from("public"),
            public_base_url: "http://localhost:8080".to_owned(),
        }
    }
}

impl ObjectStoreConfig {
    pub(crate) fn build(&self, http: &reqwest::Client) -> AnyObjectStore {
        match self {
            Self::Local {
                root,
                public_base_url,
            } => AnyObjectStore::Local(LocalObjectStore::new(root.clone(), public_base_url.clone())),
            Self::Http {
                endpoint,
                bucket,
                public_base_url,
                bearer_token,
            } => AnyObjectStore::Http(HttpObjectStore::new(
                http.clone(),
                endpoint,
                bucket,
                public_base_url,
                bearer_token.clone(),
            )),
        }
    }
}

/// Pipeline settings. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Root of the `static/`, `animations/` and `frames/` staging folders.
    pub staging_dir: PathBuf,
    /// Maximum number of pages rendering at once.
    pub worker_pool_size: usize,
    pub navigation_timeout_ms: u64,
    pub asset_timeout_ms: u64,
    pub frame_timeout_ms: u64,
    /// Font used when a request names no font file.
    pub fallback_font_path: Option<PathBuf>,
    pub object_store: ObjectStoreConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("staging"),
            worker_pool_size: 4,
            navigation_timeout_ms: 30_000,
            asset_timeout_ms: 10_000,
            frame_timeout_ms: 5_000,
            fallback_font_path: None,
            object_store: ObjectStoreConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn asset_timeout(&self) -> Duration {
        Duration::from_millis(self.asset_timeout_ms)
    }

    pub fn frame_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_timeout_ms)
    }

    /// Parse a JSON config document.
    pub fn from_json_str(s: &str) -> AdcraftResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| AdcraftError::validation(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from an optional JSON file, then apply `ADCRAFT_*` environment overrides.
    pub fn load(path: Option<&Path>) -> AdcraftResult<Self> {
        let mut cfg = match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("read config '{}'", p.display()))?;
                Self::from_json_str(&text)?
            }
            None => Self::default(),
        };
        cfg.apply_overrides(|k| std::env::var(k).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `ADCRAFT_*` overrides read through `var`.
    ///
    /// Setting `ADCRAFT_STORE_ENDPOINT` switches the object store to HTTP.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> AdcraftResult<()> {
        fn num<T: std::str::FromStr>(key: &str, v: &str) -> AdcraftResult<T> {
            v.trim()
                .parse()
                .map_err(|_| AdcraftError::validation(format!("{key}: invalid number \"{v}\"")))
        }

        if let Some(v) = var("ADCRAFT_STAGING_DIR") {
            self.staging_dir = PathBuf::from(v);
        }
        if let Some(v) = var("ADCRAFT_WORKER_POOL_SIZE") {
            self.worker_pool_size = num("ADCRAFT_WORKER_POOL_SIZE", &v)?;
        }
        if let Some(v) = var("ADCRAFT_NAVIGATION_TIMEOUT_MS") {
            self.navigation_timeout_ms = num("ADCRAFT_NAVIGATION_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = var("ADCRAFT_ASSET_TIMEOUT_MS") {
            self.asset_timeout_ms = num("ADCRAFT_ASSET_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = var("ADCRAFT_FRAME_TIMEOUT_MS") {
            self.frame_timeout_ms = num("ADCRAFT_FRAME_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = var("ADCRAFT_FALLBACK_FONT_PATH") {
            self.fallback_font_path = Some(PathBuf::from(v));
        }

        if let Some(endpoint) = var("ADCRAFT_STORE_ENDPOINT") {
            let (bucket, public_base_url, bearer_token) = match &self.object_store {
                ObjectStoreConfig::Http {
                    bucket,
                    public_base_url,
                    bearer_token,
                    ..
                } => (bucket.clone(), public_base_url.clone(), bearer_token.clone()),
                ObjectStoreConfig::Local {
                    public_base_url, ..
                } => (String::new(), public_base_url.clone(), None),
            };
            self.object_store = ObjectStoreConfig::Http {
                endpoint,
                bucket,
                public_base_url,
                bearer_token,
            };
        }
        match &mut self.object_store {
            ObjectStoreConfig::Local {
                root,
                public_base_url,
            } => {
                if let Some(v) = var("ADCRAFT_STORE_ROOT") {
                    *root = PathBuf::from(v);
                }
                if let Some(v) = var("ADCRAFT_PUBLIC_BASE_URL") {
                    *public_base_url = v;
                }
            }
            ObjectStoreConfig::Http {
                bucket,
                public_base_url,
                bearer_token,
                ..
            } => {
                if let Some(v) = var("ADCRAFT_STORE_BUCKET") {
                    *bucket = v;
                }
                if let Some(v) = var("ADCRAFT_PUBLIC_BASE_URL") {
                    *public_base_url = v;
                }
                if let Some(v) = var("ADCRAFT_STORE_TOKEN") {
                    *bearer_token = Some(v);
                }
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> AdcraftResult<()> {
        if self.worker_pool_size == 0 {
            return Err(AdcraftError::validation("worker_pool_size must be at least 1"));
        }
        for (name, ms) in [
            ("navigation_timeout_ms", self.navigation_timeout_ms),
            ("asset_timeout_ms", self.asset_timeout_ms),
            ("frame_timeout_ms", self.frame_timeout_ms),
        ] {
            if ms == 0 {
                return Err(AdcraftError::validation(format!("{name} must be positive")));
            }
        }
        if let ObjectStoreConfig::Http { endpoint, bucket, .. } = &self.object_store {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(AdcraftError::validation(format!(
                    "object store endpoint \"{endpoint}\" must be http(s)"
                )));
            }
            if bucket.is_empty() {
                return Err(AdcraftError::validation("object store bucket must be set"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
