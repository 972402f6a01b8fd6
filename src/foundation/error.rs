use crate::foundation::core::Variant;
use crate::store::artifact::Artifact;

/// Crate-wide result alias.
pub type AdcraftResult<T> = Result<T, AdcraftError>;

/// Errors surfaced by the creative pipeline.
///
/// Every error is scoped to the request that produced it. Nothing here is retried internally;
/// only [`AdcraftError::Upload`] is safe to retry in isolation because the artifact already
/// exists on local staging.
#[derive(thiserror::Error, Debug)]
pub enum AdcraftError {
    /// No template is registered for the exact size and variant.
    #[error("unsupported size: no {variant} template registered for {width}x{height}")]
    UnsupportedSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Requested template variant.
        variant: Variant,
    },

    /// A single animation frame failed; the whole animation is aborted.
    #[error("frame capture error at frame {index}: {reason}")]
    FrameCapture {
        /// 0-based frame index that failed.
        index: u32,
        /// Human-readable failure reason.
        reason: String,
    },

    /// The artifact could not be persisted to object storage. The local file is retained.
    #[error("upload error: {reason}")]
    Upload {
        /// Human-readable failure reason.
        reason: String,
        /// The staged artifact to hand back to `ArtifactStore::persist`, when one exists.
        artifact: Option<Box<Artifact>>,
    },

    /// Loading content into a render page exceeded the navigation timeout.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or page lifecycle failure.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem failure on staging storage.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other error with context attached via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdcraftError {
    /// Build an [`AdcraftError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AdcraftError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`AdcraftError::Upload`].
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload {
            reason: msg.into(),
            artifact: None,
        }
    }

    /// Attach the staged artifact to an upload failure; other errors pass through.
    pub(crate) fn with_staged(self, staged: &Artifact) -> Self {
        match self {
            Self::Upload { reason, .. } => Self::Upload {
                reason,
                artifact: Some(Box::new(staged.clone())),
            },
            other => other,
        }
    }

    /// Staged artifact carried by an upload failure.
    pub fn staged_artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Upload { artifact, .. } => artifact.as_deref(),
            _ => None,
        }
    }

    /// Take the staged artifact out of an upload failure.
    pub fn into_staged_artifact(self) -> Option<Artifact> {
        match self {
            Self::Upload { artifact, .. } => artifact.map(|a| *a),
            _ => None,
        }
    }

    /// Build an [`AdcraftError::Navigation`].
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build an [`AdcraftError::FrameCapture`].
    pub fn frame_capture(index: u32, reason: impl Into<String>) -> Self {
        Self::FrameCapture {
            index,
            reason: reason.into(),
        }
    }

    /// Return `true` when retrying the failed step alone is safe.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upload { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
