use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;
use tracing::{debug, warn};

use crate::foundation::core::Dimensions;
use crate::foundation::error::AdcraftResult;

static NEXT_STAGED: AtomicU64 = AtomicU64::new(0);

/// Local directory where artifacts are written before upload.
///
/// Layout: `static/` for stills, `animations/` for GIFs, `frames/<id>/` for per-request frames.
#[derive(Clone, Debug)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parent of every per-request frame directory.
    pub fn frames_root(&self) -> PathBuf {
        self.root.join("frames")
    }

    /// Reserve an output path for a still.
    pub(crate) async fn still_output(&self, dims: Dimensions) -> AdcraftResult<StagedOutput> {
        self.output("static", "ad", dims, "png").await
    }

    /// Reserve an output path for an animation.
    pub(crate) async fn animation_output(&self, dims: Dimensions) -> AdcraftResult<StagedOutput> {
        self.output("animations", "animation", dims, "gif").await
    }

    async fn output(
        &self,
        folder: &str,
        prefix: &str,
        dims: Dimensions,
        ext: &str,
    ) -> AdcraftResult<StagedOutput> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create staging dir '{}'", dir.display()))?;
        Ok(StagedOutput {
            path: dir.join(format!("{}.{ext}", unique_stem(prefix, dims))),
            keep: false,
        })
    }

    /// Create a fresh frame directory for one animation.
    pub(crate) async fn frame_staging(&self, dims: Dimensions) -> AdcraftResult<FrameStaging> {
        let dir = self.frames_root().join(unique_stem("frames", dims));
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create frame staging dir '{}'", dir.display()))?;
        Ok(FrameStaging {
            dir,
            cleaned: false,
        })
    }
}

fn unique_stem(prefix: &str, dims: Dimensions) -> String {
    let seq = NEXT_STAGED.fetch_add(1, Ordering::Relaxed);
    format!(
        "{prefix}-{}-{dims}-{seq}",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Output file that is removed on drop unless kept.
#[derive(Debug)]
pub(crate) struct StagedOutput {
    path: PathBuf,
    keep: bool,
}

impl StagedOutput {
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file and hand back its path.
    pub(crate) fn keep(mut self) -> PathBuf {
        self.keep = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for StagedOutput {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed incomplete output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove incomplete output"),
        }
    }
}

/// Per-animation frame directory, removed on every exit path.
#[derive(Debug)]
pub(crate) struct FrameStaging {
    dir: PathBuf,
    cleaned: bool,
}

impl FrameStaging {
    #[cfg(test)]
    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn frame_path(&self, index: u32) -> PathBuf {
        self.dir.join(format!("frame-{index:04}.png"))
    }

    /// Remove the directory and its frames.
    pub(crate) async fn cleanup(mut self) -> AdcraftResult<()> {
        self.cleaned = true;
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for FrameStaging {
    fn drop(&mut self) {
        if self.cleaned {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.dir)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(dir = %self.dir.display(), error = %e, "failed to remove staged frames");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/staging.rs"]
mod tests;
