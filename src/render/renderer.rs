use std::time::Duration;

use tracing::{debug, info};

use crate::assets::AssetLoadWarning;
use crate::assets::fetch::{AssetLoader, http_client};
use crate::assets::font::FontResolver;
use crate::config::PipelineConfig;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::layout::document::{LayoutDocument, Slot};
use crate::layout::fingerprint::{PoseFingerprint, fingerprint_poses};
use crate::render::page::RenderPage;
use crate::render::pool::WorkerPool;
use crate::render::raster::FrameRGBA;

/// A page that has settled all assets and fitted its text, ready for capture.
#[derive(Debug)]
pub struct RenderedFrame {
    page: RenderPage,
    warnings: Vec<AssetLoadWarning>,
}

impl RenderedFrame {
    /// Asset failures tolerated while settling.
    pub fn warnings(&self) -> &[AssetLoadWarning] {
        &self.warnings
    }

    pub fn page(&self) -> &RenderPage {
        &self.page
    }

    pub fn viewport(&self) -> Dimensions {
        self.page.viewport()
    }

    /// Fitted font size of a text slot, if it was drawn.
    pub fn fitted_size(&self, slot: Slot) -> Option<f32> {
        self.page.text_fit(slot).map(|f| f.size_px)
    }

    /// Fingerprint of the element poses at `t_ms`.
    pub fn pose_fingerprint(&self, t_ms: f64) -> Option<PoseFingerprint> {
        self.page
            .document()
            .map(|doc| fingerprint_poses(&doc.sample(t_ms)))
    }

    /// Rasterize the document with every animation sampled at `t_ms`.
    pub async fn capture_at(&mut self, t_ms: f64) -> AdcraftResult<FrameRGBA> {
        self.page.capture_at(t_ms).await
    }
}

/// Loads layout documents into pages and brings them to a stable state.
#[derive(Clone, Debug)]
pub struct FitRenderer {
    pool: WorkerPool,
    loader: AssetLoader,
    fonts: FontResolver,
    navigation_timeout: Duration,
}

impl FitRenderer {
    pub(crate) fn new(
        pool: WorkerPool,
        loader: AssetLoader,
        fonts: FontResolver,
        navigation_timeout: Duration,
    ) -> Self {
        Self {
            pool,
            loader,
            fonts,
            navigation_timeout,
        }
    }

    /// Build a standalone renderer from the pool, timeout and font settings of `cfg`.
    pub fn from_config(cfg: &PipelineConfig) -> AdcraftResult<Self> {
        cfg.validate()?;
        Ok(Self::with_client(cfg, http_client()?))
    }

    pub(crate) fn with_client(cfg: &PipelineConfig, http: reqwest::Client) -> Self {
        Self::new(
            WorkerPool::new(cfg.worker_pool_size),
            AssetLoader::new(http, cfg.asset_timeout()),
            FontResolver::new(cfg.fallback_font_path.clone()),
            cfg.navigation_timeout(),
        )
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Render `doc` into a fresh page at `viewport` times `scale`.
    ///
    /// Content load is bounded by the navigation timeout and fails hard; each asset is bounded by
    /// the asset timeout and only produces a warning.
    #[tracing::instrument(skip_all, fields(viewport = %viewport, scale))]
    pub async fn render(
        &self,
        doc: LayoutDocument,
        viewport: Dimensions,
        scale: u32,
    ) -> AdcraftResult<RenderedFrame> {
        let permit = self.pool.acquire().await?;
        let mut page = RenderPage::open(permit, viewport, scale);

        match tokio::time::timeout(self.navigation_timeout, page.load_content(doc)).await {
            Ok(res) => res?,
            Err(_) => {
                return Err(AdcraftError::navigation(format!(
                    "content load exceeded {} ms",
                    self.navigation_timeout.as_millis()
                )));
            }
        }

        let warnings = page.settle(&self.loader, &self.fonts).await?;
        for slot in [Slot::Primary, Slot::Secondary, Slot::Cta] {
            if let Some(fit) = page.text_fit(slot) {
                debug!(?slot, size_px = fit.size_px, attempts = fit.attempts, "text fitted");
            }
        }
        info!(
            page = page.id(),
            warnings = warnings.len(),
            "page ready for capture"
        );
        Ok(RenderedFrame { page, warnings })
    }
}
