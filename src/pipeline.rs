//! Public entry points: one creative at a time, or a batch over a catalog.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::assets::AssetLoadWarning;
use crate::assets::color::{CssColor, Palette};
use crate::assets::fetch::http_client;
use crate::compose::animation::{AnimationCompositor, AnimationProfile};
use crate::compose::staging::StagingArea;
use crate::compose::still::capture_static;
use crate::config::PipelineConfig;
use crate::foundation::core::{Dimensions, Variant};
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::layout::registry::TemplateRegistry;
use crate::layout::templates::TemplateInput;
use crate::render::renderer::{FitRenderer, RenderedFrame};
use crate::request::CreativeRequest;
use crate::store::artifact::{Artifact, ArtifactFormat};
use crate::store::object::{AnyObjectStore, ObjectStore};
use crate::store::persist::{ArtifactOwner, ArtifactStore};
use crate::text::caption;

/// Result of one generated creative.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeOutput {
    /// Public URL of the uploaded file.
    pub remote_url: String,
    pub format: ArtifactFormat,
    /// `WxH` of the creative.
    pub size: String,
    /// Assets that failed to load; the creative was rendered without them.
    pub warnings: Vec<AssetLoadWarning>,
}

/// One product image to place in a batch, with the background it was cut out from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchImage {
    pub url: String,
    pub background_color: CssColor,
}

fn default_batch_cta() -> Option<String> {
    Some("INSTALL NOW".to_owned())
}

/// Every `(size, image)` pair of `sizes`, cycling through `phrases`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub owner: ArtifactOwner,
    /// Approved phrases, used round-robin.
    pub phrases: Vec<String>,
    pub images: Vec<BatchImage>,
    pub logo_url: String,
    /// App brand color, preferred for the CTA fill.
    pub brand_color: CssColor,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub font_source_url: Option<String>,
    #[serde(default = "default_batch_cta")]
    pub cta_text: Option<String>,
    pub sizes: Vec<Dimensions>,
    #[serde(default = "default_variant")]
    pub variant: Variant,
}

fn default_font_family() -> String {
    "sans-serif".to_owned()
}

fn default_variant() -> Variant {
    Variant::Static
}

/// At most this many images are used per batch.
pub const MAX_BATCH_IMAGES: usize = 5;

impl BatchRequest {
    /// Expand into per-creative requests in `(size, image)` order.
    pub fn expand(&self) -> AdcraftResult<Vec<CreativeRequest>> {
        if self.phrases.is_empty() {
            return Err(AdcraftError::validation("batch has no approved phrases"));
        }
        let mut phrases = self.phrases.iter().cycle();
        let mut out = Vec::with_capacity(self.sizes.len() * self.images.len().min(MAX_BATCH_IMAGES));
        for &dimensions in &self.sizes {
            for image in self.images.iter().take(MAX_BATCH_IMAGES) {
                let phrase = phrases.next().cloned();
                let palette = Palette::derive(image.background_color, self.brand_color);
                out.push(CreativeRequest {
                    phrase,
                    logo_url: self.logo_url.clone(),
                    main_image_url: image.url.clone(),
                    font_family: self.font_family.clone(),
                    font_source_url: self.font_source_url.clone(),
                    dimensions,
                    bg_color: palette.bg_color,
                    text_color: palette.text_color,
                    cta_color: palette.cta_color,
                    cta_text_color: palette.cta_text_color,
                    cta_text: self.cta_text.clone(),
                });
            }
        }
        Ok(out)
    }
}

/// Outcome of one batch entry.
#[derive(Debug)]
pub struct BatchItem {
    pub size: Dimensions,
    pub phrase: Option<String>,
    pub result: AdcraftResult<CreativeOutput>,
}

/// Short stable id for log correlation.
pub fn request_id(req: &CreativeRequest) -> String {
    let bytes = serde_json::to_vec(req).unwrap_or_default();
    format!("{:016x}", xxh3_64(&bytes))
}

/// Turns creative requests into uploaded PNG stills and GIF animations.
///
/// Cheap to clone; clones share the worker pool, HTTP client and object store.
#[derive(Debug)]
pub struct CreativePipeline<S = AnyObjectStore> {
    registry: Arc<TemplateRegistry>,
    renderer: FitRenderer,
    staging: StagingArea,
    compositor: AnimationCompositor,
    store: Arc<ArtifactStore<S>>,
}

impl<S> Clone for CreativePipeline<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            renderer: self.renderer.clone(),
            staging: self.staging.clone(),
            compositor: self.compositor.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl CreativePipeline<AnyObjectStore> {
    /// Build a pipeline with the object store named in `cfg`.
    pub fn from_config(cfg: &PipelineConfig) -> AdcraftResult<Self> {
        let http = http_client()?;
        let store = cfg.object_store.build(&http);
        Self::with_client(cfg, http, store)
    }
}

impl<S: ObjectStore + 'static> CreativePipeline<S> {
    /// Build a pipeline that publishes through `store`.
    pub fn new(cfg: &PipelineConfig, store: S) -> AdcraftResult<Self> {
        Self::with_client(cfg, http_client()?, store)
    }

    fn with_client(cfg: &PipelineConfig, http: reqwest::Client, store: S) -> AdcraftResult<Self> {
        cfg.validate()?;
        let renderer = FitRenderer::with_client(cfg, http);
        Ok(Self {
            registry: Arc::new(TemplateRegistry::builtin()),
            renderer,
            staging: StagingArea::new(cfg.staging_dir.clone()),
            compositor: AnimationCompositor::new(cfg.frame_timeout()),
            store: Arc::new(ArtifactStore::new(store)),
        })
    }

    /// Replace the template registry.
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn artifact_store(&self) -> &ArtifactStore<S> {
        &self.store
    }

    pub fn renderer(&self) -> &FitRenderer {
        &self.renderer
    }

    pub fn compositor(&self) -> &AnimationCompositor {
        &self.compositor
    }

    /// Process the phrase, lay out the template and bring a page to a stable state.
    ///
    /// The size check happens before any page is opened.
    async fn render(
        &self,
        req: &CreativeRequest,
        variant: Variant,
        scale: u32,
    ) -> AdcraftResult<RenderedFrame> {
        let template = self.registry.resolve(req.dimensions, variant)?;
        let caption = caption::process(req.phrase.as_deref());
        let doc = template(&TemplateInput {
            request: req,
            caption: &caption,
        });
        let frame = self.renderer.render(doc, req.dimensions, scale).await?;
        for w in frame.warnings() {
            warn!(warning = %w, "asset skipped");
        }
        Ok(frame)
    }

    async fn publish(
        &self,
        artifact: Artifact,
        owner: &ArtifactOwner,
        warnings: Vec<AssetLoadWarning>,
    ) -> AdcraftResult<CreativeOutput> {
        let format = artifact.format;
        let size = artifact.size_key.clone();
        let uploaded = self.store.persist(artifact, owner).await?;
        let remote_url = uploaded
            .remote_url
            .ok_or_else(|| AdcraftError::upload("store returned no url"))?;
        info!(%remote_url, %size, %format, "creative published");
        Ok(CreativeOutput {
            remote_url,
            format,
            size,
            warnings,
        })
    }

    /// Render a PNG still for `req` and upload it.
    #[tracing::instrument(skip_all, fields(id = %request_id(req), size = %req.dimensions))]
    pub async fn generate_static_creative(
        &self,
        req: &CreativeRequest,
        owner: &ArtifactOwner,
    ) -> AdcraftResult<CreativeOutput> {
        let mut frame = self.render(req, Variant::Static, 1).await?;
        let artifact = capture_static(&mut frame, &self.staging).await?;
        let warnings = frame.warnings().to_vec();
        drop(frame);
        self.publish(artifact, owner, warnings).await
    }

    /// Render a looping GIF for `req` and upload it.
    #[tracing::instrument(skip_all, fields(id = %request_id(req), size = %req.dimensions))]
    pub async fn generate_animated_creative(
        &self,
        req: &CreativeRequest,
        owner: &ArtifactOwner,
    ) -> AdcraftResult<CreativeOutput> {
        // Resolve before picking a profile so unsupported sizes fail first.
        self.registry.resolve(req.dimensions, Variant::Animated)?;
        let profile = AnimationProfile::for_dimensions(req.dimensions);
        let mut frame = self
            .render(req, Variant::Animated, profile.device_scale)
            .await?;
        let artifact = self
            .compositor
            .capture_animation(&mut frame, &profile, &self.staging)
            .await?;
        let warnings = frame.warnings().to_vec();
        drop(frame);
        self.publish(artifact, owner, warnings).await
    }

    /// Generate every creative of `batch` concurrently, bounded by the worker pool.
    ///
    /// Items come back in `(size, image)` order; a failed item does not affect the others.
    #[tracing::instrument(skip_all, fields(sizes = batch.sizes.len(), images = batch.images.len()))]
    pub async fn generate_batch(&self, batch: &BatchRequest) -> AdcraftResult<Vec<BatchItem>> {
        let requests = batch.expand()?;
        let mut tasks = JoinSet::new();
        for (index, req) in requests.into_iter().enumerate() {
            let pipeline = self.clone();
            let owner = batch.owner.clone();
            let variant = batch.variant;
            tasks.spawn(async move {
                let result = match variant {
                    Variant::Static => pipeline.generate_static_creative(&req, &owner).await,
                    Variant::Animated => pipeline.generate_animated_creative(&req, &owner).await,
                };
                (
                    index,
                    BatchItem {
                        size: req.dimensions,
                        phrase: req.phrase,
                        result,
                    },
                )
            });
        }

        let mut items = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, item) =
                joined.map_err(|e| AdcraftError::render(format!("batch task failed: {e}")))?;
            if let Err(e) = &item.result {
                warn!(size = %item.size, error = %e, "batch item failed");
            }
            items.push((index, item));
        }
        items.sort_by_key(|(i, _)| *i);

        let ok = items.iter().filter(|(_, it)| it.result.is_ok()).count();
        info!(ok, failed = items.len() - ok, "batch finished");
        Ok(items.into_iter().map(|(_, it)| it).collect())
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
