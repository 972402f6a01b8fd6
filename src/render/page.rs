use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::OwnedSemaphorePermit;
use tracing::{debug, warn};

use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::font::{FontBytes, FontResolver};
use crate::assets::fetch::AssetLoader;
use crate::assets::{AssetLoadWarning, AssetRole};
use crate::foundation::core::{Dimensions, Point, Size};
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::layout::document::{ElementKind, LayoutDocument, Slot};
use crate::render::raster::{FrameRGBA, ImagePaint, Painter, SceneAssets, ShapedText, brush};
use crate::text::fit::{FitOutcome, shrink_to_fit};
use crate::text::shape::{TextAlign, TextLayoutEngine};

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a [`RenderPage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PageState {
    Initializing,
    ContentLoaded,
    AssetsSettling,
    Stable,
    Captured,
}

impl PageState {
    fn can_advance_to(self, next: Self) -> bool {
        use PageState::*;
        matches!(
            (self, next),
            (Initializing, ContentLoaded)
                | (ContentLoaded, AssetsSettling)
                | (AssetsSettling, Stable)
                | (Stable, Captured)
                | (Captured, Captured)
        )
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// State moved onto the blocking pool for CPU work and back.
struct Scene {
    painter: Painter,
    assets: SceneAssets,
}

/// An owned, single-use rendering surface at an exact viewport.
///
/// Holds one worker-pool slot from creation until drop. Not `Clone`; dropping the page (including
/// by cancelling the future that owns it) releases the slot.
pub struct RenderPage {
    id: u64,
    viewport: Dimensions,
    scale: u32,
    state: PageState,
    document: Option<Arc<LayoutDocument>>,
    scene: Option<Box<Scene>>,
    captures: u32,
    _permit: OwnedSemaphorePermit,
}

impl fmt::Debug for RenderPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPage")
            .field("id", &self.id)
            .field("viewport", &self.viewport)
            .field("scale", &self.scale)
            .field("state", &self.state)
            .field("captures", &self.captures)
            .finish_non_exhaustive()
    }
}

impl RenderPage {
    /// Open a page on an acquired worker slot.
    pub(crate) fn open(permit: OwnedSemaphorePermit, viewport: Dimensions, scale: u32) -> Self {
        let id = NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed);
        debug!(page = id, %viewport, scale, "page opened");
        Self {
            id,
            viewport,
            scale: scale.max(1),
            state: PageState::Initializing,
            document: None,
            scene: None,
            captures: 0,
            _permit: permit,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn viewport(&self) -> Dimensions {
        self.viewport
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Number of captures taken so far.
    pub fn captures(&self) -> u32 {
        self.captures
    }

    pub fn document(&self) -> Option<&LayoutDocument> {
        self.document.as_deref()
    }

    /// Physical output size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.viewport.scaled(self.scale)
    }

    fn advance(&mut self, next: PageState) -> AdcraftResult<()> {
        if !self.state.can_advance_to(next) {
            return Err(AdcraftError::render(format!(
                "page {}: invalid transition {} -> {}",
                self.id, self.state, next
            )));
        }
        self.state = next;
        Ok(())
    }

    /// Load a document: validate it against the viewport and allocate the raster surface.
    pub(crate) async fn load_content(&mut self, document: LayoutDocument) -> AdcraftResult<()> {
        if self.state != PageState::Initializing {
            return Err(AdcraftError::render(format!(
                "page {}: content already loaded",
                self.id
            )));
        }
        document.validate(self.viewport)?;

        let (w, h, scale) = (self.viewport.width, self.viewport.height, self.scale);
        let painter = tokio::task::spawn_blocking(move || Painter::new(w, h, scale))
            .await
            .map_err(|e| AdcraftError::render(format!("page setup task failed: {e}")))??;

        self.document = Some(Arc::new(document));
        self.scene = Some(Box::new(Scene {
            painter,
            assets: SceneAssets {
                images: HashMap::new(),
                texts: HashMap::new(),
                font: None,
            },
        }));
        self.advance(PageState::ContentLoaded)?;
        debug!(page = self.id, "content loaded");
        Ok(())
    }

    /// Fetch and decode every asset, then fit and shape text.
    ///
    /// Individual asset failures become warnings; only internal failures are errors.
    pub(crate) async fn settle(
        &mut self,
        loader: &AssetLoader,
        fonts: &FontResolver,
    ) -> AdcraftResult<Vec<AssetLoadWarning>> {
        self.advance(PageState::AssetsSettling)?;
        let doc = self
            .document
            .clone()
            .ok_or_else(|| AdcraftError::render("settling a page without content"))?;

        let mut warnings = Vec::new();
        let needs_font = doc.elements.iter().any(|e| e.text_content().is_some());
        let image_sources: Vec<(Slot, String)> = doc
            .elements
            .iter()
            .filter_map(|e| match &e.kind {
                ElementKind::Image { source } => Some((e.slot, source.clone())),
                _ => None,
            })
            .collect();

        let mut image_fetches = tokio::task::JoinSet::new();
        for (slot, src) in image_sources {
            let loader = loader.clone();
            image_fetches.spawn(async move {
                let res = loader.fetch(&src).await;
                (slot, src, res)
            });
        }
        let mut font_warnings = Vec::new();
        let font = if needs_font {
            fonts
                .resolve(loader, doc.font.source_url.as_deref(), &mut font_warnings)
                .await
        } else {
            None
        };
        warnings.append(&mut font_warnings);

        let mut fetched = Vec::new();
        while let Some(joined) = image_fetches.join_next().await {
            let item = joined
                .map_err(|e| AdcraftError::render(format!("asset fetch task failed: {e}")))?;
            fetched.push(item);
        }
        // Join order is completion order; keep warnings stable.
        fetched.sort_by_key(|(slot, _, _)| *slot);

        let mut encoded = Vec::new();
        for (slot, src, res) in fetched {
            match res {
                Ok(bytes) => encoded.push((slot, src, bytes)),
                Err(e) => {
                    let w = AssetLoadWarning::new(role_for(slot), Some(&src), e.to_string());
                    warn!(page = self.id, warning = %w, "asset load failed");
                    warnings.push(w);
                }
            }
        }

        let mut scene = self
            .scene
            .take()
            .ok_or_else(|| AdcraftError::render("page lost its raster state"))?;
        let scale = self.scale;
        let page = self.id;
        let (scene, settle_warnings) = tokio::task::spawn_blocking(move || {
            let warnings = prepare_scene(&mut scene, &doc, encoded, font, scale, page);
            (scene, warnings)
        })
        .await
        .map_err(|e| AdcraftError::render(format!("asset settle task failed: {e}")))?;
        self.scene = Some(scene);

        for w in &settle_warnings {
            warn!(page = self.id, warning = %w, "asset unusable");
        }
        warnings.extend(settle_warnings);
        self.advance(PageState::Stable)?;
        debug!(page = self.id, warnings = warnings.len(), "page stable");
        Ok(warnings)
    }

    /// Fit result for a text slot, available while the page is idle.
    pub(crate) fn text_fit(&self, slot: Slot) -> Option<FitOutcome> {
        self.scene
            .as_ref()
            .and_then(|s| s.assets.texts.get(&slot))
            .map(|t| t.fit)
    }

    /// Whether a decoded image is ready for `slot`.
    #[cfg(test)]
    pub(crate) fn has_image(&self, slot: Slot) -> bool {
        self.scene
            .as_ref()
            .is_some_and(|s| s.assets.images.contains_key(&slot))
    }

    /// Rasterize the document at `t_ms` on the blocking pool.
    pub(crate) async fn capture_at(&mut self, t_ms: f64) -> AdcraftResult<FrameRGBA> {
        if !matches!(self.state, PageState::Stable | PageState::Captured) {
            return Err(AdcraftError::render(format!(
                "page {}: capture before stable (state {})",
                self.id, self.state
            )));
        }
        let doc = self
            .document
            .clone()
            .ok_or_else(|| AdcraftError::render("capturing a page without content"))?;
        let mut scene = self
            .scene
            .take()
            .ok_or_else(|| AdcraftError::render("page lost its raster state"))?;

        let (scene, frame) = tokio::task::spawn_blocking(move || {
            let frame = scene.painter.paint(&doc, &scene.assets, t_ms);
            (scene, frame)
        })
        .await
        .map_err(|e| AdcraftError::render(format!("capture task failed: {e}")))?;
        self.scene = Some(scene);
        let frame = frame?;

        self.advance(PageState::Captured)?;
        self.captures += 1;
        Ok(frame)
    }
}

impl Drop for RenderPage {
    fn drop(&mut self) {
        debug!(
            page = self.id,
            state = %self.state,
            captures = self.captures,
            "page closed"
        );
    }
}

fn role_for(slot: Slot) -> AssetRole {
    match slot {
        Slot::Logo => AssetRole::Logo,
        _ => AssetRole::MainImage,
    }
}

/// Decode images, build the text engine, run shrink-to-fit and shape captions.
fn prepare_scene(
    scene: &mut Scene,
    doc: &LayoutDocument,
    encoded: Vec<(Slot, String, Vec<u8>)>,
    font: Option<FontBytes>,
    scale: u32,
    page: u64,
) -> Vec<AssetLoadWarning> {
    let mut warnings = Vec::new();

    for (slot, src, bytes) in encoded {
        let Some(el) = doc.element(slot) else {
            continue;
        };
        let target = (
            (el.frame.width() * f64::from(scale)).ceil().max(1.0) as u32,
            (el.frame.height() * f64::from(scale)).ceil().max(1.0) as u32,
        );
        let decoded: AdcraftResult<PreparedImage> = decode_image(&bytes, target);
        match decoded.and_then(|img| ImagePaint::from_prepared(&img)) {
            Ok(paint) => {
                scene.assets.images.insert(slot, paint);
            }
            Err(e) => warnings.push(AssetLoadWarning::new(role_for(slot), Some(&src), e.to_string())),
        }
    }

    let Some(font) = font else {
        return warnings;
    };
    let mut engine = match TextLayoutEngine::new(font.bytes) {
        Ok(engine) => engine,
        Err(e) => {
            warnings.push(AssetLoadWarning::new(
                AssetRole::Font,
                None,
                format!("{e}; captions are not drawn"),
            ));
            return warnings;
        }
    };
    debug!(
        page,
        declared = %doc.font.family,
        resolved = engine.family_name(),
        origin = ?font.origin,
        "font ready"
    );

    for el in &doc.elements {
        let (Some(role), Some(text)) = (el.slot.text_role(), el.text_content()) else {
            continue;
        };
        let Some(spec) = doc.fit_for(role) else {
            continue;
        };
        let (color, align, weight) = match &el.kind {
            ElementKind::Text {
                color,
                align,
                weight,
                ..
            } => (*color, *align, *weight),
            ElementKind::Button {
                text_color, weight, ..
            } => (*text_color, TextAlign::Center, *weight),
            ElementKind::Image { .. } => continue,
        };

        let bounds = el.frame.size();
        let max_width = bounds.width as f32;
        let mut measure_error = None;
        let fit = shrink_to_fit(spec, bounds, |px| {
            engine.measure(text, px, weight, max_width).unwrap_or_else(|e| {
                measure_error.get_or_insert(e);
                Size::ZERO
            })
        });
        if let Some(e) = measure_error {
            warnings.push(AssetLoadWarning::new(AssetRole::Font, None, e.to_string()));
            continue;
        }
        if fit.overflows {
            debug!(page, ?role, size_px = fit.size_px, "text still overflows at minimum size");
        }

        let layout = match engine.layout(text, fit.size_px, weight, brush(color), max_width, align) {
            Ok(layout) => layout,
            Err(e) => {
                warnings.push(AssetLoadWarning::new(AssetRole::Font, None, e.to_string()));
                continue;
            }
        };
        // Buttons center their label vertically; captions flow from the top of their box.
        let dy = match el.kind {
            ElementKind::Button { .. } => ((bounds.height - f64::from(layout.height())) / 2.0).max(0.0),
            _ => 0.0,
        };
        scene.assets.texts.insert(
            el.slot,
            ShapedText {
                layout,
                origin: Point::new(el.frame.x0, el.frame.y0 + dy),
                fit,
            },
        );
    }
    scene.assets.font = Some(engine.font().clone());
    warnings
}

#[cfg(test)]
#[path = "../../tests/unit/render/page.rs"]
mod tests;
