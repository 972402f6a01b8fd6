use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest raster edge accepted for an SVG logo.
const MAX_SVG_DIM: u32 = 8_192;

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub(crate) struct PreparedImage {
    /// Width in pixels.
    pub(crate) width: u32,
    /// Height in pixels.
    pub(crate) height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub(crate) rgba8_premul: Arc<Vec<u8>>,
}

/// Decode an encoded raster (PNG/JPEG/WebP/GIF) or SVG document into premultiplied RGBA8.
///
/// SVGs are rasterized so that they fill `target_px` (contain fit) without upscaling blur.
pub(crate) fn decode_image(bytes: &[u8], target_px: (u32, u32)) -> AdcraftResult<PreparedImage> {
    if looks_like_svg(bytes) {
        let tree = parse_svg(bytes)?;
        return rasterize_svg(&tree, target_px);
    }

    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

fn parse_svg(bytes: &[u8]) -> AdcraftResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Compute the contain-fit raster size for an SVG inside `target_px`.
pub(crate) fn svg_raster_size(svg_w: f32, svg_h: f32, target_px: (u32, u32)) -> AdcraftResult<(u32, u32)> {
    if !svg_w.is_finite() || !svg_h.is_finite() || svg_w <= 0.0 || svg_h <= 0.0 {
        return Err(AdcraftError::render("svg has invalid width/height"));
    }
    let (tw, th) = (target_px.0.max(1) as f32, target_px.1.max(1) as f32);
    let scale = (tw / svg_w).min(th / svg_h);
    let w = ((svg_w * scale).ceil() as u32).max(1);
    let h = ((svg_h * scale).ceil() as u32).max(1);
    if w > MAX_SVG_DIM || h > MAX_SVG_DIM {
        return Err(AdcraftError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }
    Ok((w, h))
}

fn rasterize_svg(tree: &usvg::Tree, target_px: (u32, u32)) -> AdcraftResult<PreparedImage> {
    let size = tree.size();
    let (width, height) = svg_raster_size(size.width(), size.height(), target_px)?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AdcraftError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
