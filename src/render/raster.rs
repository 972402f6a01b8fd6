use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::color::CssColor;
use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::layout::document::{ElementKind, LayoutDocument, Slot};
use crate::text::fit::FitOutcome;
use crate::text::shape::TextBrushRgba8;

/// A rasterized frame.
///
/// Frames leave the painter **premultiplied**; the flag keeps that explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

#[derive(Clone)]
pub(crate) struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

impl ImagePaint {
    pub(crate) fn from_prepared(prepared: &PreparedImage) -> AdcraftResult<Self> {
        let pixmap =
            pixmap_from_premul_bytes(&prepared.rgba8_premul, prepared.width, prepared.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: prepared.width,
            h: prepared.height,
        })
    }
}

/// Caption shaped at its fitted size, positioned in CSS pixels.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) origin: Point,
    pub(crate) fit: FitOutcome,
}

/// Everything a stable page needs to paint any frame of its document.
pub(crate) struct SceneAssets {
    pub(crate) images: HashMap<Slot, ImagePaint>,
    pub(crate) texts: HashMap<Slot, ShapedText>,
    pub(crate) font: Option<vello_cpu::peniko::FontData>,
}

/// CPU painter backed by `vello_cpu`. Reuses its render context across frames.
pub(crate) struct Painter {
    width: u16,
    height: u16,
    scale: f64,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Painter {
    /// Allocate a painter for a `width x height` CSS viewport at `scale` device pixels per CSS px.
    pub(crate) fn new(css_width: u32, css_height: u32, scale: u32) -> AdcraftResult<Self> {
        let scale = scale.max(1);
        let to_u16 = |v: u32, what: &str| -> AdcraftResult<u16> {
            v.checked_mul(scale)
                .and_then(|px| u16::try_from(px).ok())
                .filter(|px| *px > 0)
                .ok_or_else(|| AdcraftError::render(format!("page {what} exceeds raster limits")))
        };
        let width = to_u16(css_width, "width")?;
        let height = to_u16(css_height, "height")?;
        Ok(Self {
            width,
            height,
            scale: f64::from(scale),
            ctx: Some(vello_cpu::RenderContext::new(width, height)),
        })
    }

    #[cfg(test)]
    pub(crate) fn pixel_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Paint `doc` at `t_ms` and return the premultiplied frame.
    pub(crate) fn paint(
        &mut self,
        doc: &LayoutDocument,
        assets: &SceneAssets,
        t_ms: f64,
    ) -> AdcraftResult<FrameRGBA> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == self.width && ctx.height() == self.height => ctx,
            _ => vello_cpu::RenderContext::new(self.width, self.height),
        };
        ctx.reset();

        let root = Affine::scale(self.scale);
        ctx.set_transform(affine_to_cpu(root));
        ctx.set_paint(cpu_color(doc.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(doc.viewport.width),
            f64::from(doc.viewport.height),
        ));

        let poses = doc.sample(t_ms);
        for (el, pose) in doc.elements.iter().zip(poses) {
            if pose.opacity <= 0.0 {
                continue;
            }
            let tr = root * Affine::translate(pose.offset);
            let layered = pose.opacity < 1.0;
            if layered {
                ctx.push_opacity_layer(pose.opacity);
            }
            match &el.kind {
                ElementKind::Image { .. } => {
                    if let Some(img) = assets.images.get(&el.slot) {
                        draw_image_contain(&mut ctx, tr, el.frame, img);
                    }
                }
                ElementKind::Text { .. } => {
                    if let (Some(text), Some(font)) = (assets.texts.get(&el.slot), &assets.font) {
                        draw_text(&mut ctx, tr, text, font);
                    }
                }
                ElementKind::Button {
                    fill,
                    corner_radius,
                    ..
                } => {
                    let rr = vello_cpu::kurbo::RoundedRect::new(
                        el.frame.x0,
                        el.frame.y0,
                        el.frame.x1,
                        el.frame.y1,
                        *corner_radius,
                    );
                    ctx.set_transform(affine_to_cpu(tr));
                    ctx.set_paint(cpu_color(*fill));
                    ctx.fill_path(&vello_cpu::kurbo::Shape::to_path(&rr, 0.1));
                    if let (Some(text), Some(font)) = (assets.texts.get(&el.slot), &assets.font) {
                        draw_text(&mut ctx, tr, text, font);
                    }
                }
            }
            if layered {
                ctx.pop_layer();
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Scale the image to fit inside `frame` preserving aspect ratio, centered.
fn draw_image_contain(
    ctx: &mut vello_cpu::RenderContext,
    tr: Affine,
    frame: Rect,
    img: &ImagePaint,
) {
    let (iw, ih) = (f64::from(img.w), f64::from(img.h));
    let s = (frame.width() / iw).min(frame.height() / ih);
    if !s.is_finite() || s <= 0.0 {
        return;
    }
    let dx = frame.x0 + (frame.width() - iw * s) / 2.0;
    let dy = frame.y0 + (frame.height() - ih * s) / 2.0;
    let placed = tr * Affine::translate((dx, dy)) * Affine::scale(s);
    ctx.set_transform(affine_to_cpu(placed));
    ctx.set_paint(img.paint.clone());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    tr: Affine,
    text: &ShapedText,
    font: &vello_cpu::peniko::FontData,
) {
    ctx.set_transform(affine_to_cpu(
        tr * Affine::translate(text.origin.to_vec2()),
    ));
    for line in text.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

pub(crate) fn brush(color: CssColor) -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn cpu_color(color: CssColor) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> AdcraftResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AdcraftError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AdcraftError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(AdcraftError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
