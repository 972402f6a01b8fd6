use std::borrow::Cow;
use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{AdcraftError, AdcraftResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Horizontal alignment of wrapped lines inside their box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Start,
    Center,
}

impl TextAlign {
    fn to_parley(self) -> parley::Alignment {
        match self {
            Self::Start => parley::Alignment::Start,
            Self::Center => parley::Alignment::Center,
        }
    }
}

/// Parley layout engine bound to a single caption face.
///
/// The face is registered once; every layout and measurement uses its family name as the only
/// entry of the font stack, so shaping never consults system fonts.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl TextLayoutEngine {
    /// Register `font_bytes` and build an engine around the first family it declares.
    pub(crate) fn new(font_bytes: Arc<Vec<u8>>) -> AdcraftResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AdcraftError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AdcraftError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Family name reported by the registered face.
    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Face handle for glyph rasterization.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape and wrap `text` at `size_px` and CSS `weight` inside `max_width_px`.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        weight: u16,
        brush: TextBrushRgba8,
        max_width_px: f32,
        align: TextAlign,
    ) -> AdcraftResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AdcraftError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        let max_width = max_width_px.max(1.0);
        layout.break_all_lines(Some(max_width));
        layout.align(
            Some(max_width),
            align.to_parley(),
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    /// Wrapped extent of `text` at `size_px`; widest line by total line height.
    pub(crate) fn measure(
        &mut self,
        text: &str,
        size_px: f32,
        weight: u16,
        max_width_px: f32,
    ) -> AdcraftResult<Size> {
        let layout = self.layout(
            text,
            size_px,
            weight,
            TextBrushRgba8::default(),
            max_width_px,
            TextAlign::Start,
        )?;
        Ok(Size::new(
            f64::from(layout.width()),
            f64::from(layout.height()),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shape.rs"]
mod tests;
