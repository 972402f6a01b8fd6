//! Size-specific layout templates.
//!
//! Each template is a plain function from request data to a [`LayoutDocument`]. Geometry is tuned
//! per size in the submodules; the helpers here only assemble elements from that geometry.

pub(crate) mod animated;
pub(crate) mod static_ads;

use crate::foundation::core::{Dimensions, Rect, Variant};
use crate::layout::anim::AnimationTrack;
use crate::layout::document::{Element, ElementKind, FontDecl, LayoutDocument, Slot};
use crate::request::CreativeRequest;
use crate::text::caption::ProcessedCaption;
use crate::text::fit::{FitSpec, TextRole};

/// Inputs a template lays out.
#[derive(Clone, Copy, Debug)]
pub struct TemplateInput<'a> {
    pub request: &'a CreativeRequest,
    pub caption: &'a ProcessedCaption,
}

/// A registered template.
pub type TemplateFn = fn(&TemplateInput<'_>) -> LayoutDocument;

/// Opacity of the secondary caption at rest.
const SECONDARY_OPACITY: f32 = 0.9;

/// Per-size geometry shared by the still and animated layouts.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Geometry {
    pub(crate) size: (u32, u32),
    /// Logo edge length and inset from the top-right corner.
    pub(crate) logo: (f64, f64),
    /// Top of the text section.
    pub(crate) text_top: f64,
    /// Text section width as a fraction of the viewport width.
    pub(crate) text_width: f64,
    pub(crate) primary_height: f64,
    pub(crate) text_gap: f64,
    pub(crate) secondary_height: f64,
    /// Image box: top, height, width.
    pub(crate) image: (f64, f64, f64),
    pub(crate) primary_fit: (f32, f32),
    pub(crate) secondary_fit: (f32, f32),
    /// Primary captions are always drawn at the role default.
    pub(crate) secondary_weight: u16,
}

/// CTA button geometry for still layouts.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ButtonGeometry {
    pub(crate) width: f64,
    pub(crate) height: f64,
    /// Distance from the viewport bottom.
    pub(crate) bottom: f64,
    pub(crate) corner_radius: f64,
    pub(crate) font_px: f32,
    pub(crate) font_weight: u16,
}

impl Geometry {
    fn viewport(&self) -> Dimensions {
        Dimensions {
            width: self.size.0,
            height: self.size.1,
        }
    }

    fn width(&self) -> f64 {
        f64::from(self.size.0)
    }

    fn height(&self) -> f64 {
        f64::from(self.size.1)
    }

    fn centered(&self, top: f64, width: f64, height: f64) -> Rect {
        let x0 = ((self.width() - width) / 2.0).max(0.0);
        Rect::new(x0, top, x0 + width.min(self.width()), top + height)
    }

    fn logo_frame(&self) -> Rect {
        let (edge, inset) = self.logo;
        let x1 = self.width() - inset;
        Rect::new(x1 - edge, inset, x1, inset + edge)
    }

    fn primary_frame(&self) -> Rect {
        self.centered(
            self.text_top,
            self.width() * self.text_width,
            self.primary_height,
        )
    }

    fn secondary_frame(&self) -> Rect {
        self.centered(
            self.text_top + self.primary_height + self.text_gap,
            self.width() * self.text_width,
            self.secondary_height,
        )
    }

    fn image_frame(&self) -> Rect {
        let (top, height, width) = self.image;
        self.centered(top, width, height)
    }
}

/// Background, logo, captions and image shared by every template.
pub(crate) fn base_document(
    input: &TemplateInput<'_>,
    geometry: &Geometry,
    variant: Variant,
) -> LayoutDocument {
    let req = input.request;
    let mut doc = LayoutDocument::new(
        geometry.viewport(),
        variant,
        req.bg_color,
        FontDecl {
            family: req.font_family.clone(),
            source_url: req.font_source_url.clone(),
        },
    );

    doc.elements.push(Element::image(
        Slot::MainImage,
        geometry.image_frame(),
        req.main_image_url.clone(),
    ));
    doc.elements.push(Element::image(
        Slot::Logo,
        geometry.logo_frame(),
        req.logo_url.clone(),
    ));

    if !input.caption.primary_text.is_empty() {
        doc.elements.push(Element::text(
            Slot::Primary,
            geometry.primary_frame(),
            input.caption.primary_text.clone(),
            req.text_color,
        ));
        let (start, min) = geometry.primary_fit;
        doc.fits.push(FitSpec::new(TextRole::Primary, start, min));
    }
    if input.caption.has_secondary() {
        doc.elements.push(
            Element::text(
                Slot::Secondary,
                geometry.secondary_frame(),
                input.caption.secondary_text.clone(),
                req.text_color,
            )
            .with_opacity(SECONDARY_OPACITY)
            .with_weight(geometry.secondary_weight),
        );
        let (start, min) = geometry.secondary_fit;
        doc.fits.push(FitSpec::new(TextRole::Secondary, start, min));
    }
    doc
}

/// Still layout: base document plus the CTA button when a label is present.
pub(crate) fn still_document(
    input: &TemplateInput<'_>,
    geometry: &Geometry,
    button: &ButtonGeometry,
) -> LayoutDocument {
    let mut doc = base_document(input, geometry, Variant::Static);
    if let Some(label) = input.request.cta_label() {
        let top = geometry.height() - button.bottom - button.height;
        doc.elements.push(Element {
            slot: Slot::Cta,
            frame: geometry.centered(top, button.width, button.height),
            opacity: 1.0,
            kind: ElementKind::Button {
                label: label.to_uppercase(),
                fill: input.request.cta_color,
                text_color: input.request.cta_text_color,
                corner_radius: button.corner_radius,
                weight: button.font_weight,
            },
        });
        // Button labels keep their size.
        doc.fits
            .push(FitSpec::new(TextRole::Cta, button.font_px, button.font_px));
    }
    doc
}

/// Animated layout: base document with `fadeUp` on captions and image.
///
/// `stagger_ms` delays the secondary caption and the image respectively.
pub(crate) fn animated_document(
    input: &TemplateInput<'_>,
    geometry: &Geometry,
    rise_px: f64,
    stagger_ms: (u32, u32),
) -> LayoutDocument {
    let mut doc = base_document(input, geometry, Variant::Animated);
    for slot in [Slot::Primary, Slot::Secondary, Slot::MainImage] {
        if doc.element(slot).is_none() {
            continue;
        }
        let delay = match slot {
            Slot::Secondary => stagger_ms.0,
            Slot::MainImage => stagger_ms.1,
            _ => 0,
        };
        doc.tracks
            .push(AnimationTrack::fade_up(slot, rise_px, delay));
    }
    doc
}

#[cfg(test)]
#[path = "../../../tests/unit/layout/templates.rs"]
mod tests;
