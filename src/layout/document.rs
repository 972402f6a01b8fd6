use crate::assets::color::CssColor;
use crate::foundation::core::{Dimensions, Rect, Variant, Vec2};
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::layout::anim::{AnimationTrack, ElementPose};
use crate::text::fit::{FitSpec, TextRole};
use crate::text::shape::TextAlign;

/// Element slot in a creative. Every slot appears at most once per document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Logo,
    MainImage,
    Primary,
    Secondary,
    Cta,
}

impl Slot {
    /// Text role drawn in this slot, if any.
    pub fn text_role(self) -> Option<TextRole> {
        match self {
            Self::Primary => Some(TextRole::Primary),
            Self::Secondary => Some(TextRole::Secondary),
            Self::Cta => Some(TextRole::Cta),
            Self::Logo | Self::MainImage => None,
        }
    }
}

/// Font declared by the document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDecl {
    pub family: String,
    pub source_url: Option<String>,
}

/// What an element draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ElementKind {
    /// Image scaled with `contain` semantics and centered in the frame.
    Image { source: String },
    /// Wrapped caption text.
    Text {
        text: String,
        color: CssColor,
        align: TextAlign,
        /// CSS font weight, 100 to 900.
        weight: u16,
    },
    /// Rounded button with a centered single label.
    Button {
        label: String,
        fill: CssColor,
        text_color: CssColor,
        corner_radius: f64,
        /// CSS font weight of the label.
        weight: u16,
    },
}

/// One positioned element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub slot: Slot,
    /// Box in CSS pixels.
    pub frame: Rect,
    /// Resting opacity when no animation applies.
    pub opacity: f32,
    pub kind: ElementKind,
}

impl Element {
    /// Image element at full opacity.
    pub fn image(slot: Slot, frame: Rect, source: impl Into<String>) -> Self {
        Self {
            slot,
            frame,
            opacity: 1.0,
            kind: ElementKind::Image {
                source: source.into(),
            },
        }
    }

    /// Centered text element at its role's default weight.
    pub fn text(slot: Slot, frame: Rect, text: impl Into<String>, color: CssColor) -> Self {
        Self {
            slot,
            frame,
            opacity: 1.0,
            kind: ElementKind::Text {
                text: text.into(),
                color,
                align: TextAlign::Center,
                weight: slot
                    .text_role()
                    .map_or(400, TextRole::default_weight),
            },
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Override the font weight of a text or button element.
    pub fn with_weight(mut self, font_weight: u16) -> Self {
        match &mut self.kind {
            ElementKind::Text { weight, .. } | ElementKind::Button { weight, .. } => {
                *weight = font_weight;
            }
            ElementKind::Image { .. } => {}
        }
        self
    }

    /// Font weight of the text this element shapes.
    pub fn font_weight(&self) -> Option<u16> {
        match &self.kind {
            ElementKind::Text { weight, .. } | ElementKind::Button { weight, .. } => Some(*weight),
            ElementKind::Image { .. } => None,
        }
    }

    /// Text this element shapes, if it carries any.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { text, .. } => Some(text),
            ElementKind::Button { label, .. } => Some(label),
            ElementKind::Image { .. } => None,
        }
    }
}

/// Typed, self-contained layout of one creative.
///
/// Produced by a template, consumed by the renderer, never persisted.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub viewport: Dimensions,
    pub variant: Variant,
    pub background: CssColor,
    pub font: FontDecl,
    /// Paint order, back to front.
    pub elements: Vec<Element>,
    /// Shrink-to-fit rule per text role present.
    pub fits: Vec<FitSpec>,
    pub tracks: Vec<AnimationTrack>,
}

impl LayoutDocument {
    pub fn new(viewport: Dimensions, variant: Variant, background: CssColor, font: FontDecl) -> Self {
        Self {
            viewport,
            variant,
            background,
            font,
            elements: Vec::new(),
            fits: Vec::new(),
            tracks: Vec::new(),
        }
    }

    pub fn element(&self, slot: Slot) -> Option<&Element> {
        self.elements.iter().find(|e| e.slot == slot)
    }

    pub fn fit_for(&self, role: TextRole) -> Option<&FitSpec> {
        self.fits.iter().find(|f| f.role == role)
    }

    /// Whether any keyframe track is attached.
    pub fn is_animated(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Check structural consistency against the page viewport.
    pub fn validate(&self, viewport: Dimensions) -> AdcraftResult<()> {
        if self.viewport != viewport {
            return Err(AdcraftError::validation(format!(
                "document viewport {} does not match page viewport {viewport}",
                self.viewport
            )));
        }

        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        );
        for (i, el) in self.elements.iter().enumerate() {
            let f = el.frame;
            if !(f.x0.is_finite() && f.y0.is_finite() && f.x1.is_finite() && f.y1.is_finite()) {
                return Err(AdcraftError::validation(format!(
                    "element {i} ({:?}) has a non-finite frame",
                    el.slot
                )));
            }
            if f.width() <= 0.0 || f.height() <= 0.0 {
                return Err(AdcraftError::validation(format!(
                    "element {i} ({:?}) has a degenerate frame",
                    el.slot
                )));
            }
            if f.intersect(bounds).area() <= 0.0 {
                return Err(AdcraftError::validation(format!(
                    "element {i} ({:?}) lies outside the viewport",
                    el.slot
                )));
            }
            if !(0.0..=1.0).contains(&el.opacity) {
                return Err(AdcraftError::validation(format!(
                    "element {i} ({:?}) opacity must be in [0, 1]",
                    el.slot
                )));
            }
            if self.elements[..i].iter().any(|o| o.slot == el.slot) {
                return Err(AdcraftError::validation(format!(
                    "slot {:?} appears more than once",
                    el.slot
                )));
            }
        }

        for fit in &self.fits {
            if !(fit.start_px.is_finite() && fit.start_px > 0.0 && fit.min_px > 0.0) {
                return Err(AdcraftError::validation(format!(
                    "fit rule for {:?} must have positive sizes",
                    fit.role
                )));
            }
        }

        for track in &self.tracks {
            if self.element(track.target).is_none() {
                return Err(AdcraftError::validation(format!(
                    "animation targets missing slot {:?}",
                    track.target
                )));
            }
        }
        Ok(())
    }

    /// Pose of every element at `t_ms`, in paint order.
    ///
    /// Elements without an applicable track rest at their own opacity. The last track targeting a
    /// slot wins.
    pub fn sample(&self, t_ms: f64) -> Vec<ElementPose> {
        self.elements
            .iter()
            .map(|el| {
                self.tracks
                    .iter()
                    .rev()
                    .filter(|t| t.target == el.slot)
                    .find_map(|t| t.sample(t_ms))
                    .map(|k| ElementPose {
                        opacity: k.opacity,
                        offset: Vec2::new(0.0, k.translate_y),
                    })
                    .unwrap_or_else(|| ElementPose::resting(el.opacity))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/document.rs"]
mod tests;
