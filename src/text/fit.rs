use crate::foundation::core::Size;

/// Caption slot a fit rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    /// Headline caption.
    Primary,
    /// Follow-up caption.
    Secondary,
    /// Label inside the call-to-action button.
    Cta,
}

impl TextRole {
    /// CSS font weight a role is drawn at unless its template overrides it.
    pub const fn default_weight(self) -> u16 {
        match self {
            Self::Primary | Self::Cta => 600,
            Self::Secondary => 400,
        }
    }
}

/// Shrink-to-fit rule declared by a template for one text role.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitSpec {
    pub role: TextRole,
    /// Font size the fit pass starts from.
    pub start_px: f32,
    /// Floor; the pass never shrinks below it.
    pub min_px: f32,
    /// Decrement per attempt.
    pub step_px: f32,
}

impl FitSpec {
    /// Default step used by every template.
    pub const DEFAULT_STEP_PX: f32 = 2.0;

    pub const fn new(role: TextRole, start_px: f32, min_px: f32) -> Self {
        Self {
            role,
            start_px,
            min_px,
            step_px: Self::DEFAULT_STEP_PX,
        }
    }
}

/// Result of a fit pass for one role.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FitOutcome {
    /// Final font size.
    pub(crate) size_px: f32,
    /// Measured extent of the laid-out text at `size_px`.
    pub(crate) extent: Size,
    /// Still overflowing at the floor.
    pub(crate) overflows: bool,
    /// Number of sizes measured.
    pub(crate) attempts: u32,
}

/// Shrink a text block until it fits `bounds`.
///
/// Starting at `spec.start_px`, `measure` lays the text out at a candidate size and returns its
/// extent. While the size is above `spec.min_px` and the extent overflows the bounds in either
/// axis, the size drops by `spec.step_px`. A step that would pass the floor lands on it instead,
/// so a start of 11 px with an 8 px floor measures 11, 9 and 8, never 7. A start size already at
/// or below the floor is measured once and kept.
pub(crate) fn shrink_to_fit(
    spec: &FitSpec,
    bounds: Size,
    mut measure: impl FnMut(f32) -> Size,
) -> FitOutcome {
    let step = if spec.step_px.is_finite() && spec.step_px > 0.0 {
        spec.step_px
    } else {
        FitSpec::DEFAULT_STEP_PX
    };

    let mut size = spec.start_px;
    let mut attempts = 0u32;
    loop {
        let extent = measure(size);
        attempts += 1;
        let overflows = overflows(extent, bounds);
        if !overflows || size <= spec.min_px {
            return FitOutcome {
                size_px: size,
                extent,
                overflows,
                attempts,
            };
        }
        size = (size - step).max(spec.min_px);
    }
}

fn overflows(extent: Size, bounds: Size) -> bool {
    // Sub-pixel slack absorbs float noise from glyph advances.
    const EPS: f64 = 0.5;
    extent.width > bounds.width + EPS || extent.height > bounds.height + EPS
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
