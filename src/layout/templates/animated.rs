//! Animated layouts. Captions and image enter with `fadeUp`.

use super::{Geometry, TemplateInput, animated_document};
use crate::layout::document::LayoutDocument;

pub(crate) fn square_1080x1080(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (1080, 1080),
        logo: (100.0, 32.0),
        text_top: 140.0,
        text_width: 0.95,
        primary_height: 200.0,
        text_gap: 32.0,
        secondary_height: 140.0,
        image: (540.0, 500.0, 600.0),
        primary_fit: (56.0, 12.0),
        secondary_fit: (46.0, 10.0),
        secondary_weight: 400,
    };
    animated_document(input, &GEOMETRY, 60.0, (0, 0))
}

pub(crate) fn medium_rectangle_300x250(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (300, 250),
        logo: (24.0, 8.0),
        text_top: 10.0,
        text_width: 0.9,
        primary_height: 48.0,
        text_gap: 4.0,
        secondary_height: 30.0,
        image: (100.0, 140.0, 240.0),
        primary_fit: (16.0, 10.0),
        secondary_fit: (11.0, 8.0),
        secondary_weight: 400,
    };
    animated_document(input, &GEOMETRY, 16.0, (250, 500))
}
