//! Still layouts, one per supported size.

use super::{ButtonGeometry, Geometry, TemplateInput, still_document};
use crate::layout::document::LayoutDocument;

pub(crate) fn medium_rectangle_300x250(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (300, 250),
        logo: (26.0, 8.0),
        text_top: 6.0,
        text_width: 0.8,
        primary_height: 32.0,
        text_gap: 4.0,
        secondary_height: 20.0,
        image: (66.0, 120.0, 240.0),
        primary_fit: (12.0, 12.0),
        secondary_fit: (8.0, 10.0),
        secondary_weight: 500,
    };
    const BUTTON: ButtonGeometry = ButtonGeometry {
        width: 75.0,
        height: 18.0,
        bottom: 8.0,
        corner_radius: 2.0,
        font_px: 6.0,
        font_weight: 600,
    };
    still_document(input, &GEOMETRY, &BUTTON)
}

pub(crate) fn skyscraper_160x600(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (160, 600),
        logo: (32.0, 12.0),
        text_top: 56.0,
        text_width: 0.85,
        primary_height: 150.0,
        text_gap: 12.0,
        secondary_height: 110.0,
        image: (340.0, 180.0, 144.0),
        primary_fit: (24.0, 16.0),
        secondary_fit: (16.0, 12.0),
        secondary_weight: 400,
    };
    const BUTTON: ButtonGeometry = ButtonGeometry {
        width: 136.0,
        height: 44.0,
        bottom: 20.0,
        corner_radius: 8.0,
        font_px: 14.0,
        font_weight: 700,
    };
    still_document(input, &GEOMETRY, &BUTTON)
}

pub(crate) fn portrait_320x480(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (320, 480),
        logo: (40.0, 8.0),
        text_top: 40.0,
        text_width: 0.8,
        primary_height: 72.0,
        text_gap: 8.0,
        secondary_height: 56.0,
        image: (184.0, 200.0, 288.0),
        primary_fit: (20.0, 12.0),
        secondary_fit: (18.0, 10.0),
        secondary_weight: 500,
    };
    const BUTTON: ButtonGeometry = ButtonGeometry {
        width: 120.0,
        height: 32.0,
        bottom: 48.0,
        corner_radius: 4.0,
        font_px: 14.0,
        font_weight: 600,
    };
    still_document(input, &GEOMETRY, &BUTTON)
}

pub(crate) fn square_1080x1080(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (1080, 1080),
        logo: (80.0, 32.0),
        text_top: 120.0,
        text_width: 0.8,
        primary_height: 200.0,
        text_gap: 32.0,
        secondary_height: 130.0,
        image: (500.0, 380.0, 972.0),
        primary_fit: (56.0, 12.0),
        secondary_fit: (46.0, 10.0),
        secondary_weight: 400,
    };
    const BUTTON: ButtonGeometry = ButtonGeometry {
        width: 420.0,
        height: 100.0,
        bottom: 60.0,
        corner_radius: 12.0,
        font_px: 28.0,
        font_weight: 700,
    };
    still_document(input, &GEOMETRY, &BUTTON)
}

pub(crate) fn square_1440x1440(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (1440, 1440),
        logo: (120.0, 40.0),
        text_top: 120.0,
        text_width: 0.8,
        primary_height: 260.0,
        text_gap: 24.0,
        secondary_height: 150.0,
        image: (580.0, 560.0, 800.0),
        primary_fit: (72.0, 12.0),
        secondary_fit: (46.0, 10.0),
        secondary_weight: 400,
    };
    const BUTTON: ButtonGeometry = ButtonGeometry {
        width: 600.0,
        height: 100.0,
        bottom: 100.0,
        corner_radius: 20.0,
        font_px: 36.0,
        font_weight: 600,
    };
    still_document(input, &GEOMETRY, &BUTTON)
}

pub(crate) fn portrait_1440x1800(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (1440, 1800),
        logo: (120.0, 40.0),
        text_top: 180.0,
        text_width: 0.8,
        primary_height: 280.0,
        text_gap: 24.0,
        secondary_height: 180.0,
        image: (700.0, 720.0, 800.0),
        primary_fit: (72.0, 12.0),
        secondary_fit: (52.0, 10.0),
        secondary_weight: 400,
    };
    const BUTTON: ButtonGeometry = ButtonGeometry {
        width: 600.0,
        height: 100.0,
        bottom: 120.0,
        corner_radius: 20.0,
        font_px: 40.0,
        font_weight: 600,
    };
    still_document(input, &GEOMETRY, &BUTTON)
}

pub(crate) fn story_1440x2560(input: &TemplateInput<'_>) -> LayoutDocument {
    const GEOMETRY: Geometry = Geometry {
        size: (1440, 2560),
        logo: (160.0, 60.0),
        text_top: 260.0,
        text_width: 0.8,
        primary_height: 360.0,
        text_gap: 30.0,
        secondary_height: 260.0,
        image: (990.0, 1100.0, 1320.0),
        primary_fit: (84.0, 12.0),
        secondary_fit: (64.0, 10.0),
        secondary_weight: 400,
    };
    const BUTTON: ButtonGeometry = ButtonGeometry {
        width: 720.0,
        height: 160.0,
        bottom: 160.0,
        corner_radius: 20.0,
        font_px: 60.0,
        font_weight: 600,
    };
    still_document(input, &GEOMETRY, &BUTTON)
}
