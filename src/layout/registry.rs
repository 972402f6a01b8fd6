use std::collections::BTreeMap;

use crate::foundation::core::{Dimensions, Variant};
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::layout::templates::{TemplateFn, animated, static_ads};

/// Exact `(size, variant)` lookup of layout templates.
///
/// Sizes are matched exactly; there is no nearest-size fallback.
#[derive(Clone, Debug)]
pub struct TemplateRegistry {
    templates: BTreeMap<(Dimensions, Variant), TemplateFn>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateRegistry {
    /// Registry with no templates.
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Registry holding every built-in template.
    pub fn builtin() -> Self {
        let mut r = Self::empty();
        let statics: [(u32, u32, TemplateFn); 7] = [
            (300, 250, static_ads::medium_rectangle_300x250),
            (160, 600, static_ads::skyscraper_160x600),
            (320, 480, static_ads::portrait_320x480),
            (1080, 1080, static_ads::square_1080x1080),
            (1440, 1440, static_ads::square_1440x1440),
            (1440, 1800, static_ads::portrait_1440x1800),
            (1440, 2560, static_ads::story_1440x2560),
        ];
        for (w, h, f) in statics {
            r.register(Dimensions { width: w, height: h }, Variant::Static, f);
        }

        let animations: [(u32, u32, TemplateFn); 2] = [
            (1080, 1080, animated::square_1080x1080),
            (300, 250, animated::medium_rectangle_300x250),
        ];
        for (w, h, f) in animations {
            r.register(Dimensions { width: w, height: h }, Variant::Animated, f);
        }
        r
    }

    /// Add or replace a template.
    pub fn register(&mut self, dimensions: Dimensions, variant: Variant, template: TemplateFn) {
        self.templates.insert((dimensions, variant), template);
    }

    /// Look up the template for an exact size and variant.
    pub fn resolve(&self, dimensions: Dimensions, variant: Variant) -> AdcraftResult<TemplateFn> {
        self.templates
            .get(&(dimensions, variant))
            .copied()
            .ok_or(AdcraftError::UnsupportedSize {
                width: dimensions.width,
                height: dimensions.height,
                variant,
            })
    }

    pub fn supports(&self, dimensions: Dimensions, variant: Variant) -> bool {
        self.templates.contains_key(&(dimensions, variant))
    }

    /// Registered keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = (Dimensions, Variant)> + '_ {
        self.templates.keys().copied()
    }

    /// Registered sizes for one variant.
    pub fn sizes(&self, variant: Variant) -> Vec<Dimensions> {
        self.keys()
            .filter(|(_, v)| *v == variant)
            .map(|(d, _)| d)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/registry.rs"]
mod tests;
