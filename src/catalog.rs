use std::collections::BTreeMap;

use crate::foundation::core::{Dimensions, Variant};
use crate::layout::registry::TemplateRegistry;

/// Placements the known sizes are bought for.
const NETWORKS: &[(u32, u32, &str)] = &[
    (300, 250, "Google Display"),
    (160, 600, "Google Display"),
    (320, 480, "Google Display"),
    (1080, 1080, "Facebook Square Feed"),
    (1440, 1440, "Facebook Square Feed"),
    (1440, 1800, "Facebook Portrait Feed"),
    (1440, 2560, "Facebook Story"),
];

/// Sizes currently served to live placements.
const LIVE: &[(u32, u32)] = &[(300, 250), (1440, 2560)];

/// One ad size and the template variants available for it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AdSize {
    pub dimensions: Dimensions,
    /// `WxH` name.
    pub name: String,
    pub network: Option<&'static str>,
    pub variants: Vec<Variant>,
}

impl AdSize {
    pub fn supports(&self, variant: Variant) -> bool {
        self.variants.contains(&variant)
    }
}

/// Named ad sizes, ordered by dimensions.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct AdCatalog {
    sizes: Vec<AdSize>,
}

impl AdCatalog {
    /// Every size with at least one template in `registry`.
    pub fn from_registry(registry: &TemplateRegistry) -> Self {
        let mut by_size: BTreeMap<Dimensions, Vec<Variant>> = BTreeMap::new();
        for (dims, variant) in registry.keys() {
            by_size.entry(dims).or_default().push(variant);
        }
        let sizes = by_size
            .into_iter()
            .map(|(dimensions, variants)| AdSize {
                dimensions,
                name: dimensions.key(),
                network: network_for(dimensions),
                variants,
            })
            .collect();
        Self { sizes }
    }

    /// Catalog over the built-in templates.
    pub fn builtin() -> Self {
        Self::from_registry(&TemplateRegistry::builtin())
    }

    /// The live subset of the built-in catalog.
    pub fn live() -> Self {
        Self::builtin().retain_sizes(LIVE.iter().map(|&(w, h)| Dimensions { width: w, height: h }))
    }

    /// Keep only the given sizes, preserving catalog order.
    pub fn retain_sizes(mut self, keep: impl IntoIterator<Item = Dimensions>) -> Self {
        let keep: Vec<Dimensions> = keep.into_iter().collect();
        self.sizes.retain(|s| keep.contains(&s.dimensions));
        self
    }

    pub fn sizes(&self) -> &[AdSize] {
        &self.sizes
    }

    pub fn get(&self, dimensions: Dimensions) -> Option<&AdSize> {
        self.sizes.iter().find(|s| s.dimensions == dimensions)
    }

    /// Look up a size by its `WxH` name.
    pub fn by_name(&self, name: &str) -> Option<&AdSize> {
        let dims: Dimensions = name.parse().ok()?;
        self.get(dims)
    }

    /// Sizes that support `variant`.
    pub fn for_variant(&self, variant: Variant) -> impl Iterator<Item = &AdSize> + '_ {
        self.sizes.iter().filter(move |s| s.supports(variant))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

fn network_for(dims: Dimensions) -> Option<&'static str> {
    NETWORKS
        .iter()
        .find(|&&(w, h, _)| w == dims.width && h == dims.height)
        .map(|&(_, _, n)| n)
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
