use crate::assets::color::{CssColor, Palette};
use crate::foundation::core::Dimensions;

fn default_font_family() -> String {
    "sans-serif".to_owned()
}

/// Everything needed to render one creative.
///
/// Deserializes from camelCase JSON so request files can be fed to the CLI directly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeRequest {
    /// Approved ad copy. `None` renders with empty captions.
    #[serde(default)]
    pub phrase: Option<String>,
    /// Logo reference (`http(s)://`, `file://` or a local path).
    pub logo_url: String,
    /// Main product image reference.
    pub main_image_url: String,
    /// Display name of the caption face.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Font file to use; `None` selects the fallback face.
    #[serde(default)]
    pub font_source_url: Option<String>,
    pub dimensions: Dimensions,
    pub bg_color: CssColor,
    pub text_color: CssColor,
    pub cta_color: CssColor,
    pub cta_text_color: CssColor,
    /// Call-to-action label. Static templates omit the button when absent.
    #[serde(default)]
    pub cta_text: Option<String>,
}

impl CreativeRequest {
    /// Replace the four colors with a derived palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.bg_color = palette.bg_color;
        self.text_color = palette.text_color;
        self.cta_color = palette.cta_color;
        self.cta_text_color = palette.cta_text_color;
        self
    }

    /// Borrow the CTA label if it is present and not blank.
    pub fn cta_label(&self) -> Option<&str> {
        self.cta_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
#[path = "../tests/unit/request.rs"]
mod tests;
