pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod font;

use std::fmt;

/// Which input asset a warning refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetRole {
    /// App logo.
    Logo,
    /// Main product image.
    MainImage,
    /// Caption typeface.
    Font,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Logo => "logo",
            Self::MainImage => "main image",
            Self::Font => "font",
        })
    }
}

/// Non-fatal asset failure recorded while a page settles.
///
/// The render proceeds without the asset; the warning travels with the rendered frame so callers
/// can decide whether a partial creative is acceptable.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLoadWarning {
    /// Asset slot that failed.
    pub asset: AssetRole,
    /// Reference that was being loaded, if any.
    pub source: Option<String>,
    /// Failure description.
    pub reason: String,
}

impl AssetLoadWarning {
    pub(crate) fn new(asset: AssetRole, source: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            asset,
            source: source.map(str::to_owned),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AssetLoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{} '{}' failed to load: {}", self.asset, src, self.reason),
            None => write!(f, "{} unavailable: {}", self.asset, self.reason),
        }
    }
}
