use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::assets::fetch::AssetLoader;
use crate::assets::{AssetLoadWarning, AssetRole};

/// Well-known system font files tried when no font URL and no configured fallback are usable.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Where the face used for captions came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FontOrigin {
    /// Downloaded from the request's font URL.
    Requested(String),
    /// Configured fallback file.
    Fallback(PathBuf),
    /// A system font file.
    System(PathBuf),
}

/// Raw font bytes ready to be registered with the text engine.
#[derive(Clone, Debug)]
pub(crate) struct FontBytes {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) origin: FontOrigin,
}

/// Resolves the caption typeface for a request.
#[derive(Clone, Debug, Default)]
pub(crate) struct FontResolver {
    fallback_path: Option<PathBuf>,
}

impl FontResolver {
    pub(crate) fn new(fallback_path: Option<PathBuf>) -> Self {
        Self { fallback_path }
    }

    /// Resolve font bytes, recording a warning for every step that had to fall back.
    ///
    /// Returns `None` only when no face is available at all; the page then skips text.
    pub(crate) async fn resolve(
        &self,
        loader: &AssetLoader,
        font_source_url: Option<&str>,
        warnings: &mut Vec<AssetLoadWarning>,
    ) -> Option<FontBytes> {
        if let Some(url) = font_source_url {
            match loader.fetch(url).await {
                Ok(bytes) if is_supported_font(&bytes) => {
                    return Some(FontBytes {
                        bytes: Arc::new(bytes),
                        origin: FontOrigin::Requested(url.to_owned()),
                    });
                }
                Ok(_) => warnings.push(AssetLoadWarning::new(
                    AssetRole::Font,
                    Some(url),
                    "unsupported font container (expected TrueType/OpenType); using fallback",
                )),
                Err(e) => warnings.push(AssetLoadWarning::new(
                    AssetRole::Font,
                    Some(url),
                    format!("{e}; using fallback"),
                )),
            }
        }

        if let Some(path) = &self.fallback_path {
            match read_font_file(path).await {
                Some(bytes) => {
                    return Some(FontBytes {
                        bytes,
                        origin: FontOrigin::Fallback(path.clone()),
                    });
                }
                None => warnings.push(AssetLoadWarning::new(
                    AssetRole::Font,
                    path.to_str(),
                    "configured fallback font is missing or unreadable",
                )),
            }
        }

        for candidate in SYSTEM_FONT_CANDIDATES {
            let path = Path::new(candidate);
            if let Some(bytes) = read_font_file(path).await {
                debug!(path = %path.display(), "using system default font");
                return Some(FontBytes {
                    bytes,
                    origin: FontOrigin::System(path.to_path_buf()),
                });
            }
        }

        warnings.push(AssetLoadWarning::new(
            AssetRole::Font,
            None,
            "no usable font face found; captions are not drawn",
        ));
        None
    }
}

async fn read_font_file(path: &Path) -> Option<Arc<Vec<u8>>> {
    let bytes = tokio::fs::read(path).await.ok()?;
    is_supported_font(&bytes).then(|| Arc::new(bytes))
}

/// Sniff the sfnt header: TrueType, OpenType/CFF or a TrueType collection.
pub(crate) fn is_supported_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
