use std::fmt;
use std::path::PathBuf;

/// Whether an artifact is a still or an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Static,
    Animated,
}

impl ArtifactKind {
    /// Storage folder under the owner's prefix.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Static => "creatives",
            Self::Animated => "animations",
        }
    }
}

/// Encoded file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Png,
    Gif,
}

impl ArtifactFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rendered creative file, staged locally and optionally uploaded.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub format: ArtifactFormat,
    /// Staged file; removed once the upload is confirmed.
    pub local_path: PathBuf,
    /// Public URL after a successful upload.
    pub remote_url: Option<String>,
    /// `WxH` of the creative.
    pub size_key: String,
    /// Frames in the animation; `None` for stills.
    pub frame_count: Option<u32>,
}

impl Artifact {
    /// File name used as the last segment of the storage key.
    pub fn file_name(&self) -> Option<&str> {
        self.local_path.file_name().and_then(|n| n.to_str())
    }

    pub fn is_uploaded(&self) -> bool {
        self.remote_url.is_some()
    }
}
