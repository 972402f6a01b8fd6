use super::*;
use crate::foundation::core::Variant;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AdcraftError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(AdcraftError::render("x").to_string().contains("render error:"));
    assert!(AdcraftError::upload("x").to_string().contains("upload error:"));
    assert!(
        AdcraftError::navigation("x")
            .to_string()
            .contains("navigation error:")
    );
    assert!(
        AdcraftError::frame_capture(7, "x")
            .to_string()
            .contains("frame capture error at frame 7:")
    );
}

#[test]
fn unsupported_size_names_the_key_and_variant() {
    let err = AdcraftError::UnsupportedSize {
        width: 500,
        height: 500,
        variant: Variant::Animated,
    };
    let msg = err.to_string();
    assert!(msg.contains("500x500"), "{msg}");
    assert!(msg.contains("animated"), "{msg}");
}

#[test]
fn only_upload_errors_are_retryable() {
    assert!(AdcraftError::upload("503").is_retryable());
    assert!(!AdcraftError::frame_capture(0, "boom").is_retryable());
    assert!(!AdcraftError::validation("bad").is_retryable());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AdcraftError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn staged_artifact_only_attaches_to_upload_errors() {
    use crate::store::artifact::{ArtifactFormat, ArtifactKind};

    let staged = Artifact {
        kind: ArtifactKind::Static,
        format: ArtifactFormat::Png,
        local_path: "/tmp/300x250-1.png".into(),
        remote_url: None,
        size_key: "300x250".to_owned(),
        frame_count: None,
    };
    let upload = AdcraftError::upload("503").with_staged(&staged);
    assert_eq!(upload.to_string(), "upload error: 503");
    assert_eq!(upload.staged_artifact(), Some(&staged));
    assert_eq!(upload.into_staged_artifact(), Some(staged.clone()));

    let render = AdcraftError::render("x").with_staged(&staged);
    assert!(render.staged_artifact().is_none());
}
