use super::*;

fn dims() -> Dimensions {
    Dimensions::new(300, 250).unwrap()
}

#[tokio::test]
async fn outputs_are_unique_and_sorted_by_folder() {
    let tmp = tempfile::tempdir().unwrap();
    let staging = StagingArea::new(tmp.path());
    let a = staging.still_output(dims()).await.unwrap();
    let b = staging.still_output(dims()).await.unwrap();
    assert_ne!(a.path(), b.path());
    assert!(a.path().starts_with(tmp.path().join("static")));
    assert_eq!(a.path().extension().unwrap(), "png");
    assert!(a.path().to_str().unwrap().contains("300x250"));

    let g = staging.animation_output(dims()).await.unwrap();
    assert!(g.path().starts_with(tmp.path().join("animations")));
    assert_eq!(g.path().extension().unwrap(), "gif");
}

#[tokio::test]
async fn dropped_output_is_removed_and_kept_output_stays() {
    let tmp = tempfile::tempdir().unwrap();
    let staging = StagingArea::new(tmp.path());

    let out = staging.still_output(dims()).await.unwrap();
    std::fs::write(out.path(), b"partial").unwrap();
    let path = out.path().to_path_buf();
    drop(out);
    assert!(!path.exists());

    let out = staging.still_output(dims()).await.unwrap();
    std::fs::write(out.path(), b"done").unwrap();
    let kept = out.keep();
    assert!(kept.exists());
}

#[tokio::test]
async fn frame_staging_is_removed_by_cleanup_or_drop() {
    let tmp = tempfile::tempdir().unwrap();
    let staging = StagingArea::new(tmp.path());

    let frames = staging.frame_staging(dims()).await.unwrap();
    std::fs::write(frames.frame_path(0), b"x").unwrap();
    assert!(frames.frame_path(7).ends_with("frame-0007.png"));
    let dir = frames.dir().to_path_buf();
    frames.cleanup().await.unwrap();
    assert!(!dir.exists());

    let frames = staging.frame_staging(dims()).await.unwrap();
    std::fs::write(frames.frame_path(1), b"x").unwrap();
    let dir = frames.dir().to_path_buf();
    drop(frames);
    assert!(!dir.exists());
    assert_eq!(std::fs::read_dir(staging.frames_root()).unwrap().count(), 0);
}
