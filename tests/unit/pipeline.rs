use super::*;
use crate::store::object::LocalObjectStore;

fn batch() -> BatchRequest {
    BatchRequest {
        owner: ArtifactOwner::new("u1", "a1"),
        phrases: vec!["One.".into(), "Two.".into(), "Three.".into()],
        images: vec![
            BatchImage {
                url: "white.png".into(),
                background_color: CssColor::WHITE,
            },
            BatchImage {
                url: "black.png".into(),
                background_color: CssColor::BLACK,
            },
        ],
        logo_url: "logo.png".into(),
        brand_color: CssColor::rgb(250, 250, 250),
        font_family: "Inter".into(),
        font_source_url: None,
        cta_text: default_batch_cta(),
        sizes: vec![
            Dimensions::new(300, 250).unwrap(),
            Dimensions::new(1440, 2560).unwrap(),
        ],
        variant: Variant::Static,
    }
}

fn pipeline(root: &std::path::Path) -> CreativePipeline<LocalObjectStore> {
    let cfg = PipelineConfig {
        staging_dir: root.join("staging"),
        worker_pool_size: 2,
        ..PipelineConfig::default()
    };
    CreativePipeline::new(&cfg, LocalObjectStore::new(root.join("public"), "https://cdn.test")).unwrap()
}

#[test]
fn batch_cycles_phrases_over_size_image_pairs() {
    let reqs = batch().expand().unwrap();
    assert_eq!(reqs.len(), 4);
    let phrases: Vec<_> = reqs.iter().map(|r| r.phrase.as_deref().unwrap()).collect();
    assert_eq!(phrases, ["One.", "Two.", "Three.", "One."]);
    assert_eq!(reqs[0].dimensions, Dimensions::new(300, 250).unwrap());
    assert_eq!(reqs[2].dimensions, Dimensions::new(1440, 2560).unwrap());
    assert_eq!(reqs[1].main_image_url, "black.png");
    assert_eq!(reqs[0].cta_label(), Some("INSTALL NOW"));
}

#[test]
fn batch_colors_are_derived_per_image() {
    let reqs = batch().expand().unwrap();
    // Near-white brand color blends into the white background.
    assert_eq!(reqs[0].bg_color, CssColor::WHITE);
    assert_eq!(reqs[0].text_color, CssColor::BLACK);
    assert_eq!(reqs[0].cta_color, CssColor::BLACK);
    assert_eq!(reqs[0].cta_text_color, CssColor::WHITE);
    // On black the brand color stands out and keeps its place.
    assert_eq!(reqs[1].text_color, CssColor::WHITE);
    assert_eq!(reqs[1].cta_color, CssColor::rgb(250, 250, 250));
    assert_eq!(reqs[1].cta_text_color, CssColor::BLACK);
}

#[test]
fn batch_uses_at_most_five_images_and_needs_phrases() {
    let mut b = batch();
    b.images = (0..8)
        .map(|i| BatchImage {
            url: format!("{i}.png"),
            background_color: CssColor::WHITE,
        })
        .collect();
    assert_eq!(b.expand().unwrap().len(), 2 * MAX_BATCH_IMAGES);

    b.phrases.clear();
    assert!(matches!(b.expand(), Err(AdcraftError::Validation(_))));
}

#[test]
fn request_id_is_stable_and_content_sensitive() {
    let reqs = batch().expand().unwrap();
    assert_eq!(request_id(&reqs[0]), request_id(&reqs[0].clone()));
    assert_ne!(request_id(&reqs[0]), request_id(&reqs[1]));
    assert_eq!(request_id(&reqs[0]).len(), 16);
}

#[tokio::test]
async fn unsupported_size_fails_before_any_page_or_file() {
    let tmp = tempfile::tempdir().unwrap();
    let p = pipeline(tmp.path());
    let mut req = batch().expand().unwrap().remove(0);
    req.dimensions = Dimensions::new(500, 500).unwrap();
    let owner = ArtifactOwner::new("u", "a");

    let err = p.generate_static_creative(&req, &owner).await.unwrap_err();
    assert!(matches!(
        err,
        AdcraftError::UnsupportedSize {
            width: 500,
            height: 500,
            variant: Variant::Static
        }
    ));
    let err = p.generate_animated_creative(&req, &owner).await.unwrap_err();
    assert!(matches!(err, AdcraftError::UnsupportedSize { variant: Variant::Animated, .. }));

    assert_eq!(p.renderer.pool().available(), 2);
    assert!(!tmp.path().join("staging").exists());
    assert!(!tmp.path().join("public").exists());
}

#[tokio::test]
async fn static_only_sizes_reject_animation() {
    let tmp = tempfile::tempdir().unwrap();
    let p = pipeline(tmp.path());
    let mut req = batch().expand().unwrap().remove(0);
    req.dimensions = Dimensions::new(1440, 2560).unwrap();
    let err = p
        .generate_animated_creative(&req, &ArtifactOwner::new("u", "a"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdcraftError::UnsupportedSize { width: 1440, height: 2560, .. }));
}
