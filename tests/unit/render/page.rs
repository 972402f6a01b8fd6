use std::path::Path;
use std::time::Duration;

use super::*;
use crate::assets::color::CssColor;
use crate::foundation::core::{Rect, Variant};
use crate::layout::document::{Element, FontDecl};
use crate::render::pool::WorkerPool;

fn write_png(path: &Path, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(8, 8, image::Rgba(rgba))
        .save(path)
        .unwrap();
}

fn image_doc(main: &str, logo: &str) -> LayoutDocument {
    let mut doc = LayoutDocument::new(
        Dimensions::new(40, 20).unwrap(),
        Variant::Static,
        CssColor::WHITE,
        FontDecl {
            family: "Inter".into(),
            source_url: None,
        },
    );
    doc.elements.push(Element::image(
        Slot::MainImage,
        Rect::new(0.0, 0.0, 20.0, 20.0),
        main,
    ));
    doc.elements.push(Element::image(
        Slot::Logo,
        Rect::new(30.0, 0.0, 40.0, 10.0),
        logo,
    ));
    doc
}

fn loader() -> AssetLoader {
    AssetLoader::new(reqwest::Client::new(), Duration::from_secs(2))
}

#[test]
fn transitions_follow_lifecycle() {
    use PageState::*;
    assert!(Initializing.can_advance_to(ContentLoaded));
    assert!(ContentLoaded.can_advance_to(AssetsSettling));
    assert!(AssetsSettling.can_advance_to(Stable));
    assert!(Stable.can_advance_to(Captured));
    assert!(Captured.can_advance_to(Captured));

    assert!(!Initializing.can_advance_to(Stable));
    assert!(!ContentLoaded.can_advance_to(Captured));
    assert!(!Captured.can_advance_to(Initializing));
}

#[tokio::test]
async fn page_settles_and_captures_local_images() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.png");
    let logo = dir.path().join("logo.png");
    write_png(&main, [255, 0, 0, 255]);
    write_png(&logo, [0, 255, 0, 255]);

    let pool = WorkerPool::new(1);
    let doc = image_doc(main.to_str().unwrap(), logo.to_str().unwrap());
    let mut page = RenderPage::open(pool.acquire().await.unwrap(), doc.viewport, 2);
    assert_eq!(page.state(), PageState::Initializing);
    assert_eq!(pool.available(), 0);

    page.load_content(doc).await.unwrap();
    assert_eq!(page.state(), PageState::ContentLoaded);

    let warnings = page
        .settle(&loader(), &FontResolver::new(None))
        .await
        .unwrap();
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(page.state(), PageState::Stable);
    assert!(page.has_image(Slot::MainImage));
    assert!(page.has_image(Slot::Logo));

    let frame = page.capture_at(0.0).await.unwrap();
    assert_eq!((frame.width, frame.height), (80, 40));
    assert_eq!(page.state(), PageState::Captured);
    page.capture_at(100.0).await.unwrap();
    assert_eq!(page.captures(), 2);

    drop(page);
    assert_eq!(pool.available(), 1);
}

#[tokio::test]
async fn missing_image_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("logo.png");
    write_png(&logo, [0, 0, 0, 255]);
    let missing = dir.path().join("nope.png");

    let pool = WorkerPool::new(1);
    let doc = image_doc(missing.to_str().unwrap(), logo.to_str().unwrap());
    let mut page = RenderPage::open(pool.acquire().await.unwrap(), doc.viewport, 1);
    page.load_content(doc).await.unwrap();
    let warnings = page
        .settle(&loader(), &FontResolver::new(None))
        .await
        .unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].asset, AssetRole::MainImage);
    assert!(!page.has_image(Slot::MainImage));
    assert!(page.has_image(Slot::Logo));
    page.capture_at(0.0).await.unwrap();
}

#[tokio::test]
async fn undecodable_image_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.png");
    std::fs::write(&junk, b"not an image").unwrap();
    let logo = dir.path().join("logo.png");
    write_png(&logo, [0, 0, 0, 255]);

    let pool = WorkerPool::new(1);
    let doc = image_doc(junk.to_str().unwrap(), logo.to_str().unwrap());
    let mut page = RenderPage::open(pool.acquire().await.unwrap(), doc.viewport, 1);
    page.load_content(doc).await.unwrap();
    let warnings = page
        .settle(&loader(), &FontResolver::new(None))
        .await
        .unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].asset, AssetRole::MainImage);
}

#[tokio::test]
async fn capture_before_stable_is_rejected() {
    let pool = WorkerPool::new(1);
    let doc = image_doc("a.png", "b.png");
    let mut page = RenderPage::open(pool.acquire().await.unwrap(), doc.viewport, 1);
    assert!(page.capture_at(0.0).await.is_err());
    page.load_content(doc).await.unwrap();
    assert!(page.capture_at(0.0).await.is_err());
}

#[tokio::test]
async fn viewport_mismatch_fails_content_load() {
    let pool = WorkerPool::new(1);
    let doc = image_doc("a.png", "b.png");
    let mut page = RenderPage::open(
        pool.acquire().await.unwrap(),
        Dimensions::new(300, 250).unwrap(),
        1,
    );
    assert!(page.load_content(doc).await.is_err());
    assert_eq!(page.state(), PageState::Initializing);
}
