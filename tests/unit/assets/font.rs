use std::time::Duration;

use super::*;

fn loader() -> AssetLoader {
    AssetLoader::new(reqwest::Client::new(), Duration::from_secs(2))
}

#[test]
fn sniffs_sfnt_headers() {
    assert!(is_supported_font(&[0, 1, 0, 0, 9, 9]));
    assert!(is_supported_font(b"OTTO...."));
    assert!(is_supported_font(b"ttcf...."));
    assert!(!is_supported_font(b"wOF2...."));
    assert!(!is_supported_font(b"wOFF...."));
    assert!(!is_supported_font(b""));
}

#[tokio::test]
async fn woff2_download_falls_back_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let woff = dir.path().join("brand.woff2");
    std::fs::write(&woff, b"wOF2 not really a font").unwrap();
    let fallback = dir.path().join("fallback.ttf");
    std::fs::write(&fallback, [0u8, 1, 0, 0, 1, 2, 3]).unwrap();

    let resolver = FontResolver::new(Some(fallback.clone()));
    let mut warnings = Vec::new();
    let font = resolver
        .resolve(&loader(), woff.to_str(), &mut warnings)
        .await
        .unwrap();

    assert_eq!(font.origin, FontOrigin::Fallback(fallback));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].asset, AssetRole::Font);
}

#[tokio::test]
async fn requested_font_wins_when_readable() {
    let dir = tempfile::tempdir().unwrap();
    let ttf = dir.path().join("brand.ttf");
    std::fs::write(&ttf, [0u8, 1, 0, 0, 7]).unwrap();

    let resolver = FontResolver::new(None);
    let mut warnings = Vec::new();
    let font = resolver
        .resolve(&loader(), ttf.to_str(), &mut warnings)
        .await
        .unwrap();
    assert!(matches!(font.origin, FontOrigin::Requested(_)));
    assert!(warnings.is_empty());
}
