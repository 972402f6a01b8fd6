use super::*;

#[tokio::test]
async fn local_store_writes_under_key_and_returns_public_url() {
    let tmp = tempfile::tempdir().unwrap();
    let store = LocalObjectStore::new(tmp.path(), "https://cdn.test/");
    let url = store
        .put_public("users/u1/app/a1/creatives/x.png", b"png".to_vec(), "image/png")
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.test/users/u1/app/a1/creatives/x.png");
    let on_disk = std::fs::read(tmp.path().join("users/u1/app/a1/creatives/x.png")).unwrap();
    assert_eq!(on_disk, b"png");
}

#[tokio::test]
async fn keys_escaping_the_root_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let store = LocalObjectStore::new(tmp.path(), "https://cdn.test");
    for key in ["", "/abs.png", "users/../../x.png", "users//x.png"] {
        let err = store.put_public(key, vec![1], "image/png").await.unwrap_err();
        assert!(matches!(err, AdcraftError::Validation(_)), "{key}: {err}");
    }
}

#[test]
fn http_object_url_joins_endpoint_bucket_and_key() {
    let store = HttpObjectStore::new(
        reqwest::Client::new(),
        "http://storage.local/",
        "ads",
        "https://cdn.test",
        None,
    );
    assert_eq!(
        store.object_url("users/u/app/a/animations/y.gif"),
        "http://storage.local/ads/users/u/app/a/animations/y.gif"
    );
}

#[tokio::test]
async fn unreachable_http_store_is_an_upload_error() {
    let store = AnyObjectStore::Http(HttpObjectStore::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1",
        "ads",
        "https://cdn.test",
        Some("token".to_owned()),
    ));
    let err = store.put_public("k.png", vec![0], "image/png").await.unwrap_err();
    assert!(matches!(err, AdcraftError::Upload { artifact: None, .. }));
    assert!(err.is_retryable());
}
