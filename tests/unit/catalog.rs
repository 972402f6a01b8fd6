use super::*;

fn dims(w: u32, h: u32) -> Dimensions {
    Dimensions::new(w, h).unwrap()
}

#[test]
fn builtin_catalog_covers_every_registered_size() {
    let catalog = AdCatalog::builtin();
    assert_eq!(catalog.len(), 7);
    let names: Vec<&str> = catalog.sizes().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["160x600", "300x250", "320x480", "1080x1080", "1440x1440", "1440x1800", "1440x2560"]
    );
}

#[test]
fn variants_follow_the_registry() {
    let catalog = AdCatalog::builtin();
    let square = catalog.get(dims(1080, 1080)).unwrap();
    assert_eq!(square.variants, [Variant::Static, Variant::Animated]);
    let story = catalog.by_name("1440x2560").unwrap();
    assert_eq!(story.variants, [Variant::Static]);
    assert_eq!(story.network, Some("Facebook Story"));

    let animated: Vec<String> = catalog
        .for_variant(Variant::Animated)
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(animated, ["300x250", "1080x1080"]);
}

#[test]
fn live_catalog_is_the_served_subset() {
    let live = AdCatalog::live();
    let names: Vec<&str> = live.sizes().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["300x250", "1440x2560"]);
}

#[test]
fn unknown_or_malformed_names_are_absent() {
    let catalog = AdCatalog::builtin();
    assert!(catalog.by_name("500x500").is_none());
    assert!(catalog.by_name("banner").is_none());
    assert!(AdCatalog::from_registry(&TemplateRegistry::empty()).is_empty());
}
