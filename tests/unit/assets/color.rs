use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(CssColor::parse("#fff").unwrap(), CssColor::WHITE);
    assert_eq!(CssColor::parse("#FF8000").unwrap(), CssColor::rgb(255, 128, 0));
    let c = CssColor::parse("#00000080").unwrap();
    assert_eq!((c.r, c.a), (0, 128));
}

#[test]
fn parses_rgb_functions() {
    assert_eq!(
        CssColor::parse("rgb(12, 34, 56)").unwrap(),
        CssColor::rgb(12, 34, 56)
    );
    let c = CssColor::parse("RGBA(255,255,255,0.5)").unwrap();
    assert_eq!(c.a, 128);
}

#[test]
fn rejects_garbage() {
    assert!(CssColor::parse("red").is_err());
    assert!(CssColor::parse("#12345").is_err());
    assert!(CssColor::parse("rgb(1,2)").is_err());
    assert!(CssColor::parse("#zzzzzz").is_err());
}

#[test]
fn contrast_follows_brightness() {
    assert_eq!(CssColor::rgb(250, 250, 240).contrasting(), CssColor::BLACK);
    assert_eq!(CssColor::rgb(20, 30, 60).contrasting(), CssColor::WHITE);
    assert!(CssColor::rgb(10, 10, 10).similar(CssColor::rgb(20, 20, 20)));
    assert!(!CssColor::BLACK.similar(CssColor::WHITE));
}

#[test]
fn palette_replaces_cta_that_blends_into_background() {
    let bg = CssColor::rgb(240, 240, 240);
    let p = Palette::derive(bg, CssColor::rgb(235, 238, 240));
    assert_eq!(p.text_color, CssColor::BLACK);
    assert_eq!(p.cta_color, CssColor::BLACK);
    // Black label on a black button would vanish.
    assert_eq!(p.cta_text_color, CssColor::WHITE);
}

#[test]
fn palette_keeps_distinct_brand_color() {
    let bg = CssColor::rgb(10, 10, 40);
    let brand = CssColor::rgb(255, 90, 0);
    let p = Palette::derive(bg, brand);
    assert_eq!(p.cta_color, brand);
    assert_eq!(p.cta_text_color, CssColor::WHITE);
}

#[test]
fn serde_uses_css_strings() {
    let c: CssColor = serde_json::from_str("\"rgb(1, 2, 3)\"").unwrap();
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#010203\"");
}
