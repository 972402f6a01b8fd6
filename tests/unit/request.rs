use super::*;

#[test]
fn deserializes_camel_case_with_defaults() {
    let req: CreativeRequest = serde_json::from_str(
        r##"{
            "logoUrl": "logo.png",
            "mainImageUrl": "https://cdn.example.com/shot.png",
            "dimensions": { "width": 300, "height": 250 },
            "bgColor": "#ffffff",
            "textColor": "#000",
            "ctaColor": "rgb(255, 0, 0)",
            "ctaTextColor": "#fff"
        }"##,
    )
    .unwrap();
    assert_eq!(req.phrase, None);
    assert_eq!(req.font_family, "sans-serif");
    assert_eq!(req.font_source_url, None);
    assert_eq!(req.cta_label(), None);
    assert_eq!(req.dimensions.width, 300);
    assert_eq!(req.cta_color, CssColor::rgb(255, 0, 0));
}

#[test]
fn blank_cta_counts_as_absent() {
    let mut req: CreativeRequest = serde_json::from_value(serde_json::json!({
        "logoUrl": "a.png",
        "mainImageUrl": "b.png",
        "dimensions": { "width": 1080, "height": 1080 },
        "bgColor": "#111",
        "textColor": "#eee",
        "ctaColor": "#f00",
        "ctaTextColor": "#fff",
        "ctaText": "   "
    }))
    .unwrap();
    assert_eq!(req.cta_label(), None);
    req.cta_text = Some(" Install ".into());
    assert_eq!(req.cta_label(), Some("Install"));
}

#[test]
fn palette_replaces_colors() {
    let req: CreativeRequest = serde_json::from_value(serde_json::json!({
        "logoUrl": "a.png",
        "mainImageUrl": "b.png",
        "dimensions": { "width": 1080, "height": 1080 },
        "bgColor": "#111",
        "textColor": "#111",
        "ctaColor": "#111",
        "ctaTextColor": "#111"
    }))
    .unwrap();
    let palette = Palette::derive(CssColor::WHITE, CssColor::rgb(0, 90, 200));
    let req = req.with_palette(palette);
    assert_eq!(req.bg_color, CssColor::WHITE);
    assert_eq!(req.text_color, CssColor::BLACK);
    assert_eq!(req.cta_color, CssColor::rgb(0, 90, 200));
}
