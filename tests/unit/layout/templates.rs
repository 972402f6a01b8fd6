use super::*;
use crate::assets::color::CssColor;
use crate::layout::registry::TemplateRegistry;

fn request(w: u32, h: u32, cta: Option<&str>) -> CreativeRequest {
    CreativeRequest {
        phrase: None,
        logo_url: "logo.png".into(),
        main_image_url: "main.png".into(),
        font_family: "Inter".into(),
        font_source_url: None,
        dimensions: Dimensions::new(w, h).unwrap(),
        bg_color: CssColor::WHITE,
        text_color: CssColor::BLACK,
        cta_color: CssColor::rgb(220, 30, 30),
        cta_text_color: CssColor::WHITE,
        cta_text: cta.map(str::to_owned),
    }
}

fn caption(primary: &str, secondary: &str) -> ProcessedCaption {
    ProcessedCaption {
        primary_text: primary.into(),
        secondary_text: secondary.into(),
    }
}

#[test]
fn every_template_produces_a_valid_document() {
    let registry = TemplateRegistry::builtin();
    let cap = caption("Fast delivery, every time.", "Try it now!");
    for (dims, variant) in registry.keys() {
        let req = request(dims.width, dims.height, Some("Install"));
        let template = registry.resolve(dims, variant).unwrap();
        let doc = template(&TemplateInput {
            request: &req,
            caption: &cap,
        });
        assert_eq!(doc.viewport, dims);
        assert_eq!(doc.variant, variant);
        doc.validate(dims)
            .unwrap_or_else(|e| panic!("{dims} {variant}: {e}"));
        assert!(doc.fit_for(TextRole::Primary).is_some());
        assert!(doc.fit_for(TextRole::Secondary).is_some());
    }
}

#[test]
fn still_without_cta_omits_button() {
    let req = request(300, 250, None);
    let cap = caption("Only a headline", "");
    let doc = static_ads::medium_rectangle_300x250(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    assert!(doc.element(Slot::Cta).is_none());
    assert!(doc.element(Slot::Secondary).is_none());
    assert!(doc.fit_for(TextRole::Cta).is_none());
    assert!(doc.element(Slot::Primary).is_some());
    doc.validate(doc.viewport).unwrap();
}

#[test]
fn still_cta_label_is_uppercased_with_fixed_size() {
    let req = request(1080, 1080, Some("Get started"));
    let cap = caption("Headline", "");
    let doc = static_ads::square_1080x1080(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    let cta = doc.element(Slot::Cta).unwrap();
    assert_eq!(cta.text_content(), Some("GET STARTED"));
    let fit = doc.fit_for(TextRole::Cta).unwrap();
    assert_eq!(fit.start_px, fit.min_px);
}

#[test]
fn fit_table_matches_sizes() {
    let cap = caption("A.", "B.");
    let req = request(1440, 2560, None);
    let doc = static_ads::story_1440x2560(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    let p = doc.fit_for(TextRole::Primary).unwrap();
    let s = doc.fit_for(TextRole::Secondary).unwrap();
    assert_eq!((p.start_px, p.min_px), (84.0, 12.0));
    assert_eq!((s.start_px, s.min_px), (64.0, 10.0));
    assert_eq!(p.step_px, 2.0);

    let req = request(300, 250, None);
    let doc = static_ads::medium_rectangle_300x250(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    let s = doc.fit_for(TextRole::Secondary).unwrap();
    assert_eq!((s.start_px, s.min_px), (8.0, 10.0));
}

#[test]
fn animated_templates_attach_fade_up() {
    let cap = caption("Headline.", "More.");
    let req = request(1080, 1080, Some("ignored"));
    let doc = animated::square_1080x1080(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    assert!(doc.element(Slot::Cta).is_none());
    assert_eq!(doc.tracks.len(), 3);
    assert!(doc.tracks.iter().all(|t| t.delay_ms == 0));
    assert!(doc.tracks.iter().all(|t| t.duration_ms == 4000));

    let req = request(300, 250, None);
    let doc = animated::medium_rectangle_300x250(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    let delay = |slot| {
        doc.tracks
            .iter()
            .find(|t| t.target == slot)
            .map(|t| t.delay_ms)
    };
    assert_eq!(delay(Slot::Primary), Some(0));
    assert_eq!(delay(Slot::Secondary), Some(250));
    assert_eq!(delay(Slot::MainImage), Some(500));
}

#[test]
fn empty_caption_draws_no_text() {
    let cap = ProcessedCaption::default();
    let req = request(320, 480, Some("Go"));
    let doc = static_ads::portrait_320x480(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    assert!(doc.element(Slot::Primary).is_none());
    assert!(doc.fits.iter().all(|f| f.role == TextRole::Cta));
}

#[test]
fn text_roles_carry_their_weights() {
    let cap = caption("Fast delivery.", "Try it now!");
    let weights = |doc: &LayoutDocument| {
        [Slot::Primary, Slot::Secondary, Slot::Cta]
            .map(|slot| doc.element(slot).and_then(Element::font_weight))
    };

    let req = request(1440, 1440, Some("Install"));
    let doc = static_ads::square_1440x1440(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    assert_eq!(weights(&doc), [Some(600), Some(400), Some(600)]);

    let req = request(160, 600, Some("Install"));
    let doc = static_ads::skyscraper_160x600(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    assert_eq!(weights(&doc), [Some(600), Some(400), Some(700)]);

    let req = request(300, 250, Some("Install"));
    let doc = static_ads::medium_rectangle_300x250(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    assert_eq!(weights(&doc), [Some(600), Some(500), Some(600)]);

    let req = request(1080, 1080, None);
    let doc = animated::square_1080x1080(&TemplateInput {
        request: &req,
        caption: &cap,
    });
    assert_eq!(weights(&doc), [Some(600), Some(400), None]);
    assert_eq!(doc.element(Slot::MainImage).and_then(Element::font_weight), None);
}
