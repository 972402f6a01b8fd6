use super::*;

fn doc() -> LayoutDocument {
    let viewport = Dimensions::new(300, 250).unwrap();
    let mut doc = LayoutDocument::new(
        viewport,
        Variant::Animated,
        CssColor::WHITE,
        FontDecl {
            family: "Inter".into(),
            source_url: None,
        },
    );
    doc.elements.push(Element::image(
        Slot::MainImage,
        Rect::new(30.0, 100.0, 270.0, 240.0),
        "img.png",
    ));
    doc.elements.push(
        Element::text(
            Slot::Secondary,
            Rect::new(15.0, 60.0, 285.0, 90.0),
            "Try it now!",
            CssColor::BLACK,
        )
        .with_opacity(0.9),
    );
    doc
}

#[test]
fn valid_document_passes() {
    let d = doc();
    d.validate(d.viewport).unwrap();
}

#[test]
fn viewport_mismatch_is_rejected() {
    let d = doc();
    let err = d.validate(Dimensions::new(1080, 1080).unwrap()).unwrap_err();
    assert!(err.to_string().contains("does not match"));
}

#[test]
fn degenerate_and_duplicate_elements_are_rejected() {
    let mut d = doc();
    d.elements[0].frame = Rect::new(10.0, 10.0, 10.0, 40.0);
    assert!(d.validate(d.viewport).is_err());

    let mut d = doc();
    let dup = d.elements[0].clone();
    d.elements.push(dup);
    assert!(d.validate(d.viewport).is_err());
}

#[test]
fn track_on_missing_slot_is_rejected() {
    let mut d = doc();
    d.tracks.push(AnimationTrack::fade_up(Slot::Cta, 10.0, 0));
    assert!(d.validate(d.viewport).is_err());
}

#[test]
fn sample_applies_tracks_and_rests_otherwise() {
    let mut d = doc();
    d.tracks
        .push(AnimationTrack::fade_up(Slot::MainImage, 16.0, 0));

    let poses = d.sample(0.0);
    assert_eq!(poses.len(), 2);
    assert_eq!(poses[0].opacity, 0.0);
    assert_eq!(poses[0].offset.y, 16.0);
    // No track: resting opacity.
    assert_eq!(poses[1].opacity, 0.9);
    assert_eq!(poses[1].offset, Vec2::ZERO);

    let late = d.sample(5000.0);
    assert_eq!(late[0].opacity, 1.0);
    assert_eq!(late[0].offset.y, 0.0);
}

#[test]
fn slots_map_to_text_roles() {
    assert_eq!(Slot::Primary.text_role(), Some(TextRole::Primary));
    assert_eq!(Slot::Cta.text_role(), Some(TextRole::Cta));
    assert_eq!(Slot::Logo.text_role(), None);
}

#[test]
fn weight_defaults_by_role_and_can_be_overridden() {
    let frame = Rect::new(0.0, 0.0, 100.0, 20.0);
    let primary = Element::text(Slot::Primary, frame, "Hi", CssColor::BLACK);
    assert_eq!(primary.font_weight(), Some(600));
    let secondary = Element::text(Slot::Secondary, frame, "There", CssColor::BLACK);
    assert_eq!(secondary.font_weight(), Some(400));
    assert_eq!(secondary.with_weight(500).font_weight(), Some(500));

    let image = Element::image(Slot::Logo, frame, "logo.png").with_weight(700);
    assert_eq!(image.font_weight(), None);
}
