use super::*;

#[test]
fn dimensions_parse_and_format_round_trip_the_key() {
    let d: Dimensions = "300x250".parse().unwrap();
    assert_eq!(d, Dimensions { width: 300, height: 250 });
    assert_eq!(d.key(), "300x250");
    assert_eq!(" 1440X2560 ".parse::<Dimensions>().unwrap().height, 2560);
}

#[test]
fn dimensions_reject_malformed_keys() {
    assert!("300".parse::<Dimensions>().is_err());
    assert!("0x250".parse::<Dimensions>().is_err());
    assert!("axb".parse::<Dimensions>().is_err());
}

#[test]
fn scaled_applies_device_density() {
    let d = Dimensions::new(300, 250).unwrap();
    assert_eq!(d.scaled(2), (600, 500));
    assert_eq!(d.scaled(0), (300, 250));
}

#[test]
fn premul_from_straight_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().a, 0);
}
