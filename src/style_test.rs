#![allow(clippy::float_cmp)]

use super::*;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Hex parsing
// =============================================================

#[test]
fn parses_six_digit_hex() {
    assert_eq!(Color::from_hex("#0ea5e9").unwrap(), Color::rgb(14, 165, 233));
}

#[test]
fn parses_without_hash() {
    assert_eq!(Color::from_hex("ff0000").unwrap(), Color::rgb(255, 0, 0));
}

#[test]
fn parses_three_digit_hex() {
    assert_eq!(Color::from_hex("#f80").unwrap(), Color::rgb(255, 136, 0));
}

#[test]
fn parses_short_alpha() {
    let c = Color::from_hex("#0008").unwrap();
    assert_eq!((c.r, c.g, c.b), (0, 0, 0));
    assert!(approx_eq(c.a, 136.0 / 255.0));
}

#[test]
fn parses_long_alpha() {
    let c = Color::from_hex("#11223380").unwrap();
    assert_eq!((c.r, c.g, c.b), (0x11, 0x22, 0x33));
    assert!(approx_eq(c.a, 128.0 / 255.0));
}

#[test]
fn rejects_bad_length() {
    assert_eq!(Color::from_hex("#12345"), Err(ColorError::InvalidLength("#12345".into())));
    assert!(Color::from_hex("").is_err());
}

#[test]
fn rejects_bad_digit() {
    assert_eq!(Color::from_hex("#gg0000"), Err(ColorError::InvalidDigit("#gg0000".into())));
}

#[test]
fn from_str_uses_hex_contract() {
    let c: Color = "#000".parse().unwrap();
    assert_eq!(c, Color::BLACK);
    assert!("nope".parse::<Color>().is_err());
}

// =============================================================
// Formatting
// =============================================================

#[test]
fn css_string() {
    assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
    assert_eq!(Color::WHITE.to_string(), "rgba(255, 255, 255, 1)");
}

#[test]
fn hex_string_drops_alpha() {
    assert_eq!(Color::rgba(14, 165, 233, 0.2).to_hex(), "#0ea5e9");
}

// =============================================================
// HSVA
// =============================================================

#[test]
fn hsva_of_pure_red() {
    let hsva = Color::rgb(255, 0, 0).to_hsva();
    assert_eq!(hsva.h, 0.0);
    assert_eq!(hsva.s, 100.0);
    assert_eq!(hsva.v, 100.0);
}

#[test]
fn hsva_of_gray_has_no_saturation() {
    let hsva = Color::rgb(128, 128, 128).to_hsva();
    assert_eq!(hsva.h, 0.0);
    assert_eq!(hsva.s, 0.0);
}

#[test]
fn hsva_round_trips_primary_and_secondary_colors() {
    for c in [
        Color::rgb(255, 0, 0),
        Color::rgb(0, 255, 0),
        Color::rgb(0, 0, 255),
        Color::rgb(255, 255, 0),
        Color::rgb(0, 255, 255),
        Color::rgb(255, 0, 255),
    ] {
        assert_eq!(Color::from_hsva(c.to_hsva()), c);
    }
}

#[test]
fn hsva_keeps_alpha() {
    let c = Color::rgba(10, 20, 30, 0.25);
    assert_eq!(c.to_hsva().a, 0.25);
}

// =============================================================
// Fill / Stroke / TextAlign
// =============================================================

#[test]
fn fill_serializes_with_type_tag() {
    let json = serde_json::to_value(Fill::solid(Color::BLACK)).unwrap();
    assert_eq!(json["type"], "solid");
    assert_eq!(json["color"]["r"], 0);
}

#[test]
fn fill_color_accessor() {
    assert_eq!(Fill::solid(Color::WHITE).color(), Color::WHITE);
}

#[test]
fn text_align_keywords() {
    assert_eq!(TextAlign::default(), TextAlign::Left);
    assert_eq!(TextAlign::Center.as_str(), "center");
    assert_eq!(serde_json::to_string(&TextAlign::Right).unwrap(), "\"right\"");
}
