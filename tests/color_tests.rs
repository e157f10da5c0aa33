//! Color Tests
//!
//! Tests for:
//! - Hex parsing and formatting
//! - HSV conversion
//! - Gradients and blending

use kinema::core::constants::{BLUE, RED, WHITE};
use kinema::core::math::color::{Color, color_gradient};
use kinema::core::KinemaError;

const BYTE: f64 = 1.0 / 255.0;

fn approx_color(a: Color, b: Color, eps: f64) -> bool {
    (a.r - b.r).abs() <= eps && (a.g - b.g).abs() <= eps && (a.b - b.b).abs() <= eps && (a.a - b.a).abs() <= eps
}

// ============================================================================
// Hex
// ============================================================================

#[test]
fn hex_round_trip_within_a_byte() {
    for color in [RED, BLUE, WHITE, Color::new(0.1, 0.2, 0.3, 0.4)] {
        let parsed = Color::from_hex(&color.to_hex()).unwrap();
        assert!(approx_color(parsed, color, BYTE), "{color:?} -> {}", color.to_hex());
    }
}

#[test]
fn short_hex_forms_expand() {
    let short = Color::from_hex("#f80").unwrap();
    let long = Color::from_hex("ff8800").unwrap();
    assert!(approx_color(short, long, 1e-12));
    assert_eq!(long.a, 1.0);

    let with_alpha = Color::from_hex("#f808").unwrap();
    assert!((with_alpha.a - f64::from(0x88_u8) / 255.0).abs() < 1e-12);
}

#[test]
fn malformed_hex_is_rejected() {
    for bad in ["#12", "#12345", "#gggggg", ""] {
        assert!(matches!(Color::from_hex(bad), Err(KinemaError::InvalidHexColor(_))), "{bad}");
    }
}

// ============================================================================
// HSV and blending
// ============================================================================

#[test]
fn hsv_round_trip() {
    let color = Color::from_hsv(0.6, 0.5, 0.8, 1.0);
    let [h, s, v] = color.to_hsv();
    // to_hsv works on byte-quantized channels.
    assert!((h - 0.6).abs() < 0.01);
    assert!((s - 0.5).abs() < 0.01);
    assert!((v - 0.8).abs() < 0.01);
}

#[test]
fn lerp_blends_every_channel() {
    let a = Color::new(0.0, 0.0, 0.0, 0.0);
    let b = Color::new(1.0, 0.5, 0.25, 1.0);
    assert!(approx_color(a.lerp(b, 0.5), Color::new(0.5, 0.25, 0.125, 0.5), 1e-12));
}

#[test]
fn gradient_keeps_its_ends() {
    let gradient = color_gradient(&[RED, BLUE], 5);
    assert_eq!(gradient.len(), 5);
    assert!(approx_color(gradient[0], RED, 1e-9));
    assert!(approx_color(gradient[4], BLUE, 1e-9));
}
