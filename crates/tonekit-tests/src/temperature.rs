//! Integration tests for the temperature shift.
//!
//! Exercises the path from host image through the adapter, the color
//! transform and back.

use crate::init_tracing;
use proptest::prelude::*;
use tonekit_core::{Image, Orientation, ToneConfig, ToneError};
use tonekit_effects::{adjust_temperature, ToneAdjuster};

// ── Helpers ────────────────────────────────────────────────────

fn single(r: u8, g: u8, b: u8) -> Image {
    Image::new(1, 1, 3, vec![r, g, b])
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn warm_single_pixel() {
    init_tracing();
    let out = adjust_temperature(&single(200, 100, 50), 1.0).unwrap();
    assert!(out.data[0] > 200, "red should rise, got {}", out.data[0]);
    assert_eq!(out.data[1], 100);
    assert!(out.data[2] < 50, "blue should fall, got {}", out.data[2]);
}

#[test]
fn neutral_is_byte_exact_with_padding() {
    init_tracing();
    let img = Image::new(2, 2, 4, (0..24).collect()).with_stride(12);
    assert_eq!(adjust_temperature(&img, 0.0).unwrap(), img);
}

#[test]
fn extreme_temperature_saturates() {
    init_tracing();
    let out = adjust_temperature(&single(250, 128, 5), 50.0).unwrap();
    assert_eq!(out.data, vec![255, 128, 0]);
    let out = adjust_temperature(&single(5, 128, 250), -50.0).unwrap();
    assert_eq!(out.data, vec![0, 128, 255]);
}

#[test]
fn alpha_survives() {
    init_tracing();
    let img = Image::new(3, 1, 4, vec![10, 20, 30, 0, 40, 50, 60, 77, 70, 80, 90, 255]);
    let out = adjust_temperature(&img, -0.8).unwrap();
    let alpha: Vec<u8> = out.data.chunks_exact(4).map(|p| p[3]).collect();
    assert_eq!(alpha, vec![0, 77, 255]);
}

#[test]
fn orientation_tag_carried_through() {
    init_tracing();
    let img = single(1, 2, 3).with_orientation(Orientation::DownMirrored);
    let out = adjust_temperature(&img, 0.2).unwrap();
    assert_eq!(out.orientation, Orientation::DownMirrored);
}

#[test]
fn custom_sensitivity_scales_shift() {
    init_tracing();
    let mut cfg = ToneConfig::default();
    cfg.temperature.sensitivity = 10.0;
    cfg.temperature.scale_b = 1.0;
    let adjuster = ToneAdjuster::with_config(cfg).unwrap();
    let out = adjuster.adjust_temperature(&single(100, 100, 100), 1.0).unwrap();
    assert_eq!(out.data, vec![110, 100, 90]);
}

#[test]
fn non_finite_temperature_rejected() {
    init_tracing();
    for t in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        assert!(matches!(
            adjust_temperature(&single(1, 2, 3), t),
            Err(ToneError::InvalidParameter(_))
        ));
    }
}

// ── Properties ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn red_up_blue_down_as_temperature_rises(
        r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
        lo in -3.0f32..3.0, delta in 0.0f32..3.0,
    ) {
        let img = single(r, g, b);
        let a = adjust_temperature(&img, lo).unwrap();
        let z = adjust_temperature(&img, lo + delta).unwrap();
        prop_assert!(z.data[0] >= a.data[0]);
        prop_assert!(z.data[2] <= a.data[2]);
        prop_assert_eq!(z.data[1], g);
    }
}
