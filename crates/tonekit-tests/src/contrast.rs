//! Integration tests for full-frame and object-only contrast.

use crate::init_tracing;
use proptest::prelude::*;
use tonekit_color::apply_contrast;
use tonekit_core::{decode, ChannelLayout, Image, PixelBuffer, ToneConfig, ToneError};
use tonekit_effects::{
    adjust_contrast, apply_contrast_with_mask, estimate_foreground, ObjectMask, ToneAdjuster,
};

// ── Helpers ────────────────────────────────────────────────────

/// Muted background with a saturated square in the middle, RGBA.
fn subject_on_backdrop(size: u32, inner: u32) -> Image {
    let start = (size - inner) / 2;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let inside = (start..start + inner).contains(&x) && (start..start + inner).contains(&y);
            if inside {
                data.extend_from_slice(&[220, 60, 40, 255]);
            } else {
                data.extend_from_slice(&[90, 100, 110, 200]);
            }
        }
    }
    Image::new(size, size, 4, data)
}

fn pixel(img: &Image, x: u32, y: u32) -> &[u8] {
    let i = y as usize * img.stride + x as usize * img.channels;
    &img.data[i..i + img.channels]
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn mid_gray_is_a_fixed_point() {
    init_tracing();
    let img = Image::new(2, 2, 3, vec![128; 12]);
    let out = adjust_contrast(&img, 2.0, false).unwrap();
    assert_eq!(out.data, vec![128; 12]);
}

#[test]
fn negative_contrast_rejected() {
    init_tracing();
    let img = Image::new(1, 1, 3, vec![1, 2, 3]);
    for objects_only in [false, true] {
        assert!(matches!(
            adjust_contrast(&img, -0.5, objects_only),
            Err(ToneError::InvalidParameter(_))
        ));
    }
}

#[test]
fn unit_contrast_is_identity_in_both_modes() {
    init_tracing();
    let img = subject_on_backdrop(16, 6);
    assert_eq!(adjust_contrast(&img, 1.0, false).unwrap(), img);
    assert_eq!(adjust_contrast(&img, 1.0, true).unwrap(), img);
}

#[test]
fn objects_only_leaves_backdrop_nearly_untouched() {
    init_tracing();
    let img = subject_on_backdrop(32, 10);
    let full = adjust_contrast(&img, 1.5, false).unwrap();
    let objects = adjust_contrast(&img, 1.5, true).unwrap();

    // Far corner is backdrop: the full-frame result moves it, the masked one
    // stays within a step or two of the original.
    let orig = pixel(&img, 0, 0);
    let masked = pixel(&objects, 0, 0);
    assert_ne!(pixel(&full, 0, 0), orig);
    for c in 0..3 {
        assert!((masked[c] as i16 - orig[c] as i16).abs() <= 2, "{masked:?} vs {orig:?}");
    }

    // Center is the subject and takes most of the adjustment.
    let center_full = pixel(&full, 16, 16)[0] as i16;
    let center_orig = pixel(&img, 16, 16)[0] as i16;
    let center_masked = pixel(&objects, 16, 16)[0] as i16;
    assert!(center_full > center_orig);
    assert!(center_masked - center_orig >= (center_full - center_orig) / 2);
}

#[test]
fn objects_only_keeps_alpha() {
    init_tracing();
    let img = subject_on_backdrop(20, 8);
    let out = adjust_contrast(&img, 0.6, true).unwrap();
    let alpha_in: Vec<u8> = img.data.chunks_exact(4).map(|p| p[3]).collect();
    let alpha_out: Vec<u8> = out.data.chunks_exact(4).map(|p| p[3]).collect();
    assert_eq!(alpha_in, alpha_out);
}

#[test]
fn uniform_image_has_no_objects() {
    init_tracing();
    let img = Image::new(8, 8, 3, [17u8, 200, 64].repeat(64));
    let mask = ToneAdjuster::new().estimate_foreground(&img).unwrap();
    assert!(mask.weights().iter().all(|&w| w == 0.0));
    assert_eq!(adjust_contrast(&img, 1.8, true).unwrap(), img);
}

#[test]
fn blend_respects_mask_extremes() {
    init_tracing();
    let buf = decode(&subject_on_backdrop(4, 2)).unwrap();
    let cfg = ToneConfig::default();
    let adjusted = apply_contrast(&buf, 1.7, &cfg).unwrap();
    let weights: Vec<f32> = (0..16).map(|i| if i % 3 == 0 { 1.0 } else { 0.0 }).collect();
    let mask = ObjectMask::from_weights(4, 4, weights).unwrap();
    let out = apply_contrast_with_mask(&buf, 1.7, &mask, &cfg).unwrap();

    for y in 0..4 {
        for x in 0..4 {
            let expected = if mask.get(x, y) == 1.0 {
                adjusted.pixel(x, y)
            } else {
                buf.pixel(x, y)
            };
            assert_eq!(out.pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

// ── Properties ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn mask_weights_bounded(data in proptest::collection::vec(any::<u8>(), 4 * 9 * 7)) {
        let buf = PixelBuffer::from_raw(9, 7, ChannelLayout::Rgba8, data).unwrap();
        let mask = estimate_foreground(&buf, &ToneConfig::default().mask);
        prop_assert!(mask.weights().iter().all(|w| (0.0..=1.0).contains(w)));
    }

    #[test]
    fn contrast_preserves_shape(
        data in proptest::collection::vec(any::<u8>(), 3 * 4 * 4),
        contrast in 0.0f32..10.0,
        objects_only in any::<bool>(),
    ) {
        let img = Image::new(4, 4, 3, data);
        let out = adjust_contrast(&img, contrast, objects_only).unwrap();
        prop_assert_eq!((out.width, out.height, out.channels), (4, 4, 3));
        prop_assert_eq!(out.data.len(), 48);
    }
}
