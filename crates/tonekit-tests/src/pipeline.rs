//! Integration tests for the chained pipeline, orientation handling and the
//! adjustment registry.

use crate::init_tracing;
use tonekit_core::{
    decode, force_portrait, normalize_orientation, Image, Orientation, ToneConfig, ToneError,
    ToneSettings,
};
use tonekit_effects::{AdjustmentRegistry, ParamValue, ParamValues, ToneAdjuster};

fn photo(w: u32, h: u32) -> Image {
    let data = (0..w * h)
        .flat_map(|i| [(i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8])
        .collect();
    Image::new(w, h, 3, data)
}

#[test]
fn apply_identity_settings_returns_input() {
    init_tracing();
    let img = photo(5, 3);
    let out = ToneAdjuster::new()
        .apply(&img, &ToneSettings::default())
        .unwrap();
    assert_eq!(out, img);
}

#[test]
fn apply_equals_registry_chain() {
    init_tracing();
    let img = photo(6, 4);
    let settings = ToneSettings {
        temperature: -0.4,
        contrast: 1.25,
        objects_only: false,
        brightness: 0.1,
        saturation: 1.5,
        blur: 1.2,
    };
    let out = ToneAdjuster::new().apply(&img, &settings).unwrap();

    let registry = AdjustmentRegistry::new();
    let cfg = ToneConfig::default();
    let steps: [(&str, &str, f32); 5] = [
        ("Temperature", "temperature", settings.temperature),
        ("Contrast", "contrast", settings.contrast),
        ("Brightness", "brightness", settings.brightness),
        ("Saturation", "saturation", settings.saturation),
        ("Blur", "radius", settings.blur),
    ];
    let mut buf = decode(&img).unwrap();
    for (name, param, value) in steps {
        let mut values = ParamValues::new();
        values.insert(param.into(), ParamValue::Float(value));
        buf = registry.find(name).unwrap().apply(&buf, &values, &cfg).unwrap();
    }
    assert_eq!(out.data, buf.into_raw());
}

#[test]
fn invalid_image_reported_as_decode_error() {
    init_tracing();
    let adjuster = ToneAdjuster::new();
    let two_channel = Image::new(2, 2, 2, vec![0; 8]);
    assert!(matches!(
        adjuster.adjust_contrast(&two_channel, 1.2, false),
        Err(ToneError::Decode(_))
    ));
    let truncated = Image::new(4, 4, 3, vec![0; 40]);
    assert!(matches!(
        adjuster.adjust_temperature(&truncated, 0.5),
        Err(ToneError::Decode(_))
    ));
}

#[test]
fn normalize_then_adjust_matches_adjust_then_normalize() {
    init_tracing();
    // Per-pixel transforms commute with reorientation.
    let img = photo(5, 3).with_orientation(Orientation::Right);
    let adjuster = ToneAdjuster::new();

    let a = adjuster
        .adjust_temperature(&normalize_orientation(&img).unwrap(), 0.7)
        .unwrap();
    let b = normalize_orientation(&adjuster.adjust_temperature(&img, 0.7).unwrap()).unwrap();
    assert_eq!(a, b);
    assert_eq!((a.width, a.height), (3, 5));
}

#[test]
fn force_portrait_before_adjusting() {
    init_tracing();
    let img = photo(8, 2);
    let portrait = force_portrait(&img).unwrap();
    assert_eq!((portrait.width, portrait.height), (2, 8));
    let out = ToneAdjuster::new()
        .adjust_contrast(&portrait, 0.8, true)
        .unwrap();
    assert_eq!((out.width, out.height), (2, 8));
    assert_eq!(out.orientation, Orientation::Up);
}

#[test]
fn config_loaded_from_json_drives_adjuster() {
    init_tracing();
    let cfg = ToneConfig::from_json(r#"{ "temperature": { "sensitivity": 20.0 } }"#).unwrap();
    let adjuster = ToneAdjuster::with_config(cfg).unwrap();
    let img = Image::new(1, 1, 3, vec![100, 100, 100]);
    let out = adjuster.adjust_temperature(&img, 1.0).unwrap();
    // 20 * 0.9 = 18 off blue
    assert_eq!(out.data, vec![120, 100, 82]);
}

#[test]
fn zero_sensitivity_config_rejected() {
    init_tracing();
    assert!(matches!(
        ToneConfig::from_json(r#"{ "temperature": { "sensitivity": 0.0 } }"#),
        Err(ToneError::Config(_))
    ));

    let mut cfg = ToneConfig::default();
    cfg.temperature.scale_r = 0.0;
    assert!(matches!(
        ToneAdjuster::with_config(cfg),
        Err(ToneError::Config(_))
    ));
}
