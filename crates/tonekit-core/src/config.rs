//! Tuning constants and per-call adjustment settings.
//!
//! Everything here has compiled-in defaults; hosts may override them from
//! JSON. Missing fields fall back to their defaults.

use crate::error::{Result, ToneError};
use serde::{Deserialize, Serialize};

/// Sensitivity of the warm/cool shift. All three values must be positive.
///
/// At temperature `t`, red moves by `sensitivity * t * scale_r` and blue by
/// `-sensitivity * t * scale_b` (8-bit units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureTuning {
    pub sensitivity: f32,
    pub scale_r: f32,
    pub scale_b: f32,
}

impl Default for TemperatureTuning {
    fn default() -> Self {
        Self {
            sensitivity: 60.0,
            scale_r: 1.0,
            scale_b: 0.9,
        }
    }
}

/// Parameters for foreground mask estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskParams {
    /// Weight of the distance from the dominant background color
    pub color_weight: f32,
    /// Weight of the luminance gradient magnitude
    pub gradient_weight: f32,
    /// Gaussian smoothing radius in pixels (0 disables)
    pub blur_radius: f32,
    /// Bits per channel used for the background color histogram (1-6)
    pub histogram_bits: u8,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            color_weight: 0.6,
            gradient_weight: 0.4,
            blur_radius: 2.0,
            histogram_bits: 4,
        }
    }
}

/// Engine-wide tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub temperature: TemperatureTuning,
    pub mask: MaskParams,
    /// Images with fewer pixels than this are processed on the calling thread.
    pub parallel_min_pixels: usize,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            temperature: TemperatureTuning::default(),
            mask: MaskParams::default(),
            parallel_min_pixels: 64 * 1024,
        }
    }
}

impl ToneConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the transforms cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.temperature;
        for (name, v) in [
            ("temperature.sensitivity", t.sensitivity),
            ("temperature.scale_r", t.scale_r),
            ("temperature.scale_b", t.scale_b),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ToneError::Config(format!(
                    "{name} must be a finite positive number, got {v}"
                )));
            }
        }

        let m = &self.mask;
        for (name, v) in [
            ("mask.color_weight", m.color_weight),
            ("mask.gradient_weight", m.gradient_weight),
            ("mask.blur_radius", m.blur_radius),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ToneError::Config(format!(
                    "{name} must be a finite non-negative number, got {v}"
                )));
            }
        }
        if m.color_weight + m.gradient_weight <= 0.0 {
            return Err(ToneError::Config(
                "mask weights must not both be zero".into(),
            ));
        }
        if !(1..=6).contains(&m.histogram_bits) {
            return Err(ToneError::Config(format!(
                "mask.histogram_bits must be in 1..=6, got {}",
                m.histogram_bits
            )));
        }
        Ok(())
    }
}

/// One set of adjustments applied together, in order: temperature, contrast,
/// brightness, saturation, blur.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneSettings {
    /// Warm/cool shift in [-1, 1]
    pub temperature: f32,
    /// Contrast factor, 1.0 = unchanged
    pub contrast: f32,
    /// Restrict contrast to the estimated foreground
    pub objects_only: bool,
    /// Additive brightness in [-1, 1]
    pub brightness: f32,
    /// Saturation factor, 1.0 = unchanged
    pub saturation: f32,
    /// Gaussian blur radius in pixels, 0 = unchanged
    pub blur: f32,
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            contrast: 1.0,
            objects_only: false,
            brightness: 0.0,
            saturation: 1.0,
            blur: 0.0,
        }
    }
}

impl ToneSettings {
    /// True when applying these settings cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        self.temperature == 0.0
            && self.contrast == 1.0
            && self.brightness == 0.0
            && self.saturation == 1.0
            && self.blur == 0.0
    }
}
