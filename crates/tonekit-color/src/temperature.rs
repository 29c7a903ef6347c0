//! Warm/cool color temperature shift.
//!
//! Red and blue move in opposite directions while green stays put as the
//! temperature-neutral anchor:
//!
//! ```text
//! R' = clamp(R + k * t * scale_r)
//! G' = G
//! B' = clamp(B - k * t * scale_b)
//! ```
//!
//! Clamping saturates; nothing wraps.

use crate::lut::{build_curve, identity_curve, ChannelLut};
use serde::{Deserialize, Serialize};
use tonekit_core::{PixelBuffer, Result, TemperatureTuning, ToneConfig, ToneError};
use tracing::debug;

/// A validated temperature shift; positive is warmer, negative cooler.
///
/// The conventional range is [-1, 1]. Larger magnitudes are allowed and only
/// saturate more channels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Temperature(f32);

impl Temperature {
    pub const NEUTRAL: Self = Self(0.0);

    /// Largest magnitude reported by host sliders.
    pub const SLIDER_RANGE: f32 = 100.0;

    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite() {
            return Err(ToneError::InvalidParameter(format!(
                "temperature must be finite, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Convert a slider value on the [-100, 100] scale, clamping overshoot.
    pub fn from_slider(value: f32) -> Result<Self> {
        let t = Self::new(value)?;
        Ok(Self((t.0 / Self::SLIDER_RANGE).clamp(-1.0, 1.0)))
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn is_neutral(self) -> bool {
        self.0 == 0.0
    }

    /// Per-channel offsets `(red, blue)` in 8-bit units.
    pub fn offsets(self, tuning: &TemperatureTuning) -> (f32, f32) {
        let base = tuning.sensitivity * self.0;
        (base * tuning.scale_r, -base * tuning.scale_b)
    }

    /// Tabulate the shift. Green is always the identity.
    pub fn lut(self, tuning: &TemperatureTuning) -> ChannelLut {
        if self.is_neutral() {
            return ChannelLut::identity();
        }
        let (dr, db) = self.offsets(tuning);
        ChannelLut {
            r: build_curve(|v| v + dr),
            g: identity_curve(),
            b: build_curve(|v| v + db),
        }
    }
}

/// Shift the color temperature of every pixel.
///
/// `temperature == 0` returns an exact copy.
pub fn apply_temperature(
    buffer: &PixelBuffer,
    temperature: f32,
    config: &ToneConfig,
) -> Result<PixelBuffer> {
    let t = Temperature::new(temperature)?;
    if t.is_neutral() {
        return Ok(buffer.clone());
    }
    debug!(
        temperature = t.value(),
        width = buffer.width(),
        height = buffer.height(),
        "applying temperature"
    );
    Ok(t.lut(&config.temperature)
        .apply(buffer, config.parallel_min_pixels))
}
