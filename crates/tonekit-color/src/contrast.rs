//! Pivot-about-midpoint contrast curve.
//!
//! `C' = clamp(128 + (C - 128) * contrast)` on each color channel.
//! 1.0 is the identity, 0.0 flattens everything to mid-gray.

use crate::lut::ChannelLut;
use tonekit_core::{PixelBuffer, Result, ToneConfig, ToneError, CONTRAST_PIVOT};
use tracing::debug;

/// Fail unless `contrast` is a finite, non-negative factor.
pub fn validate_contrast(contrast: f32) -> Result<()> {
    if !contrast.is_finite() || contrast < 0.0 {
        return Err(ToneError::InvalidParameter(format!(
            "contrast must be a finite value >= 0, got {contrast}"
        )));
    }
    Ok(())
}

/// The contrast curve for one sample, unclamped.
#[inline]
pub fn contrast_curve(value: f32, contrast: f32) -> f32 {
    CONTRAST_PIVOT + (value - CONTRAST_PIVOT) * contrast
}

/// Tabulated contrast curve.
pub fn contrast_lut(contrast: f32) -> ChannelLut {
    ChannelLut::uniform(|v| contrast_curve(v, contrast))
}

/// Apply contrast to every pixel.
pub fn apply_contrast(
    buffer: &PixelBuffer,
    contrast: f32,
    config: &ToneConfig,
) -> Result<PixelBuffer> {
    validate_contrast(contrast)?;
    if contrast == 1.0 {
        return Ok(buffer.clone());
    }
    debug!(
        contrast,
        width = buffer.width(),
        height = buffer.height(),
        "applying contrast"
    );
    Ok(contrast_lut(contrast).apply(buffer, config.parallel_min_pixels))
}
