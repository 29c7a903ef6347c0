//! Brightness and saturation, the remaining controls of the editor panel.

use crate::lut::ChannelLut;
use crate::parallel::for_each_pixel_mut;
use tonekit_core::{clamp_u8, luma8, PixelBuffer, Result, ToneConfig, ToneError};
use tracing::debug;

/// Fail unless `brightness` is finite and within [-1, 1].
pub fn validate_brightness(brightness: f32) -> Result<()> {
    if !brightness.is_finite() || !(-1.0..=1.0).contains(&brightness) {
        return Err(ToneError::InvalidParameter(format!(
            "brightness must be within [-1, 1], got {brightness}"
        )));
    }
    Ok(())
}

/// Fail unless `saturation` is a finite, non-negative factor.
pub fn validate_saturation(saturation: f32) -> Result<()> {
    if !saturation.is_finite() || saturation < 0.0 {
        return Err(ToneError::InvalidParameter(format!(
            "saturation must be a finite value >= 0, got {saturation}"
        )));
    }
    Ok(())
}

/// Add `brightness * 255` to each color channel.
pub fn apply_brightness(
    buffer: &PixelBuffer,
    brightness: f32,
    config: &ToneConfig,
) -> Result<PixelBuffer> {
    validate_brightness(brightness)?;
    if brightness == 0.0 {
        return Ok(buffer.clone());
    }
    debug!(brightness, "applying brightness");
    let offset = brightness * 255.0;
    Ok(ChannelLut::uniform(|v| v + offset).apply(buffer, config.parallel_min_pixels))
}

/// Scale each pixel's distance from its own luma by `saturation`.
///
/// 0 gives grayscale, 1 is the identity.
pub fn apply_saturation(
    buffer: &PixelBuffer,
    saturation: f32,
    config: &ToneConfig,
) -> Result<PixelBuffer> {
    validate_saturation(saturation)?;
    let mut out = buffer.clone();
    if saturation == 1.0 {
        return Ok(out);
    }
    debug!(saturation, "applying saturation");
    for_each_pixel_mut(&mut out, config.parallel_min_pixels, |px| {
        let l = luma8(px);
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        px[0] = clamp_u8(l + (r - l) * saturation);
        px[1] = clamp_u8(l + (g - l) * saturation);
        px[2] = clamp_u8(l + (b - l) * saturation);
    });
    Ok(out)
}
