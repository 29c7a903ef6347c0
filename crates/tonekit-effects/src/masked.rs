//! Contrast restricted to estimated foreground objects.
//!
//! The adjusted and original pixels are blended per pixel by the mask weight,
//! `out = original * (1 - m) + adjusted * m`, so object boundaries fade in
//! rather than cutting hard.

use crate::mask::{estimate_foreground, ObjectMask};
use tonekit_color::parallel::for_each_row_mut;
use tonekit_color::{apply_contrast, validate_contrast};
use tonekit_core::{clamp_u8, PixelBuffer, Result, ToneConfig, ToneError};
use tracing::debug;

/// Blend `adjusted` over `original` by `mask`. Alpha comes from `original`.
pub fn blend_with_mask(
    original: &PixelBuffer,
    adjusted: &PixelBuffer,
    mask: &ObjectMask,
    min_parallel_pixels: usize,
) -> Result<PixelBuffer> {
    let shape = |b: &PixelBuffer| (b.width(), b.height(), b.layout());
    if shape(original) != shape(adjusted)
        || (mask.width(), mask.height()) != (original.width(), original.height())
    {
        return Err(ToneError::InvalidParameter(format!(
            "mask {}x{} and buffers {}x{} / {}x{} do not line up",
            mask.width(),
            mask.height(),
            original.width(),
            original.height(),
            adjusted.width(),
            adjusted.height()
        )));
    }

    let c = original.channels();
    let width = original.width() as usize;
    let mut out = original.clone();
    for_each_row_mut(&mut out, min_parallel_pixels, |y, row| {
        let adj = adjusted.row(y);
        let weights = &mask.weights()[y as usize * width..(y as usize + 1) * width];
        for (x, &m) in weights.iter().enumerate() {
            if m <= 0.0 {
                continue;
            }
            let i = x * c;
            for ch in i..i + 3 {
                row[ch] = clamp_u8(row[ch] as f32 * (1.0 - m) + adj[ch] as f32 * m);
            }
        }
    });
    Ok(out)
}

/// Apply contrast through a caller-supplied mask.
pub fn apply_contrast_with_mask(
    buffer: &PixelBuffer,
    contrast: f32,
    mask: &ObjectMask,
    config: &ToneConfig,
) -> Result<PixelBuffer> {
    validate_contrast(contrast)?;
    if contrast == 1.0 {
        return Ok(buffer.clone());
    }
    let adjusted = apply_contrast(buffer, contrast, config)?;
    blend_with_mask(buffer, &adjusted, mask, config.parallel_min_pixels)
}

/// Apply contrast to the whole frame, or only to estimated foreground objects.
///
/// `contrast == 1.0` is the identity in both modes and skips mask estimation.
pub fn apply_contrast_masked(
    buffer: &PixelBuffer,
    contrast: f32,
    objects_only: bool,
    config: &ToneConfig,
) -> Result<PixelBuffer> {
    validate_contrast(contrast)?;
    if contrast == 1.0 {
        return Ok(buffer.clone());
    }
    if !objects_only {
        return apply_contrast(buffer, contrast, config);
    }
    let mask = estimate_foreground(buffer, &config.mask);
    if mask.is_empty() {
        debug!("no foreground detected, contrast left unchanged");
        return Ok(buffer.clone());
    }
    apply_contrast_with_mask(buffer, contrast, &mask, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonekit_core::ChannelLayout;

    fn gradient_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::new(4, 1, ChannelLayout::Rgba8);
        buf.as_bytes_mut().copy_from_slice(&[
            20, 40, 60, 255, //
            100, 120, 140, 200, //
            180, 200, 220, 100, //
            250, 10, 128, 0,
        ]);
        buf
    }

    #[test]
    fn test_blend_endpoints() {
        let buf = gradient_buffer();
        let cfg = ToneConfig::default();
        let adjusted = apply_contrast(&buf, 2.0, &cfg).unwrap();
        let mask = ObjectMask::from_weights(4, 1, vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        let out = apply_contrast_with_mask(&buf, 2.0, &mask, &cfg).unwrap();

        assert_eq!(out.pixel(0, 0), buf.pixel(0, 0));
        assert_eq!(out.pixel(1, 0), adjusted.pixel(1, 0));
        assert_eq!(out.pixel(2, 0), buf.pixel(2, 0));
        assert_eq!(out.pixel(3, 0), adjusted.pixel(3, 0));
    }

    #[test]
    fn test_blend_half_weight() {
        let buf = PixelBuffer::solid(1, 1, ChannelLayout::Rgb8, &[64, 128, 192]);
        let mask = ObjectMask::from_weights(1, 1, vec![0.5]).unwrap();
        let out = apply_contrast_with_mask(&buf, 2.0, &mask, &ToneConfig::default()).unwrap();
        // Fully adjusted would be (0, 128, 255)
        assert_eq!(out.pixel(0, 0), &[32, 128, 224]);
    }

    #[test]
    fn test_alpha_kept() {
        let buf = gradient_buffer();
        let mask = ObjectMask::from_weights(4, 1, vec![1.0; 4]).unwrap();
        let out = apply_contrast_with_mask(&buf, 3.0, &mask, &ToneConfig::default()).unwrap();
        assert_eq!(out.alpha(), buf.alpha());
    }

    #[test]
    fn test_mismatched_mask_rejected() {
        let buf = gradient_buffer();
        let mask = ObjectMask::empty(2, 2);
        assert!(matches!(
            apply_contrast_with_mask(&buf, 2.0, &mask, &ToneConfig::default()),
            Err(ToneError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_identity_in_both_modes() {
        let buf = gradient_buffer();
        let cfg = ToneConfig::default();
        assert_eq!(apply_contrast_masked(&buf, 1.0, false, &cfg).unwrap(), buf);
        assert_eq!(apply_contrast_masked(&buf, 1.0, true, &cfg).unwrap(), buf);
    }

    #[test]
    fn test_flat_image_objects_only_unchanged() {
        let buf = PixelBuffer::solid(6, 6, ChannelLayout::Rgb8, &[30, 200, 90]);
        let out = apply_contrast_masked(&buf, 2.5, true, &ToneConfig::default()).unwrap();
        assert_eq!(out, buf);
        // Full-frame mode does change it.
        let full = apply_contrast_masked(&buf, 2.5, false, &ToneConfig::default()).unwrap();
        assert_ne!(full, buf);
    }

    #[test]
    fn test_negative_contrast_rejected_before_masking() {
        let buf = gradient_buffer();
        assert!(matches!(
            apply_contrast_masked(&buf, -0.5, true, &ToneConfig::default()),
            Err(ToneError::InvalidParameter(_))
        ));
    }
}
