//! The image-level adjustment surface.
//!
//! Each call validates its parameter, decodes the host image once, runs the
//! buffer transform and encodes the result. The output keeps the input's
//! orientation tag, so hosts can hand it straight back to whatever displayed
//! the original.

use crate::blur::{apply_blur, validate_blur};
use crate::mask::{estimate_foreground, ObjectMask};
use crate::masked::apply_contrast_masked;
use tonekit_color::adjust::{validate_brightness, validate_saturation};
use tonekit_color::{apply_brightness, apply_saturation, apply_temperature, validate_contrast};
use tonekit_color::Temperature;
use tonekit_core::{decode, encode_buffer, Image, PixelBuffer, Result, ToneConfig, ToneSettings};
use tracing::{debug, info};

/// Applies tone adjustments to host images with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ToneAdjuster {
    config: ToneConfig,
}

impl ToneAdjuster {
    /// Adjuster with the compiled-in tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjuster with custom tuning. Fails with a config error if the tuning
    /// is out of range.
    pub fn with_config(config: ToneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ToneConfig {
        &self.config
    }

    /// Warm (positive) or cool (negative) the whole image.
    pub fn adjust_temperature(&self, image: &Image, temperature: f32) -> Result<Image> {
        Temperature::new(temperature)?;
        self.run(image, temperature == 0.0, |buf, cfg| {
            apply_temperature(buf, temperature, cfg)
        })
    }

    /// Scale contrast about mid-gray, optionally only on estimated
    /// foreground objects.
    pub fn adjust_contrast(
        &self,
        image: &Image,
        contrast: f32,
        objects_only: bool,
    ) -> Result<Image> {
        validate_contrast(contrast)?;
        self.run(image, contrast == 1.0, |buf, cfg| {
            apply_contrast_masked(buf, contrast, objects_only, cfg)
        })
    }

    pub fn adjust_brightness(&self, image: &Image, brightness: f32) -> Result<Image> {
        validate_brightness(brightness)?;
        self.run(image, brightness == 0.0, |buf, cfg| {
            apply_brightness(buf, brightness, cfg)
        })
    }

    pub fn adjust_saturation(&self, image: &Image, saturation: f32) -> Result<Image> {
        validate_saturation(saturation)?;
        self.run(image, saturation == 1.0, |buf, cfg| {
            apply_saturation(buf, saturation, cfg)
        })
    }

    /// Gaussian blur of the color channels, radius in pixels.
    pub fn adjust_blur(&self, image: &Image, radius: f32) -> Result<Image> {
        validate_blur(radius)?;
        self.run(image, radius == 0.0, |buf, cfg| {
            apply_blur(buf, radius, cfg)
        })
    }

    /// Apply a full set of adjustments in one decode/encode pass.
    ///
    /// Order is temperature, contrast, brightness, saturation, blur. Every
    /// value is checked before any pixel is touched.
    pub fn apply(&self, image: &Image, settings: &ToneSettings) -> Result<Image> {
        Temperature::new(settings.temperature)?;
        validate_contrast(settings.contrast)?;
        validate_brightness(settings.brightness)?;
        validate_saturation(settings.saturation)?;
        validate_blur(settings.blur)?;

        self.run(image, settings.is_identity(), |buf, cfg| {
            let buf = apply_temperature(buf, settings.temperature, cfg)?;
            let buf = apply_contrast_masked(&buf, settings.contrast, settings.objects_only, cfg)?;
            let buf = apply_brightness(&buf, settings.brightness, cfg)?;
            let buf = apply_saturation(&buf, settings.saturation, cfg)?;
            apply_blur(&buf, settings.blur, cfg)
        })
    }

    /// Foreground mask for an image, in its stored pixel order.
    pub fn estimate_foreground(&self, image: &Image) -> Result<ObjectMask> {
        let buffer = decode(image)?;
        Ok(estimate_foreground(&buffer, &self.config.mask))
    }

    fn run<F>(&self, image: &Image, identity: bool, transform: F) -> Result<Image>
    where
        F: FnOnce(&PixelBuffer, &ToneConfig) -> Result<PixelBuffer>,
    {
        let buffer = decode(image)?;
        if identity {
            debug!("identity adjustment, returning input unchanged");
            return Ok(image.clone());
        }
        info!(
            width = image.width,
            height = image.height,
            channels = image.channels,
            "adjusting image"
        );
        let out = transform(&buffer, &self.config)?;
        Ok(encode_buffer(out)?.with_orientation(image.orientation))
    }
}

/// Shift color temperature with the default tuning.
pub fn adjust_temperature(image: &Image, temperature: f32) -> Result<Image> {
    ToneAdjuster::new().adjust_temperature(image, temperature)
}

/// Adjust contrast with the default tuning.
pub fn adjust_contrast(image: &Image, contrast: f32, objects_only: bool) -> Result<Image> {
    ToneAdjuster::new().adjust_contrast(image, contrast, objects_only)
}
