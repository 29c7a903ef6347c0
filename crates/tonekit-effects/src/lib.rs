//! ToneKit Effects - Foreground masking and the adjustment surface
//!
//! Provides foreground mask estimation, mask-restricted contrast, blur, the
//! [`ToneAdjuster`] entry points for host images, and a registry of named
//! adjustments for hosts that drive transforms from generic parameter lists.

pub mod adjuster;
pub mod blur;
pub mod mask;
pub mod masked;

pub use adjuster::{adjust_contrast, adjust_temperature, ToneAdjuster};
pub use blur::apply_blur;
pub use mask::{estimate_foreground, ObjectMask};
pub use masked::{apply_contrast_masked, apply_contrast_with_mask, blend_with_mask};

use serde::{Deserialize, Serialize};
use tonekit_color::{apply_brightness, apply_saturation, apply_temperature};
use tonekit_core::{PixelBuffer, Result, ToneConfig, ToneError};

/// Adjustment parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f32),
    Bool(bool),
}

/// Adjustment parameter descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    pub display_name: String,
    pub default: ParamValue,
    pub min: Option<ParamValue>,
    pub max: Option<ParamValue>,
}

impl ParamDescriptor {
    fn float(name: &str, display_name: &str, default: f32, min: f32, max: f32) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            default: ParamValue::Float(default),
            min: Some(ParamValue::Float(min)),
            max: Some(ParamValue::Float(max)),
        }
    }

    fn flag(name: &str, display_name: &str, default: bool) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            default: ParamValue::Bool(default),
            min: None,
            max: None,
        }
    }
}

/// Collection of parameter values.
pub type ParamValues = std::collections::HashMap<String, ParamValue>;

/// A named buffer transform driven by generic parameters.
pub trait Adjustment: Send + Sync {
    /// Get the adjustment name.
    fn name(&self) -> &str;

    /// Get parameter descriptors.
    fn params(&self) -> &[ParamDescriptor];

    /// Apply the adjustment. Parameters missing from `values` take their
    /// descriptor default.
    fn apply(
        &self,
        input: &PixelBuffer,
        values: &ParamValues,
        config: &ToneConfig,
    ) -> Result<PixelBuffer>;
}

fn float_param(params: &[ParamDescriptor], values: &ParamValues, name: &str) -> Result<f32> {
    let value = values
        .get(name)
        .or_else(|| params.iter().find(|p| p.name == name).map(|p| &p.default));
    match value {
        Some(ParamValue::Float(v)) => Ok(*v),
        _ => Err(ToneError::InvalidParameter(format!(
            "parameter '{name}' must be a float"
        ))),
    }
}

fn bool_param(params: &[ParamDescriptor], values: &ParamValues, name: &str) -> Result<bool> {
    let value = values
        .get(name)
        .or_else(|| params.iter().find(|p| p.name == name).map(|p| &p.default));
    match value {
        Some(ParamValue::Bool(v)) => Ok(*v),
        _ => Err(ToneError::InvalidParameter(format!(
            "parameter '{name}' must be a bool"
        ))),
    }
}

/// Built-in adjustments registry.
pub struct AdjustmentRegistry {
    adjustments: Vec<Box<dyn Adjustment>>,
}

impl AdjustmentRegistry {
    /// Create a new registry with the built-in adjustments.
    pub fn new() -> Self {
        Self {
            adjustments: vec![
                Box::new(TemperatureAdjustment::new()),
                Box::new(ContrastAdjustment::new()),
                Box::new(BrightnessAdjustment::new()),
                Box::new(SaturationAdjustment::new()),
                Box::new(BlurAdjustment::new()),
            ],
        }
    }

    /// Add a host-defined adjustment.
    pub fn register(&mut self, adjustment: Box<dyn Adjustment>) {
        self.adjustments.push(adjustment);
    }

    /// Get all registered adjustments.
    pub fn adjustments(&self) -> &[Box<dyn Adjustment>] {
        &self.adjustments
    }

    /// Find an adjustment by name.
    pub fn find(&self, name: &str) -> Option<&dyn Adjustment> {
        self.adjustments
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }
}

impl Default for AdjustmentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Built-in adjustments
// ---------------------------------------------------------------------------

/// Warm/cool shift.
pub struct TemperatureAdjustment {
    params: Vec<ParamDescriptor>,
}

impl Default for TemperatureAdjustment {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureAdjustment {
    pub fn new() -> Self {
        Self {
            params: vec![ParamDescriptor::float(
                "temperature",
                "Temperature",
                0.0,
                -1.0,
                1.0,
            )],
        }
    }
}

impl Adjustment for TemperatureAdjustment {
    fn name(&self) -> &str {
        "Temperature"
    }

    fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    fn apply(
        &self,
        input: &PixelBuffer,
        values: &ParamValues,
        config: &ToneConfig,
    ) -> Result<PixelBuffer> {
        let t = float_param(&self.params, values, "temperature")?;
        apply_temperature(input, t, config)
    }
}

/// Contrast about mid-gray, optionally restricted to foreground objects.
pub struct ContrastAdjustment {
    params: Vec<ParamDescriptor>,
}

impl Default for ContrastAdjustment {
    fn default() -> Self {
        Self::new()
    }
}

impl ContrastAdjustment {
    pub fn new() -> Self {
        Self {
            params: vec![
                ParamDescriptor::float("contrast", "Contrast", 1.0, 0.5, 1.5),
                ParamDescriptor::flag("objects_only", "Objects Only", false),
            ],
        }
    }
}

impl Adjustment for ContrastAdjustment {
    fn name(&self) -> &str {
        "Contrast"
    }

    fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    fn apply(
        &self,
        input: &PixelBuffer,
        values: &ParamValues,
        config: &ToneConfig,
    ) -> Result<PixelBuffer> {
        let contrast = float_param(&self.params, values, "contrast")?;
        let objects_only = bool_param(&self.params, values, "objects_only")?;
        apply_contrast_masked(input, contrast, objects_only, config)
    }
}

/// Additive brightness.
pub struct BrightnessAdjustment {
    params: Vec<ParamDescriptor>,
}

impl Default for BrightnessAdjustment {
    fn default() -> Self {
        Self::new()
    }
}

impl BrightnessAdjustment {
    pub fn new() -> Self {
        Self {
            params: vec![ParamDescriptor::float(
                "brightness",
                "Brightness",
                0.0,
                -0.5,
                0.5,
            )],
        }
    }
}

impl Adjustment for BrightnessAdjustment {
    fn name(&self) -> &str {
        "Brightness"
    }

    fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    fn apply(
        &self,
        input: &PixelBuffer,
        values: &ParamValues,
        config: &ToneConfig,
    ) -> Result<PixelBuffer> {
        let b = float_param(&self.params, values, "brightness")?;
        apply_brightness(input, b, config)
    }
}

/// Saturation scale about per-pixel luma.
pub struct SaturationAdjustment {
    params: Vec<ParamDescriptor>,
}

impl Default for SaturationAdjustment {
    fn default() -> Self {
        Self::new()
    }
}

impl SaturationAdjustment {
    pub fn new() -> Self {
        Self {
            params: vec![ParamDescriptor::float(
                "saturation",
                "Saturation",
                1.0,
                0.0,
                2.0,
            )],
        }
    }
}

impl Adjustment for SaturationAdjustment {
    fn name(&self) -> &str {
        "Saturation"
    }

    fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    fn apply(
        &self,
        input: &PixelBuffer,
        values: &ParamValues,
        config: &ToneConfig,
    ) -> Result<PixelBuffer> {
        let s = float_param(&self.params, values, "saturation")?;
        apply_saturation(input, s, config)
    }
}

/// Gaussian blur of the color channels.
pub struct BlurAdjustment {
    params: Vec<ParamDescriptor>,
}

impl Default for BlurAdjustment {
    fn default() -> Self {
        Self::new()
    }
}

impl BlurAdjustment {
    pub fn new() -> Self {
        Self {
            params: vec![ParamDescriptor::float("radius", "Blur", 0.0, 0.0, 10.0)],
        }
    }
}

impl Adjustment for BlurAdjustment {
    fn name(&self) -> &str {
        "Blur"
    }

    fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    fn apply(
        &self,
        input: &PixelBuffer,
        values: &ParamValues,
        config: &ToneConfig,
    ) -> Result<PixelBuffer> {
        let radius = float_param(&self.params, values, "radius")?;
        apply_blur(input, radius, config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
