//! ToneKit Color - Temperature, contrast and tone curve transforms.
//!
//! All transforms take a dense [`PixelBuffer`](tonekit_core::PixelBuffer),
//! validate their parameter before touching any pixel, and return a new
//! buffer. Alpha is always passed through.

pub mod adjust;
pub mod contrast;
pub mod lut;
pub mod parallel;
pub mod temperature;

pub use adjust::{apply_brightness, apply_saturation};
pub use contrast::{apply_contrast, contrast_curve, contrast_lut, validate_contrast};
pub use lut::ChannelLut;
pub use temperature::{apply_temperature, Temperature};
