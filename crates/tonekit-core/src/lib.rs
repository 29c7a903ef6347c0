//! ToneKit Core - Foundation types for tone adjustment
//!
//! This crate provides the types shared by every ToneKit transform:
//! - Host images and their orientation
//! - Dense pixel buffers and the adapter between the two
//! - Color helpers
//! - Errors and tuning configuration

pub mod adapter;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod image;

pub use adapter::{decode, encode, encode_buffer, force_portrait, normalize_orientation};
pub use color::{clamp_u8, luma8, Color};
pub use config::{MaskParams, TemperatureTuning, ToneConfig, ToneSettings};
pub use error::{Result, ToneError};
pub use frame::{ChannelLayout, PixelBuffer};
pub use image::{Image, Orientation};

/// The fixed mid-gray about which contrast is scaled.
pub const CONTRAST_PIVOT: f32 = 128.0;
