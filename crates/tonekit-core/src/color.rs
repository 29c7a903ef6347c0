//! Floating-point color helpers shared by the transforms.

use serde::{Deserialize, Serialize};

/// Rec. 709 luma weights.
pub const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// RGBA color with 32-bit float components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB with alpha = 1.0.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from 8-bit RGBA values.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from an RGB or RGBA pixel slice.
    #[inline]
    pub fn from_pixel(px: &[u8]) -> Self {
        let a = px.get(3).copied().unwrap_or(255);
        Self::from_rgba8(px[0], px[1], px[2], a)
    }

    /// Convert to 8-bit RGBA, rounding to nearest.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Luminance (perceived brightness).
    #[inline]
    pub fn luminance(self) -> f32 {
        LUMA_WEIGHTS[0] * self.r + LUMA_WEIGHTS[1] * self.g + LUMA_WEIGHTS[2] * self.b
    }

    /// Euclidean RGB distance, ignoring alpha. Ranges over [0, sqrt(3)].
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Luma of an 8-bit RGB(A) pixel, in 8-bit units.
#[inline]
pub fn luma8(px: &[u8]) -> f32 {
    LUMA_WEIGHTS[0] * px[0] as f32 + LUMA_WEIGHTS[1] * px[1] as f32 + LUMA_WEIGHTS[2] * px[2] as f32
}

/// Round and saturate a float sample into `u8`.
#[inline]
pub fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
