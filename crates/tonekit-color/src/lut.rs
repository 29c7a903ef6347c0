//! 8-bit per-channel look-up tables.
//!
//! Every tone curve in this crate maps one 8-bit sample to another, so each is
//! baked into a 256-entry table per color channel and applied with plain
//! indexing. Alpha is never touched.

use crate::parallel::for_each_row_mut;
use tonekit_core::{clamp_u8, ChannelLayout, PixelBuffer};

/// Tabulate a curve over all 256 input values, saturating the output.
pub fn build_curve<F>(curve: F) -> [u8; 256]
where
    F: Fn(f32) -> f32,
{
    let mut table = [0u8; 256];
    for (i, out) in table.iter_mut().enumerate() {
        *out = clamp_u8(curve(i as f32));
    }
    table
}

/// Identity table.
pub fn identity_curve() -> [u8; 256] {
    let mut table = [0u8; 256];
    for (i, out) in table.iter_mut().enumerate() {
        *out = i as u8;
    }
    table
}

/// Separate tables for the red, green and blue channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLut {
    pub r: [u8; 256],
    pub g: [u8; 256],
    pub b: [u8; 256],
}

impl Default for ChannelLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl ChannelLut {
    /// Table that maps every sample to itself.
    pub fn identity() -> Self {
        let id = identity_curve();
        Self { r: id, g: id, b: id }
    }

    /// Same curve on all three color channels.
    pub fn uniform<F>(curve: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        let table = build_curve(curve);
        Self {
            r: table,
            g: table,
            b: table,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Map one RGB(A) pixel in place.
    #[inline]
    pub fn apply_pixel(&self, px: &mut [u8]) {
        px[0] = self.r[px[0] as usize];
        px[1] = self.g[px[1] as usize];
        px[2] = self.b[px[2] as usize];
    }

    /// Map every pixel of `buffer` in place.
    pub fn apply_in_place(&self, buffer: &mut PixelBuffer, min_parallel_pixels: usize) {
        let layout = buffer.layout();
        for_each_row_mut(buffer, min_parallel_pixels, |_, row| match layout {
            ChannelLayout::Rgba8 => {
                let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(row);
                for px in pixels {
                    self.apply_pixel(px);
                }
            }
            ChannelLayout::Rgb8 => {
                for px in row.chunks_exact_mut(3) {
                    self.apply_pixel(px);
                }
            }
        });
    }

    /// Map a copy of `buffer`.
    pub fn apply(&self, buffer: &PixelBuffer, min_parallel_pixels: usize) -> PixelBuffer {
        let mut out = buffer.clone();
        if !self.is_identity() {
            self.apply_in_place(&mut out, min_parallel_pixels);
        }
        out
    }
}
