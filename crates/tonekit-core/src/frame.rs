//! Dense pixel buffers the transforms operate on.
//!
//! A [`PixelBuffer`] is always tightly packed: no row padding, one byte per
//! sample, `width * height * channels` bytes in total.

use serde::{Deserialize, Serialize};

/// Channel layout of an 8-bit pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// 8-bit RGB (24 bits per pixel)
    Rgb8,
    /// 8-bit RGBA (32 bits per pixel)
    #[default]
    Rgba8,
}

impl ChannelLayout {
    /// Layout for a raw channel count, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    /// Samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Whether the fourth sample is an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba8)
    }

    /// Bytes needed for a dense buffer of this layout.
    pub fn buffer_size(self, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.channels()
    }
}

/// A dense, row-major grid of 8-bit pixels in R,G,B[,A] order.
///
/// Invariant: `data.len() == width * height * layout.channels()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    layout: ChannelLayout,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32, layout: ChannelLayout) -> Self {
        Self {
            layout,
            width,
            height,
            data: vec![0u8; layout.buffer_size(width, height)],
        }
    }

    /// Wrap existing samples. Returns `None` if the length does not match.
    pub fn from_raw(width: u32, height: u32, layout: ChannelLayout, data: Vec<u8>) -> Option<Self> {
        if data.len() != layout.buffer_size(width, height) {
            return None;
        }
        Some(Self {
            layout,
            width,
            height,
            data,
        })
    }

    /// Fill a buffer with one pixel value.
    ///
    /// # Panics
    ///
    /// Panics if `pixel` does not hold exactly `layout.channels()` samples.
    pub fn solid(width: u32, height: u32, layout: ChannelLayout, pixel: &[u8]) -> Self {
        assert_eq!(pixel.len(), layout.channels(), "pixel does not match layout");
        let count = width as usize * height as usize;
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(count * pixel.len())
            .collect();
        Self {
            layout,
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Get a row of pixel data.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Get a mutable row of pixel data.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Samples of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * c;
        &self.data[start..start + c]
    }

    /// Iterate over pixels as channel slices, row-major.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels())
    }

    /// Alpha samples in pixel order, or `None` for RGB buffers.
    pub fn alpha(&self) -> Option<Vec<u8>> {
        if !self.layout.has_alpha() {
            return None;
        }
        Some(self.pixels().map(|p| p[3]).collect())
    }
}
