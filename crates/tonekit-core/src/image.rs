//! Host-facing image container.
//!
//! [`Image`] is what the host application hands to ToneKit and gets back.
//! Unlike [`PixelBuffer`](crate::PixelBuffer) it may carry row padding and an
//! orientation tag, and nothing about it is validated until it is decoded.

use serde::{Deserialize, Serialize};

/// EXIF-style orientation of the stored pixels.
///
/// Describes the transform that takes the stored grid to the upright view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Stored upright (EXIF 1)
    #[default]
    Up,
    /// Mirrored horizontally (EXIF 2)
    UpMirrored,
    /// Rotated 180 degrees (EXIF 3)
    Down,
    /// Mirrored vertically (EXIF 4)
    DownMirrored,
    /// Transposed across the main diagonal (EXIF 5)
    LeftMirrored,
    /// Needs a 90 degree clockwise turn (EXIF 6)
    Right,
    /// Transposed across the anti-diagonal (EXIF 7)
    RightMirrored,
    /// Needs a 90 degree counter-clockwise turn (EXIF 8)
    Left,
}

impl Orientation {
    /// Map an EXIF orientation value (1-8).
    pub fn from_exif(value: u16) -> Option<Self> {
        Some(match value {
            1 => Self::Up,
            2 => Self::UpMirrored,
            3 => Self::Down,
            4 => Self::DownMirrored,
            5 => Self::LeftMirrored,
            6 => Self::Right,
            7 => Self::RightMirrored,
            8 => Self::Left,
            _ => return None,
        })
    }

    /// EXIF orientation value (1-8).
    pub fn to_exif(self) -> u16 {
        match self {
            Self::Up => 1,
            Self::UpMirrored => 2,
            Self::Down => 3,
            Self::DownMirrored => 4,
            Self::LeftMirrored => 5,
            Self::Right => 6,
            Self::RightMirrored => 7,
            Self::Left => 8,
        }
    }

    /// Whether upright display swaps width and height.
    #[inline]
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::LeftMirrored | Self::Right | Self::RightMirrored | Self::Left
        )
    }

    /// Orientation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            other => other,
        }
    }
}

/// An 8-bit image as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Samples per pixel (3 = RGB, 4 = RGBA)
    pub channels: usize,
    /// Bytes per row (may include padding)
    pub stride: usize,
    /// How the stored pixels must be turned to appear upright
    pub orientation: Orientation,
    /// Raw sample data
    pub data: Vec<u8>,
}

impl Image {
    /// Create a tightly packed, upright image.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            stride: (width as usize).saturating_mul(channels),
            orientation: Orientation::Up,
            data,
        }
    }

    /// Set a row stride other than `width * channels`.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Tag the image with an orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Upright display size `(width, height)`.
    pub fn display_size(&self) -> (u32, u32) {
        if self.orientation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Whether the image is wider than tall once upright.
    pub fn is_landscape(&self) -> bool {
        let (w, h) = self.display_size();
        w > h
    }
}

#[cfg(feature = "image")]
mod interop {
    use super::Image;
    use crate::error::{Result, ToneError};
    use ::image::{DynamicImage, RgbImage, RgbaImage};

    impl From<RgbImage> for Image {
        fn from(img: RgbImage) -> Self {
            let (w, h) = img.dimensions();
            Image::new(w, h, 3, img.into_raw())
        }
    }

    impl From<RgbaImage> for Image {
        fn from(img: RgbaImage) -> Self {
            let (w, h) = img.dimensions();
            Image::new(w, h, 4, img.into_raw())
        }
    }

    impl Image {
        /// Convert any decoded image, keeping alpha when the source has it.
        pub fn from_dynamic(img: &DynamicImage) -> Self {
            if img.color().has_alpha() {
                img.to_rgba8().into()
            } else {
                img.to_rgb8().into()
            }
        }

        /// Convert back into an `image` buffer.
        ///
        /// The image must be tightly packed; decode and re-encode it first if it
        /// carries row padding.
        pub fn into_dynamic(self) -> Result<DynamicImage> {
            if self.stride != self.width as usize * self.channels {
                return Err(ToneError::Encode(format!(
                    "stride {} is not tightly packed for width {}",
                    self.stride, self.width
                )));
            }
            let (w, h) = (self.width, self.height);
            let mismatch = || ToneError::Encode(format!("buffer does not match {w}x{h}"));
            match self.channels {
                3 => RgbImage::from_raw(w, h, self.data)
                    .map(DynamicImage::ImageRgb8)
                    .ok_or_else(mismatch),
                4 => RgbaImage::from_raw(w, h, self.data)
                    .map(DynamicImage::ImageRgba8)
                    .ok_or_else(mismatch),
                c => Err(ToneError::Encode(format!("unsupported channel count {c}"))),
            }
        }
    }

}
