//! Conversion between host [`Image`]s and dense [`PixelBuffer`]s.
//!
//! This is a pure format boundary: rows are copied and reordered, samples are
//! never changed.

use crate::error::{Result, ToneError};
use crate::frame::{ChannelLayout, PixelBuffer};
use crate::image::{Image, Orientation};
use tracing::trace;

/// Validate a host image and copy it into a dense pixel buffer.
///
/// Row padding is dropped. The orientation tag is ignored; call
/// [`normalize_orientation`] first if the pixels should be upright.
pub fn decode(image: &Image) -> Result<PixelBuffer> {
    if image.width == 0 || image.height == 0 {
        return Err(ToneError::Decode(format!(
            "image has zero area ({}x{})",
            image.width, image.height
        )));
    }
    let layout = ChannelLayout::from_channels(image.channels).ok_or_else(|| {
        ToneError::Decode(format!(
            "unsupported channel count {} (expected 3 or 4)",
            image.channels
        ))
    })?;

    let overflow = || ToneError::Decode("image dimensions overflow".into());
    let row_bytes = (image.width as usize)
        .checked_mul(image.channels)
        .ok_or_else(overflow)?;
    if image.stride < row_bytes {
        return Err(ToneError::Decode(format!(
            "stride {} is shorter than a row of {} bytes",
            image.stride, row_bytes
        )));
    }
    let needed = image
        .stride
        .checked_mul(image.height as usize - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or_else(overflow)?;
    if image.data.len() < needed {
        return Err(ToneError::Decode(format!(
            "image data holds {} bytes, {} required",
            image.data.len(),
            needed
        )));
    }

    let mut buffer = PixelBuffer::new(image.width, image.height, layout);
    if image.stride == row_bytes {
        buffer
            .as_bytes_mut()
            .copy_from_slice(&image.data[..row_bytes * image.height as usize]);
    } else {
        for y in 0..image.height {
            let start = y as usize * image.stride;
            buffer
                .row_mut(y)
                .copy_from_slice(&image.data[start..start + row_bytes]);
        }
    }

    trace!(
        width = image.width,
        height = image.height,
        channels = image.channels,
        stride = image.stride,
        "decoded image"
    );
    Ok(buffer)
}

/// Build a tightly packed, upright image from raw samples.
pub fn encode(data: Vec<u8>, width: u32, height: u32, channels: usize) -> Result<Image> {
    let layout = ChannelLayout::from_channels(channels)
        .ok_or_else(|| ToneError::Encode(format!("unsupported channel count {channels}")))?;
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(layout.channels()))
        .ok_or_else(|| ToneError::Encode("image dimensions overflow".into()))?;
    if data.len() != expected {
        return Err(ToneError::Encode(format!(
            "buffer holds {} bytes, {}x{}x{} needs {}",
            data.len(),
            width,
            height,
            channels,
            expected
        )));
    }
    Ok(Image::new(width, height, channels, data))
}

/// Encode a pixel buffer, taking its shape from the buffer itself.
pub fn encode_buffer(buffer: PixelBuffer) -> Result<Image> {
    let (w, h, c) = (buffer.width(), buffer.height(), buffer.channels());
    encode(buffer.into_raw(), w, h, c)
}

/// Source coordinate in the stored grid for an upright output coordinate.
fn source_coord(orientation: Orientation, w: u32, h: u32, dx: u32, dy: u32) -> (u32, u32) {
    match orientation {
        Orientation::Up => (dx, dy),
        Orientation::UpMirrored => (w - 1 - dx, dy),
        Orientation::Down => (w - 1 - dx, h - 1 - dy),
        Orientation::DownMirrored => (dx, h - 1 - dy),
        Orientation::LeftMirrored => (dy, dx),
        Orientation::Right => (dy, h - 1 - dx),
        Orientation::RightMirrored => (w - 1 - dy, h - 1 - dx),
        Orientation::Left => (w - 1 - dy, dx),
    }
}

fn reorient(buffer: &PixelBuffer, orientation: Orientation) -> PixelBuffer {
    let (w, h) = (buffer.width(), buffer.height());
    let (out_w, out_h) = if orientation.swaps_axes() { (h, w) } else { (w, h) };
    let c = buffer.channels();
    let mut out = PixelBuffer::new(out_w, out_h, buffer.layout());
    for dy in 0..out_h {
        let row = out.row_mut(dy);
        for dx in 0..out_w {
            let (sx, sy) = source_coord(orientation, w, h, dx, dy);
            let i = dx as usize * c;
            row[i..i + c].copy_from_slice(buffer.pixel(sx, sy));
        }
    }
    out
}

/// Bake the orientation tag into the pixel grid.
///
/// The result is tightly packed and tagged [`Orientation::Up`].
pub fn normalize_orientation(image: &Image) -> Result<Image> {
    let buffer = decode(image)?;
    if image.orientation == Orientation::Up {
        return encode_buffer(buffer);
    }
    trace!(orientation = ?image.orientation, "normalizing orientation");
    encode_buffer(reorient(&buffer, image.orientation))
}

/// Normalize orientation, then turn landscape images a quarter turn clockwise
/// so the result is never wider than it is tall.
pub fn force_portrait(image: &Image) -> Result<Image> {
    let upright = normalize_orientation(image)?;
    if upright.width <= upright.height {
        return Ok(upright);
    }
    let buffer = decode(&upright)?;
    encode_buffer(reorient(&buffer, Orientation::Right))
}
