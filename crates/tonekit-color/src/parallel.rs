//! Row-parallel pixel traversal.
//!
//! Rows are disjoint slices of the buffer, so each rayon task owns its output
//! range outright. Small images stay on the calling thread; results are the
//! same either way.

use rayon::prelude::*;
use tonekit_core::PixelBuffer;

/// Run `f(y, row)` over every row, in parallel once the image holds at least
/// `min_pixels` pixels.
pub fn for_each_row_mut<F>(buffer: &mut PixelBuffer, min_pixels: usize, f: F)
where
    F: Fn(u32, &mut [u8]) + Sync + Send,
{
    let stride = buffer.stride();
    if stride == 0 {
        return;
    }
    let parallel = buffer.pixel_count() >= min_pixels;
    let data = buffer.as_bytes_mut();
    if parallel {
        data.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    } else {
        data.chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    }
}

/// Run `f` over every pixel's samples.
pub fn for_each_pixel_mut<F>(buffer: &mut PixelBuffer, min_pixels: usize, f: F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    let channels = buffer.channels();
    for_each_row_mut(buffer, min_pixels, |_, row| {
        for px in row.chunks_exact_mut(channels) {
            f(px);
        }
    });
}
