//! Separable Gaussian blur, for float mattes and for the blur control.

use rayon::prelude::*;
use tonekit_color::parallel::for_each_row_mut;
use tonekit_core::{clamp_u8, PixelBuffer, Result, ToneConfig, ToneError};
use tracing::debug;

/// Normalized 1D Gaussian kernel of half-width `ceil(radius)`.
fn kernel(radius: f32) -> (Vec<f32>, usize) {
    let r = radius.ceil() as usize;
    let sigma = radius / 3.0;
    let sigma2 = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..2 * r + 1)
        .map(|i| {
            let d = i as f32 - r as f32;
            (-d * d / sigma2).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= sum);
    (kernel, r)
}

/// Blur a `w * h` matte in place. Radii below half a pixel are a no-op.
///
/// Both passes run row-parallel. Edges are clamped, so a constant matte
/// stays constant.
pub fn blur_matte(matte: &mut [f32], w: u32, h: u32, radius: f32) {
    if radius < 0.5 || w == 0 || h == 0 {
        return;
    }
    let (kernel, r) = kernel(radius);
    let (w, h) = (w as usize, h as usize);
    // Source index of tap `k` around `i`, clamped into `0..len`.
    let tap = |i: usize, k: usize, len: usize| (i + k).saturating_sub(r).min(len - 1);

    let src = matte.to_vec();
    matte
        .par_chunks_mut(w)
        .zip(src.par_chunks(w))
        .for_each(|(out, row)| {
            for (x, o) in out.iter_mut().enumerate() {
                *o = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, weight)| row[tap(x, k, w)] * weight)
                    .sum();
            }
        });

    let src = matte.to_vec();
    matte
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out)| {
            for (x, o) in out.iter_mut().enumerate() {
                *o = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, weight)| src[tap(y, k, h) * w + x] * weight)
                    .sum();
            }
        });
}

/// Fail unless `radius` is a finite, non-negative pixel count.
pub fn validate_blur(radius: f32) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(ToneError::InvalidParameter(format!(
            "blur radius must be a finite value >= 0, got {radius}"
        )));
    }
    Ok(())
}

/// Gaussian blur of the color channels. Alpha is left as is.
///
/// `radius == 0` returns an exact copy.
pub fn apply_blur(buffer: &PixelBuffer, radius: f32, config: &ToneConfig) -> Result<PixelBuffer> {
    validate_blur(radius)?;
    if radius == 0.0 {
        return Ok(buffer.clone());
    }
    let (w, h) = (buffer.width(), buffer.height());
    debug!(radius, width = w, height = h, "applying blur");

    let planes: Vec<Vec<f32>> = (0..3)
        .into_par_iter()
        .map(|ch| {
            let mut plane: Vec<f32> = buffer.pixels().map(|px| px[ch] as f32).collect();
            blur_matte(&mut plane, w, h, radius);
            plane
        })
        .collect();

    let c = buffer.channels();
    let width = w as usize;
    let mut out = buffer.clone();
    for_each_row_mut(&mut out, config.parallel_min_pixels, |y, row| {
        let base = y as usize * width;
        for (x, px) in row.chunks_exact_mut(c).enumerate() {
            for (ch, plane) in planes.iter().enumerate() {
                px[ch] = clamp_u8(plane[base + x]);
            }
        }
    });
    Ok(out)
}
