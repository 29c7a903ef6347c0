//! Foreground estimation for object-restricted adjustments.
//!
//! A deterministic saliency heuristic, not a trained model. Each pixel is
//! scored by two cues:
//!
//! - distance from the image's dominant color, taken as the background
//! - luminance gradient magnitude (Sobel)
//!
//! Each cue is normalized by its own maximum, the weighted sum is optionally
//! smoothed, and the result is normalized to [0, 1]. An image with no cue
//! anywhere (a single flat color) produces an all-zero mask.

use crate::blur::blur_matte;
use rayon::prelude::*;
use tonekit_core::{luma8, Color, MaskParams, PixelBuffer};
use tracing::debug;

/// Per-pixel foreground weight in [0, 1], co-indexed with a pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMask {
    width: u32,
    height: u32,
    weights: Vec<f32>,
}

impl ObjectMask {
    /// All-background mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            weights: vec![0.0; width as usize * height as usize],
        }
    }

    /// Wrap caller-supplied weights, clamping them into [0, 1].
    ///
    /// Returns `None` if the length does not match or a weight is NaN.
    pub fn from_weights(width: u32, height: u32, mut weights: Vec<f32>) -> Option<Self> {
        if weights.len() != width as usize * height as usize || weights.iter().any(|w| w.is_nan())
        {
            return None;
        }
        for w in &mut weights {
            *w = w.clamp(0.0, 1.0);
        }
        Some(Self {
            width,
            height,
            weights,
        })
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
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.weights[y as usize * self.width as usize + x as usize]
    }

    /// True when no pixel has any foreground weight.
    pub fn is_empty(&self) -> bool {
        self.weights.iter().all(|&w| w == 0.0)
    }

    /// Mean foreground weight.
    pub fn coverage(&self) -> f32 {
        if self.weights.is_empty() {
            return 0.0;
        }
        self.weights.iter().sum::<f32>() / self.weights.len() as f32
    }

    /// 8-bit grayscale rendering, for previews.
    pub fn to_gray8(&self) -> Vec<u8> {
        self.weights
            .iter()
            .map(|w| (w * 255.0).round() as u8)
            .collect()
    }
}

/// Most frequent color, from a histogram quantized to `bits` per channel.
///
/// Returns the mean of the pixels in the fullest bin; ties go to the lowest
/// bin index.
pub fn dominant_color(buffer: &PixelBuffer, bits: u8) -> Color {
    let bits = bits.clamp(1, 6) as u32;
    let shift = 8 - bits;
    let bins = 1usize << (3 * bits);
    let mut counts = vec![0u32; bins];
    let mut sums = vec![[0u64; 3]; bins];

    for px in buffer.pixels() {
        let idx = ((px[0] as usize >> shift) << (2 * bits))
            | ((px[1] as usize >> shift) << bits)
            | (px[2] as usize >> shift);
        counts[idx] += 1;
        sums[idx][0] += px[0] as u64;
        sums[idx][1] += px[1] as u64;
        sums[idx][2] += px[2] as u64;
    }

    let mut best = 0usize;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    let n = counts[best].max(1) as f64;
    let mean = |c: usize| (sums[best][c] as f64 / n) as f32 / 255.0;
    Color::rgb(mean(0), mean(1), mean(2))
}

/// Sobel gradient magnitude of luma, in 8-bit units, with clamped edges.
pub fn gradient_magnitude(buffer: &PixelBuffer) -> Vec<f32> {
    let w = buffer.width() as i64;
    let h = buffer.height() as i64;
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let luma: Vec<f32> = buffer.pixels().map(luma8).collect();
    let at = |x: i64, y: i64| luma[(y.clamp(0, h - 1) * w + x.clamp(0, w - 1)) as usize];

    let mut out = vec![0.0f32; (w * h) as usize];
    out.par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            for (x, g) in row.iter_mut().enumerate() {
                let x = x as i64;
                let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
                let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));
                *g = (gx * gx + gy * gy).sqrt();
            }
        });
    out
}

/// Divide by the maximum so the largest value becomes 1. A slice whose
/// maximum is zero is left as all zeros.
fn normalize_by_max(values: &mut [f32]) {
    let max = values.iter().copied().fold(0.0f32, f32::max);
    if max <= f32::EPSILON {
        values.iter_mut().for_each(|v| *v = 0.0);
        return;
    }
    for v in values.iter_mut() {
        *v = (*v / max).clamp(0.0, 1.0);
    }
}

/// Estimate how strongly each pixel belongs to a foreground object.
pub fn estimate_foreground(buffer: &PixelBuffer, params: &MaskParams) -> ObjectMask {
    let (w, h) = (buffer.width(), buffer.height());
    if buffer.pixel_count() == 0 {
        return ObjectMask::empty(w, h);
    }

    let background = dominant_color(buffer, params.histogram_bits);
    let mut color_term: Vec<f32> = buffer
        .pixels()
        .map(|px| Color::from_pixel(px).distance(background))
        .collect();
    normalize_by_max(&mut color_term);

    let mut gradient_term = gradient_magnitude(buffer);
    normalize_by_max(&mut gradient_term);

    let mut weights: Vec<f32> = color_term
        .iter()
        .zip(&gradient_term)
        .map(|(c, g)| params.color_weight * c + params.gradient_weight * g)
        .collect();

    blur_matte(&mut weights, w, h, params.blur_radius);
    normalize_by_max(&mut weights);

    let mask = ObjectMask {
        width: w,
        height: h,
        weights,
    };
    debug!(
        width = w,
        height = h,
        coverage = mask.coverage(),
        "estimated foreground mask"
    );
    mask
}
