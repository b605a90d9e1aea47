use rayon::prelude::*;

use crate::{
    foundation::{
        core::Rgba,
        error::{ChainError, ChainResult},
    },
    render::frame::LinearFrame,
};

/// Normalized Gaussian weights for offsets `-radius..=radius`.
pub fn gaussian_kernel(radius: u32, sigma: f32) -> ChainResult<Vec<f32>> {
    if radius == 0 {
        return Ok(vec![1.0]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ChainError::validation("blur sigma must be > 0"));
    }
    Ok(kernel_weights(radius, sigma))
}

pub(crate) fn kernel_weights(radius: u32, sigma: f32) -> Vec<f32> {
    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Separable blur of `src` into `dst`, using `tmp` for the horizontal result. `tmp` and `dst`
/// are resized to match `src`.
pub fn blur_frame(src: &LinearFrame, tmp: &mut LinearFrame, dst: &mut LinearFrame, kernel: &[f32]) {
    let (w, h) = src.dimensions();
    tmp.resize(w, h);
    dst.resize(w, h);
    if w == 0 || h == 0 {
        return;
    }
    horizontal_pass(src, tmp, kernel);
    vertical_pass(tmp, dst, kernel);
}

fn horizontal_pass(src: &LinearFrame, dst: &mut LinearFrame, k: &[f32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(src.width());
    let row_len = src.width() as usize;
    let src_px = src.pixels();
    dst.pixels_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let base = y * row_len;
            for (x, out) in row.iter_mut().enumerate() {
                let mut acc = Rgba::TRANSPARENT;
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x as i64 + ki as i64 - radius).clamp(0, w - 1) as usize;
                    acc = acc + src_px[base + sx] * kw;
                }
                *out = acc;
            }
        });
}

fn vertical_pass(src: &LinearFrame, dst: &mut LinearFrame, k: &[f32]) {
    let radius = (k.len() / 2) as i64;
    let h = i64::from(src.height());
    let row_len = src.width() as usize;
    let src_px = src.pixels();
    dst.pixels_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut acc = Rgba::TRANSPARENT;
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as i64 + ki as i64 - radius).clamp(0, h - 1) as usize;
                    acc = acc + src_px[sy * row_len + x] * kw;
                }
                *out = acc;
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
