use crate::foundation::{
    core::{Point, Rgba},
    error::{ChainError, ChainResult},
};

/// Encoded 8-bit RGBA frame, straight alpha, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Working image buffer threaded through the pass chain: linear light, one `Rgba` per pixel,
/// row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearFrame {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl LinearFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> ChainResult<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(ChainError::validation(format!(
                "frame expects {}x{} pixels, got {}",
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a frame from per-pixel values computed by `f(x, y)`.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Reallocate to `width x height`. Contents are cleared when the size changes and kept
    /// otherwise.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), Rgba::TRANSPARENT);
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    pub fn copy_from(&mut self, other: &LinearFrame) {
        self.resize(other.width, other.height);
        self.pixels.copy_from_slice(&other.pixels);
    }

    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        let w = self.width as usize;
        self.pixels[(y as usize) * w + (x as usize)] = color;
    }

    /// Bilinear sample at `uv` with clamp-to-edge addressing.
    pub fn sample(&self, uv: Point) -> Rgba {
        if self.pixels.is_empty() {
            return Rgba::TRANSPARENT;
        }
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let px = uv.x * w - 0.5;
        let py = (1.0 - uv.y) * h - 0.5;
        if !px.is_finite() || !py.is_finite() {
            return self.get(0, 0);
        }

        let x0f = px.floor();
        let y0f = py.floor();
        let fx = (px - x0f) as f32;
        let fy = (py - y0f) as f32;

        let max_x = i64::from(self.width) - 1;
        let max_y = i64::from(self.height) - 1;
        let x0 = (x0f as i64).clamp(0, max_x) as u32;
        let x1 = (x0f as i64 + 1).clamp(0, max_x) as u32;
        let y0 = (y0f as i64).clamp(0, max_y) as u32;
        let y1 = (y0f as i64 + 1).clamp(0, max_y) as u32;

        let top = self.get(x0, y0).lerp(self.get(x1, y0), fx);
        let bottom = self.get(x0, y1).lerp(self.get(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    /// Decode an sRGB-encoded 8-bit frame into linear light.
    pub fn from_rgba8_srgb(frame: &FrameRGBA) -> ChainResult<Self> {
        let expected = (frame.width as usize) * (frame.height as usize) * 4;
        if frame.data.len() != expected {
            return Err(ChainError::validation(
                "rgba8 frame data must match width*height*4",
            ));
        }
        let pixels = frame
            .data
            .chunks_exact(4)
            .map(|px| {
                Rgba::new(
                    srgb_to_linear(f32::from(px[0]) / 255.0),
                    srgb_to_linear(f32::from(px[1]) / 255.0),
                    srgb_to_linear(f32::from(px[2]) / 255.0),
                    f32::from(px[3]) / 255.0,
                )
            })
            .collect();
        Self::from_pixels(frame.width, frame.height, pixels)
    }

    /// Quantize to 8 bits for presentation. Channels are clamped to `[0, 1]` here and nowhere
    /// earlier; no transfer function is applied (the colour-space pass owns encoding).
    pub fn to_rgba8(&self) -> FrameRGBA {
        fn q(v: f32) -> u8 {
            if v.is_nan() {
                return 0;
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            data.extend_from_slice(&[q(c.r), q(c.g), q(c.b), q(c.a)]);
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
