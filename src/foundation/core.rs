use std::ops::{Add, Mul};

pub use kurbo::{Point, Vec2};

/// Upper bound applied to every device pixel ratio before buffers are sized.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Linear-light RGBA color. Channels are not clamped; values above 1.0 are legal
/// until the frame is encoded for presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn gray(v: f32) -> Self {
        Self::opaque(v, v, v)
    }

    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_rgb(self, rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], self.a)
    }

    /// Add `offset` to the color channels, leaving alpha untouched.
    pub fn add_rgb(self, offset: [f32; 3]) -> Self {
        Self::new(
            self.r + offset[0],
            self.g + offset[1],
            self.b + offset[2],
            self.a,
        )
    }

    pub fn map_rgb(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Rec. 601 luma, the weighting used by the luminance-based passes.
    pub fn luma(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn approx_eq(self, other: Self, eps: f32) -> bool {
        (self.r - other.r).abs() <= eps
            && (self.g - other.g).abs() <= eps
            && (self.b - other.b).abs() <= eps
            && (self.a - other.a).abs() <= eps
    }
}

impl Add for Rgba {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl Mul<f32> for Rgba {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

/// Logical size of the display surface plus its device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn clamped_ratio(self) -> f64 {
        clamp_pixel_ratio(self.pixel_ratio)
    }

    /// Buffer dimensions in device pixels, after clamping the pixel ratio.
    pub fn physical(self) -> (u32, u32) {
        let ratio = self.clamped_ratio();
        (
            physical_extent(self.width, ratio),
            physical_extent(self.height, ratio),
        )
    }
}

/// Clamp a device pixel ratio into `(0, MAX_PIXEL_RATIO]`. Non-finite or non-positive input
/// is treated as 1.
pub fn clamp_pixel_ratio(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 1.0;
    }
    ratio.min(MAX_PIXEL_RATIO)
}

fn physical_extent(logical: u32, ratio: f64) -> u32 {
    if logical == 0 {
        return 0;
    }
    ((f64::from(logical) * ratio).round() as u32).max(1)
}

/// UV of the centre of pixel `(x, y)`. Row 0 is the top row; `v` grows upwards.
pub fn pixel_uv(x: u32, y: u32, width: u32, height: u32) -> Point {
    Point::new(
        (f64::from(x) + 0.5) / f64::from(width),
        1.0 - (f64::from(y) + 0.5) / f64::from(height),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
