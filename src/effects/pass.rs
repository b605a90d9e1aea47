use rayon::prelude::*;

use crate::{
    effects::params::ParamSet,
    foundation::{
        core::{Point, Rgba, pixel_uv},
        error::ChainResult,
    },
    render::frame::LinearFrame,
};

/// Per-frame values shared by every pass in one chain execution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameContext {
    /// Seconds since the first frame.
    pub elapsed: f64,
    /// 0-based frame counter.
    pub frame: u64,
}

/// What the display surface provides, checked once when the chain is built.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceCaps {
    /// The presentation surface already antialiases (MSAA or similar).
    pub native_antialias: bool,
    /// Device pixel ratio at construction, before clamping.
    pub pixel_ratio: f64,
}

impl Default for SurfaceCaps {
    fn default() -> Self {
        Self {
            native_antialias: true,
            pixel_ratio: 1.0,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Scene,
    DotScreen,
    Glitch,
    RgbShift,
    Bloom,
    Tint,
    Displacement,
    NormalDisplacement,
    Fxaa,
    Gamma,
    Custom,
}

/// One image-space stage of the chain.
///
/// `render` is called only while the pass is enabled and always with `output` sized to match
/// `input`. It must not fail: anything that can go wrong belongs in [`Pass::validate`], which the
/// chain calls once at construction.
pub trait Pass: Send {
    /// Stable identifier used by parameter updates (`"tint"`, `"bloom"`, ...).
    fn id(&self) -> &str;

    /// Human-facing name shown by the control panel.
    fn label(&self) -> &str {
        self.id()
    }

    fn kind(&self) -> PassKind {
        PassKind::Custom
    }

    fn params(&self) -> &ParamSet;

    fn params_mut(&mut self) -> &mut ParamSet;

    fn validate(&self, _caps: &SurfaceCaps) -> ChainResult<()> {
        Ok(())
    }

    /// Called whenever the chain's buffers are reallocated.
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn render(&mut self, ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame);
}

/// Evaluate `f(x, y, uv)` for every pixel of `output`, rows in parallel.
pub fn shade_pixels<F>(output: &mut LinearFrame, f: F)
where
    F: Fn(u32, u32, Point) -> Rgba + Sync,
{
    let (w, h) = output.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    output
        .pixels_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, px) in row.iter_mut().enumerate() {
                let x = x as u32;
                *px = f(x, y, pixel_uv(x, y, w, h));
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pass.rs"]
mod tests;
