use crate::{
    effects::{
        params::{ParamRange, ParamSet, ParamSpec},
        pass::{FrameContext, Pass, PassKind, shade_pixels},
    },
    foundation::core::{Point, Rgba},
    render::frame::LinearFrame,
};

/// Halftone screen: grayscale contrast stretch modulated by a rotated sine lattice.
pub struct DotScreenPass {
    params: ParamSet,
}

impl DotScreenPass {
    pub fn new() -> Self {
        Self {
            params: ParamSet::new(vec![
                ParamSpec::vec2("center", [0.5, 0.5], Some(ParamRange::new(0.0, 1.0, 0.001))),
                ParamSpec::float("angle", 1.57, Some(ParamRange::new(0.0, 6.283, 0.001))),
                ParamSpec::float("scale", 1.0, Some(ParamRange::new(0.0, 4.0, 0.001))),
                ParamSpec::vec2("size", [256.0, 256.0], None),
            ]),
        }
    }
}

impl Default for DotScreenPass {
    fn default() -> Self {
        Self::new()
    }
}

/// Lattice value in `[-4, 4]` at `uv`.
pub fn dot_pattern(uv: Point, center: [f64; 2], angle: f64, scale: f64, size: [f64; 2]) -> f32 {
    let (s, c) = angle.sin_cos();
    let tx = uv.x * size[0] - center[0];
    let ty = uv.y * size[1] - center[1];
    let px = (c * tx - s * ty) * scale;
    let py = (s * tx + c * ty) * scale;
    (px.sin() * py.sin() * 4.0) as f32
}

impl Pass for DotScreenPass {
    fn id(&self) -> &str {
        "dot_screen"
    }

    fn label(&self) -> &str {
        "DotScreenPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::DotScreen
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let center = self.params.vec2("center");
        let angle = self.params.float("angle");
        let scale = self.params.float("scale");
        let size = self.params.vec2("size");
        shade_pixels(output, |x, y, uv| {
            let c = input.get(x, y);
            let average = (c.r + c.g + c.b) / 3.0;
            let v = average * 10.0 - 5.0 + dot_pattern(uv, center, angle, scale, size);
            Rgba::new(v, v, v, c.a)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dot_screen.rs"]
mod tests;
