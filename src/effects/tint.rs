use crate::{
    effects::{
        params::{ParamRange, ParamSet, ParamSpec},
        pass::{FrameContext, Pass, PassKind, shade_pixels},
    },
    render::frame::LinearFrame,
};

pub const DEFAULT_TINT: [f64; 3] = [0.5, 0.1, 0.1];

/// Adds a constant RGB offset to every pixel. The sum is not clamped: the working buffers are
/// float, and the final quantization clamps.
pub struct TintPass {
    params: ParamSet,
}

impl TintPass {
    pub fn new() -> Self {
        Self::with_tint(DEFAULT_TINT)
    }

    pub fn with_tint(tint: [f64; 3]) -> Self {
        Self {
            params: ParamSet::new(vec![
                ParamSpec::vec3("tint", tint, Some(ParamRange::new(0.0, 1.0, 0.001)))
                    .with_labels(&["Red", "Green", "Blue"]),
            ]),
        }
    }

    pub fn tint(&self) -> [f32; 3] {
        self.params.vec3("tint").map(|c| c as f32)
    }
}

impl Default for TintPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for TintPass {
    fn id(&self) -> &str {
        "tint"
    }

    fn label(&self) -> &str {
        "TintPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::Tint
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let tint = self.tint();
        shade_pixels(output, |x, y, _| input.get(x, y).add_rgb(tint));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tint.rs"]
mod tests;
