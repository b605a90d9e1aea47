use crate::{
    effects::{
        params::{ParamSet, ParamSpec},
        pass::{FrameContext, Pass, PassKind, shade_pixels},
    },
    foundation::core::Vec2,
    render::frame::LinearFrame,
};

const WAVE_FREQUENCY: f64 = 10.0;
const WAVE_AMPLITUDE: f64 = 0.1;
const WAVE_BIAS: f64 = 0.01;

/// Vertical sampling offset of the ripple at horizontal coordinate `u` and time `t`.
pub fn displacement_offset(u: f64, t: f64) -> Vec2 {
    Vec2::new(0.0, (u * WAVE_FREQUENCY + t).sin() * WAVE_AMPLITUDE + WAVE_BIAS)
}

/// Time-animated sinusoidal ripple of the sampling coordinate.
///
/// `time` is clock-driven: the chain writes it only while the pass is enabled, so a disabled
/// pass keeps whatever time it last saw.
pub struct DisplacementPass {
    params: ParamSet,
}

impl DisplacementPass {
    pub fn new() -> Self {
        Self {
            params: ParamSet::new(vec![ParamSpec::float("time", 0.0, None).clock_driven()]),
        }
    }

    pub fn time(&self) -> f64 {
        self.params.float("time")
    }
}

impl Default for DisplacementPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for DisplacementPass {
    fn id(&self) -> &str {
        "displacement"
    }

    fn label(&self) -> &str {
        "DisplacementPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::Displacement
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let t = self.time();
        shade_pixels(output, |_, _, uv| {
            input.sample(uv + displacement_offset(uv.x, t))
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/displacement.rs"]
mod tests;
