use crate::{
    effects::{
        params::ParamSet,
        pass::{FrameContext, Pass, PassKind, shade_pixels},
    },
    render::frame::{LinearFrame, linear_to_srgb},
};

/// Final colour-space conversion from the linear working space to sRGB. Negative channels are
/// clamped to zero before encoding; values above 1 pass through and are clamped at quantization.
pub struct GammaPass {
    params: ParamSet,
}

impl GammaPass {
    pub fn new() -> Self {
        Self {
            params: ParamSet::default(),
        }
    }
}

impl Default for GammaPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for GammaPass {
    fn id(&self) -> &str {
        "gamma"
    }

    fn label(&self) -> &str {
        "GammaCorrectionPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::Gamma
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        shade_pixels(output, |x, y, _| {
            input.get(x, y).map_rgb(|c| linear_to_srgb(c.max(0.0)))
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gamma.rs"]
mod tests;
