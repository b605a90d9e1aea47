use crate::{
    effects::{
        params::{ParamRange, ParamSet, ParamSpec},
        pass::{FrameContext, Pass, PassKind, shade_pixels},
    },
    foundation::core::{Point, Rgba, Vec2},
    render::frame::LinearFrame,
};

/// Sample red at `uv + offset`, green/alpha at `uv` and blue at `uv - offset`.
pub(crate) fn split_channels(input: &LinearFrame, uv: Point, offset: Vec2) -> Rgba {
    let cr = input.sample(uv + offset);
    let cga = input.sample(uv);
    let cb = input.sample(uv - offset);
    Rgba::new(cr.r, cga.g, cb.b, cga.a)
}

/// Chromatic channel shift along a direction.
pub struct RgbShiftPass {
    params: ParamSet,
}

impl RgbShiftPass {
    pub fn new() -> Self {
        Self {
            params: ParamSet::new(vec![
                ParamSpec::float("amount", 0.005, Some(ParamRange::new(0.0, 0.1, 0.0001))),
                ParamSpec::float("angle", 0.0, Some(ParamRange::new(0.0, 6.283, 0.001))),
            ]),
        }
    }
}

impl Default for RgbShiftPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RgbShiftPass {
    fn id(&self) -> &str {
        "rgb_shift"
    }

    fn label(&self) -> &str {
        "RGBShiftPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::RgbShift
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let amount = self.params.float("amount");
        let angle = self.params.float("angle");
        let offset = Vec2::new(angle.cos(), angle.sin()) * amount;
        shade_pixels(output, |_, _, uv| split_channels(input, uv, offset));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/rgb_shift.rs"]
mod tests;
