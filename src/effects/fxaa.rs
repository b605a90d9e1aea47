use crate::{
    effects::{
        params::ParamSet,
        pass::{FrameContext, Pass, PassKind, SurfaceCaps, shade_pixels},
    },
    foundation::{
        core::{Point, Rgba, Vec2, clamp_pixel_ratio},
        error::{ChainError, ChainResult},
    },
    render::frame::LinearFrame,
};

const REDUCE_MIN: f32 = 1.0 / 128.0;
const REDUCE_MUL: f32 = 1.0 / 8.0;
const SPAN_MAX: f32 = 8.0;

/// Whether a post-process antialiasing stage belongs in the chain for this surface.
pub fn needs_post_antialias(caps: &SurfaceCaps) -> bool {
    !caps.native_antialias && clamp_pixel_ratio(caps.pixel_ratio) == 1.0
}

/// Fast approximate antialiasing: blends along the local luma gradient.
pub struct FxaaPass {
    params: ParamSet,
}

impl FxaaPass {
    pub fn new() -> Self {
        Self {
            params: ParamSet::default(),
        }
    }
}

impl Default for FxaaPass {
    fn default() -> Self {
        Self::new()
    }
}

fn fxaa_pixel(input: &LinearFrame, uv: Point, texel: Vec2) -> Rgba {
    let at = |dx: f64, dy: f64| input.sample(uv + Vec2::new(dx * texel.x, dy * texel.y));
    let luma_nw = at(-1.0, 1.0).luma();
    let luma_ne = at(1.0, 1.0).luma();
    let luma_sw = at(-1.0, -1.0).luma();
    let luma_se = at(1.0, -1.0).luma();
    let center = input.sample(uv);
    let luma_m = center.luma();

    let luma_min = luma_m.min(luma_nw.min(luma_ne).min(luma_sw.min(luma_se)));
    let luma_max = luma_m.max(luma_nw.max(luma_ne).max(luma_sw.max(luma_se)));

    let dir_x = -((luma_nw + luma_ne) - (luma_sw + luma_se));
    let dir_y = (luma_nw + luma_sw) - (luma_ne + luma_se);
    let reduce = ((luma_nw + luma_ne + luma_sw + luma_se) * (0.25 * REDUCE_MUL)).max(REDUCE_MIN);
    let rcp_min = 1.0 / (dir_x.abs().min(dir_y.abs()) + reduce);
    let dir = Vec2::new(
        f64::from((dir_x * rcp_min).clamp(-SPAN_MAX, SPAN_MAX)) * texel.x,
        f64::from((dir_y * rcp_min).clamp(-SPAN_MAX, SPAN_MAX)) * texel.y,
    );

    let along = |t: f64| input.sample(uv + dir * t);
    let rgb_a = (along(1.0 / 3.0 - 0.5) + along(2.0 / 3.0 - 0.5)) * 0.5;
    let rgb_b = rgb_a * 0.5 + (along(-0.5) + along(0.5)) * 0.25;
    let luma_b = rgb_b.luma();

    let picked = if luma_b < luma_min || luma_b > luma_max {
        rgb_a
    } else {
        rgb_b
    };
    Rgba {
        a: center.a,
        ..picked
    }
}

impl Pass for FxaaPass {
    fn id(&self) -> &str {
        "fxaa"
    }

    fn label(&self) -> &str {
        "FXAAPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::Fxaa
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn validate(&self, caps: &SurfaceCaps) -> ChainResult<()> {
        if !needs_post_antialias(caps) {
            return Err(ChainError::config(
                "post-process antialiasing is only supported on surfaces without native antialiasing at pixel ratio 1",
            ));
        }
        Ok(())
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let texel = Vec2::new(
            1.0 / f64::from(input.width()),
            1.0 / f64::from(input.height()),
        );
        shade_pixels(output, |_, _, uv| fxaa_pixel(input, uv, texel));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fxaa.rs"]
mod tests;
