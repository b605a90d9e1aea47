use std::sync::Arc;

use crate::{
    assets::Texture,
    effects::{
        params::{ParamSet, ParamSpec, ParamValue},
        pass::{FrameContext, Pass, PassKind, shade_pixels},
    },
    foundation::core::{Rgba, Vec2},
    render::frame::LinearFrame,
};

const OFFSET_SCALE: f64 = 0.1;
const LIGHT_GAIN: f32 = 0.5;

/// Decoded normal `(0, 0, 1)`: no offset and no lighting.
pub const NEUTRAL_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Remap a stored normal-map texel from `[0, 1]` to `[-1, 1]`.
pub fn decode_normal(texel: Rgba) -> [f32; 3] {
    [texel.r * 2.0 - 1.0, texel.g * 2.0 - 1.0, texel.b * 2.0 - 1.0]
}

/// Sampling offset and relief-light intensity for one decoded normal.
pub fn relief(normal: [f32; 3]) -> (Vec2, f32) {
    let offset = Vec2::new(
        f64::from(normal[0]) * OFFSET_SCALE,
        f64::from(normal[1]) * OFFSET_SCALE,
    );
    let inv = std::f32::consts::FRAC_1_SQRT_2;
    let light = [-inv, inv, 0.0];
    let dot = normal[0] * light[0] + normal[1] * light[1] + normal[2] * light[2];
    (offset, dot.clamp(0.0, 1.0))
}

/// Fake relief lighting from a static normal map: the map perturbs the sampling coordinate and
/// brightens along a fixed light direction. Until a map is bound the pass is neutral.
pub struct NormalDisplacementPass {
    params: ParamSet,
}

impl NormalDisplacementPass {
    pub fn new() -> Self {
        Self {
            params: ParamSet::new(vec![ParamSpec::texture("normal_map")]),
        }
    }

    pub fn with_normal_map(normal_map: Arc<Texture>) -> Self {
        Self {
            params: ParamSet::new(vec![ParamSpec {
                value: ParamValue::Texture(Some(normal_map)),
                ..ParamSpec::texture("normal_map")
            }]),
        }
    }

    pub fn normal_map(&self) -> Option<Arc<Texture>> {
        self.params.texture("normal_map")
    }
}

impl Default for NormalDisplacementPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for NormalDisplacementPass {
    fn id(&self) -> &str {
        "normal_displacement"
    }

    fn label(&self) -> &str {
        "FuturisticDisplacementPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::NormalDisplacement
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let Some(map) = self.normal_map() else {
            output.copy_from(input);
            return;
        };

        shade_pixels(output, |_, _, uv| {
            let normal = decode_normal(map.sample(uv));
            let (offset, intensity) = relief(normal);
            let boost = intensity * LIGHT_GAIN;
            input.sample(uv + offset).add_rgb([boost; 3])
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/normal_displacement.rs"]
mod tests;
