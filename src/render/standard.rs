use std::sync::Arc;

use crate::{
    assets::Texture,
    effects::{
        bloom::BloomPass,
        displacement::DisplacementPass,
        dot_screen::DotScreenPass,
        fxaa::{FxaaPass, needs_post_antialias},
        gamma::GammaPass,
        glitch::GlitchPass,
        normal_displacement::NormalDisplacementPass,
        pass::SurfaceCaps,
        rgb_shift::RgbShiftPass,
        tint::TintPass,
    },
    foundation::{core::SurfaceSize, error::ChainResult},
    render::chain::PassChain,
    scene::SceneRenderer,
};

/// Inputs of the demo chain besides the scene itself.
#[derive(Clone, Debug)]
pub struct StandardChainOpts {
    pub size: SurfaceSize,
    pub caps: SurfaceCaps,
    /// Seed of the glitch pass's random sequence.
    pub seed: u64,
    /// Normal map available at construction. It can also arrive later as a `SetTexture` update.
    pub normal_map: Option<Arc<Texture>>,
}

impl StandardChainOpts {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            caps: SurfaceCaps {
                native_antialias: true,
                pixel_ratio: size.pixel_ratio,
            },
            seed: 0,
            normal_map: None,
        }
    }
}

/// Build the demo chain: scene, dot screen, glitch, RGB shift, bloom, tint, displacement,
/// normal-map displacement, FXAA (only without native antialiasing at ratio 1) and gamma.
///
/// Every toggle-able effect starts disabled; the debug panel or the configuration turns them on.
pub fn standard_chain(
    scene: Box<dyn SceneRenderer>,
    opts: StandardChainOpts,
) -> ChainResult<PassChain> {
    let normal = match opts.normal_map {
        Some(map) => NormalDisplacementPass::with_normal_map(map),
        None => NormalDisplacementPass::new(),
    };

    let mut builder = PassChain::builder(opts.size, opts.caps)
        .scene(scene)
        .pass(DotScreenPass::new(), false)
        .pass(GlitchPass::new(opts.seed), false)
        .pass(RgbShiftPass::new(), false)
        .pass(BloomPass::new(), false)
        .pass(TintPass::new(), false)
        .pass(DisplacementPass::new(), false)
        .pass(normal, false);
    if needs_post_antialias(&opts.caps) {
        builder = builder.fixed(FxaaPass::new());
    }
    builder.fixed(GammaPass::new()).build()
}

#[cfg(test)]
#[path = "../../tests/unit/render/standard.rs"]
mod tests;
