use std::{path::Path, sync::Arc};

use crate::{
    assets::{ColorSpace, Texture, decode::load_texture},
    effects::pass::{FrameContext, shade_pixels},
    foundation::{core::Rgba, error::ChainResult},
    render::frame::LinearFrame,
    scene::SceneRenderer,
};

/// A still image used as the scene, stretched to the surface.
pub struct ImageScene {
    texture: Arc<Texture>,
}

impl ImageScene {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }

    pub fn from_path(path: &Path) -> ChainResult<Self> {
        let texture = load_texture(path, ColorSpace::Srgb)?;
        Ok(Self::new(Arc::new(texture)))
    }
}

impl SceneRenderer for ImageScene {
    fn render(&mut self, _ctx: &FrameContext, target: &mut LinearFrame) {
        let texture = &self.texture;
        shade_pixels(target, |_, _, uv| texture.sample(uv));
    }
}

/// A uniform colour, handy as a calibration scene.
pub struct SolidScene {
    pub color: Rgba,
}

impl SceneRenderer for SolidScene {
    fn render(&mut self, _ctx: &FrameContext, target: &mut LinearFrame) {
        target.fill(self.color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/image_scene.rs"]
mod tests;
