pub mod decode;
pub mod loader;

use crate::{
    foundation::core::{Point, Rgba},
    render::frame::LinearFrame,
};

/// How the stored 8-bit channels of a texture should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Colour data, decoded from sRGB to linear light.
    Srgb,
    /// Non-colour data (normal maps), channels mapped to `[0, 1]` as-is.
    Data,
}

/// An immutable decoded image, sampled with the same filter as chain buffers.
#[derive(Clone, Debug)]
pub struct Texture {
    texels: LinearFrame,
    color_space: ColorSpace,
}

impl Texture {
    pub fn from_frame(texels: LinearFrame, color_space: ColorSpace) -> Self {
        Self {
            texels,
            color_space,
        }
    }

    pub fn width(&self) -> u32 {
        self.texels.width()
    }

    pub fn height(&self) -> u32 {
        self.texels.height()
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn texels(&self) -> &LinearFrame {
        &self.texels
    }

    pub fn sample(&self, uv: Point) -> Rgba {
        self.texels.sample(uv)
    }
}
