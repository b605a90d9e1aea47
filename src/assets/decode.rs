use std::path::Path;

use anyhow::Context;

use crate::{
    assets::{ColorSpace, Texture},
    foundation::{
        core::Rgba,
        error::{ChainError, ChainResult},
    },
    render::frame::{FrameRGBA, LinearFrame},
};

/// Decode encoded image bytes (PNG, JPEG, ...) into a texture.
pub fn decode_texture(bytes: &[u8], color_space: ColorSpace) -> ChainResult<Texture> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ChainError::asset("decoded image has zero size"));
    }

    let frame = FrameRGBA {
        width,
        height,
        data: rgba.into_raw(),
    };
    let texels = match color_space {
        ColorSpace::Srgb => LinearFrame::from_rgba8_srgb(&frame)?,
        ColorSpace::Data => rgba8_as_data(&frame)?,
    };
    Ok(Texture::from_frame(texels, color_space))
}

/// Read and decode an image file.
pub fn load_texture(path: &Path, color_space: ColorSpace) -> ChainResult<Texture> {
    let bytes = std::fs::read(path)
        .map_err(|e| ChainError::asset(format!("read '{}': {e}", path.display())))?;
    decode_texture(&bytes, color_space)
        .map_err(|e| ChainError::asset(format!("decode '{}': {e}", path.display())))
}

fn rgba8_as_data(frame: &FrameRGBA) -> ChainResult<LinearFrame> {
    let pixels = frame
        .data
        .chunks_exact(4)
        .map(|px| {
            Rgba::new(
                f32::from(px[0]) / 255.0,
                f32::from(px[1]) / 255.0,
                f32::from(px[2]) / 255.0,
                f32::from(px[3]) / 255.0,
            )
        })
        .collect();
    LinearFrame::from_pixels(frame.width, frame.height, pixels)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
