use std::{
    path::PathBuf,
    sync::Arc,
    thread::{self, JoinHandle},
};

use anyhow::Context;

use crate::{
    assets::{ColorSpace, decode::load_texture},
    control::{ControlHandle, ParamUpdate},
    foundation::error::ChainResult,
};

/// Where a background-loaded texture should land once decoded.
#[derive(Clone, Debug)]
pub struct TextureRequest {
    pub path: PathBuf,
    pub color_space: ColorSpace,
    pub pass: String,
    pub param: String,
}

impl TextureRequest {
    /// A non-colour texture (e.g. a normal map) for `pass.param`.
    pub fn data(path: impl Into<PathBuf>, pass: &str, param: &str) -> Self {
        Self {
            path: path.into(),
            color_space: ColorSpace::Data,
            pass: pass.to_string(),
            param: param.to_string(),
        }
    }
}

/// Decodes textures off the frame loop and delivers them as `SetTexture` updates.
pub struct TextureLoader;

impl TextureLoader {
    /// Start loading on a worker thread. The handle yields `true` once the update was queued.
    /// A failed load is logged and nothing is sent, leaving the parameter as it was.
    pub fn spawn(request: TextureRequest, control: ControlHandle) -> ChainResult<JoinHandle<bool>> {
        let handle = thread::Builder::new()
            .name("texture-loader".to_string())
            .spawn(move || Self::load_and_send(&request, &control))
            .context("spawn texture loader thread")?;
        Ok(handle)
    }

    fn load_and_send(request: &TextureRequest, control: &ControlHandle) -> bool {
        let texture = match load_texture(&request.path, request.color_space) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(
                    path = %request.path.display(),
                    pass = %request.pass,
                    error = %e,
                    "texture load failed"
                );
                return false;
            }
        };
        tracing::debug!(
            path = %request.path.display(),
            width = texture.width(),
            height = texture.height(),
            "texture loaded"
        );
        let update = ParamUpdate::SetTexture {
            pass: request.pass.clone(),
            param: request.param.clone(),
            texture: Arc::new(texture),
        };
        match control.update(update) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "texture loaded after the viewer stopped");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
