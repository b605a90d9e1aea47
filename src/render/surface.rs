use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{foundation::error::ChainResult, render::frame::FrameRGBA};

/// Presentation target for finished frames.
///
/// Ordering contract: `present` is called once per rendered frame with strictly increasing
/// frame indices.
pub trait Surface: Send {
    fn present(&mut self, frame_index: u64, frame: &FrameRGBA) -> ChainResult<()>;
}

/// Keeps presented frames in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    frames: Vec<(u64, FrameRGBA)>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn last(&self) -> Option<&FrameRGBA> {
        self.frames.last().map(|(_, f)| f)
    }
}

impl Surface for InMemorySurface {
    fn present(&mut self, frame_index: u64, frame: &FrameRGBA) -> ChainResult<()> {
        self.frames.push((frame_index, frame.clone()));
        Ok(())
    }
}

/// Writes each frame as `<dir>/<prefix><index:05>.png`.
#[derive(Debug)]
pub struct PngSequenceSurface {
    dir: PathBuf,
    prefix: String,
    written: Vec<PathBuf>,
}

impl PngSequenceSurface {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> ChainResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
            written: Vec::new(),
        })
    }

    pub fn frame_path(&self, frame_index: u64) -> PathBuf {
        self.dir
            .join(format!("{}{frame_index:05}.png", self.prefix))
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Surface for PngSequenceSurface {
    fn present(&mut self, frame_index: u64, frame: &FrameRGBA) -> ChainResult<()> {
        let path = self.frame_path(frame_index);
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }
}

/// Encode one frame as an RGBA8 PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> ChainResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
