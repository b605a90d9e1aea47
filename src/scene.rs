pub mod graph;
pub mod image_scene;
pub mod procedural;

use crate::{effects::pass::FrameContext, render::frame::LinearFrame};

/// Produces the raw scene image consumed by the first stage of the chain.
pub trait SceneRenderer: Send {
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Fill `target` (already sized to the chain's buffers) with the scene for this frame.
    fn render(&mut self, ctx: &FrameContext, target: &mut LinearFrame);
}
