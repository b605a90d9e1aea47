use crate::{
    effects::{
        params::ParamSet,
        pass::{FrameContext, Pass, PassKind},
    },
    render::frame::LinearFrame,
    scene::SceneRenderer,
};

/// First stage of every chain: rasterizes the scene into the working buffer, ignoring its input.
pub struct ScenePass {
    renderer: Box<dyn SceneRenderer>,
    params: ParamSet,
}

impl ScenePass {
    pub fn new(renderer: Box<dyn SceneRenderer>) -> Self {
        Self {
            renderer,
            params: ParamSet::default(),
        }
    }
}

impl Pass for ScenePass {
    fn id(&self) -> &str {
        "scene"
    }

    fn label(&self) -> &str {
        "RenderPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::Scene
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    fn render(&mut self, ctx: &FrameContext, _input: &LinearFrame, output: &mut LinearFrame) {
        self.renderer.render(ctx, output);
    }
}
