use crate::{
    control::ParamUpdate,
    effects::{
        params::ParamRange,
        pass::{FrameContext, Pass, PassKind, SurfaceCaps, shade_pixels},
        scene_pass::ScenePass,
    },
    foundation::{
        core::{Rgba, SurfaceSize},
        error::{ChainError, ChainResult},
    },
    render::frame::LinearFrame,
    scene::SceneRenderer,
};

/// Upper bound on device pixels per working buffer (16K x 8K, 2 GiB of f32 RGBA).
pub const MAX_PHYSICAL_PIXELS: u64 = 16_384 * 8_192;

struct PassSlot {
    pass: Box<dyn Pass>,
    enabled: bool,
    toggleable: bool,
}

/// Collects passes in execution order, then validates and sizes them in [`build`].
///
/// [`build`]: PassChainBuilder::build
pub struct PassChainBuilder {
    size: SurfaceSize,
    caps: SurfaceCaps,
    slots: Vec<PassSlot>,
}

impl PassChainBuilder {
    pub fn new(size: SurfaceSize, caps: SurfaceCaps) -> Self {
        Self {
            size,
            caps,
            slots: Vec::new(),
        }
    }

    /// Append the scene stage. It is always enabled and cannot be toggled.
    pub fn scene(self, renderer: Box<dyn SceneRenderer>) -> Self {
        self.fixed(ScenePass::new(renderer))
    }

    /// Append a toggle-able pass with its initial enable flag.
    pub fn pass(self, pass: impl Pass + 'static, enabled: bool) -> Self {
        self.boxed(Box::new(pass), enabled, true)
    }

    /// Append a pass that is always enabled and cannot be toggled.
    pub fn fixed(self, pass: impl Pass + 'static) -> Self {
        self.boxed(Box::new(pass), true, false)
    }

    pub fn boxed(mut self, pass: Box<dyn Pass>, enabled: bool, toggleable: bool) -> Self {
        self.slots.push(PassSlot {
            pass,
            enabled,
            toggleable,
        });
        self
    }

    #[tracing::instrument(skip(self), fields(passes = self.slots.len()))]
    pub fn build(self) -> ChainResult<PassChain> {
        if self.slots.is_empty() {
            return Err(ChainError::config("pass chain must contain at least one pass"));
        }
        if self.size.is_degenerate() {
            return Err(ChainError::config(format!(
                "initial surface size {}x{} must be non-zero",
                self.size.width, self.size.height
            )));
        }

        let last = self.slots.len() - 1;
        for (idx, slot) in self.slots.iter().enumerate() {
            let id = slot.pass.id();
            if id.is_empty() {
                return Err(ChainError::config("pass id must be non-empty"));
            }
            if self.slots[..idx].iter().any(|s| s.pass.id() == id) {
                return Err(ChainError::config(format!("duplicate pass id '{id}'")));
            }
            match slot.pass.kind() {
                PassKind::Scene if idx != 0 => {
                    return Err(ChainError::config("the scene pass must be first"));
                }
                PassKind::Gamma if idx != last => {
                    return Err(ChainError::config(
                        "the colour-space pass must be last",
                    ));
                }
                _ => {}
            }
            slot.pass.validate(&self.caps).map_err(|e| {
                ChainError::config(format!("pass '{id}' cannot be constructed: {e}"))
            })?;
        }

        let mut chain = PassChain {
            slots: self.slots,
            caps: self.caps,
            size: self.size,
            physical: (0, 0),
            read: LinearFrame::new(0, 0),
            write: LinearFrame::new(0, 0),
        };
        chain.resize(self.size)?;
        tracing::debug!(order = ?chain.pass_ids(), "pass chain built");
        Ok(chain)
    }
}

/// Ordered post-processing chain. Owns the two working buffers that are handed to one pass at
/// a time; disabled passes are skipped without touching the buffers.
pub struct PassChain {
    slots: Vec<PassSlot>,
    caps: SurfaceCaps,
    size: SurfaceSize,
    physical: (u32, u32),
    read: LinearFrame,
    write: LinearFrame,
}

impl PassChain {
    pub fn builder(size: SurfaceSize, caps: SurfaceCaps) -> PassChainBuilder {
        PassChainBuilder::new(size, caps)
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Dimensions of every working buffer, in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        self.physical
    }

    pub fn caps(&self) -> SurfaceCaps {
        self.caps
    }

    pub fn pass_ids(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.pass.id()).collect()
    }

    pub fn pass(&self, id: &str) -> Option<&dyn Pass> {
        self.slots
            .iter()
            .find(|s| s.pass.id() == id)
            .map(|s| s.pass.as_ref())
    }

    pub fn is_enabled(&self, id: &str) -> Option<bool> {
        self.slots.iter().find(|s| s.pass.id() == id).map(|s| s.enabled)
    }

    /// Reallocate every buffer for a new surface size. Zero-sized surfaces are ignored and
    /// reported as `Ok(false)`.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, size: SurfaceSize) -> ChainResult<bool> {
        if size.is_degenerate() {
            tracing::debug!("ignoring degenerate resize");
            return Ok(false);
        }
        let (w, h) = size.physical();
        if u64::from(w) * u64::from(h) > MAX_PHYSICAL_PIXELS {
            return Err(ChainError::validation(format!(
                "surface {w}x{h} is too large (limit {MAX_PHYSICAL_PIXELS} device pixels)"
            )));
        }

        self.size = size;
        self.physical = (w, h);
        self.read.resize(w, h);
        self.write.resize(w, h);
        for slot in &mut self.slots {
            slot.pass.resize(w, h);
        }
        Ok(true)
    }

    /// Apply one control message. Edits are clamped to the parameter's range and are seen by
    /// the next execution of the pass.
    pub fn apply(&mut self, update: ParamUpdate) -> ChainResult<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.pass.id() == update.pass())
            .ok_or_else(|| {
                ChainError::validation(format!("unknown pass '{}'", update.pass()))
            })?;

        match update {
            ParamUpdate::SetEnabled { pass, enabled } => {
                if !slot.toggleable {
                    return Err(ChainError::validation(format!(
                        "pass '{pass}' is always enabled"
                    )));
                }
                slot.enabled = enabled;
            }
            ParamUpdate::SetFloat { param, value, .. } => {
                slot.pass.params_mut().set_float(&param, value)?;
            }
            ParamUpdate::SetBool { param, value, .. } => {
                slot.pass.params_mut().set_bool(&param, value)?;
            }
            ParamUpdate::SetVec2 { param, value, .. } => {
                slot.pass.params_mut().set_vec2(&param, value)?;
            }
            ParamUpdate::SetVec3 { param, value, .. } => {
                slot.pass.params_mut().set_vec3(&param, value)?;
            }
            ParamUpdate::SetVec3Component {
                param,
                component,
                value,
                ..
            } => {
                slot.pass
                    .params_mut()
                    .set_vec3_component(&param, component, value)?;
            }
            ParamUpdate::SetTexture { param, texture, .. } => {
                slot.pass.params_mut().set_texture(&param, texture)?;
            }
        }
        Ok(())
    }

    /// Write `elapsed` into the clock-driven parameters of enabled passes. Disabled passes keep
    /// their last value.
    pub fn update_time(&mut self, elapsed: f64) {
        for slot in self.slots.iter_mut().filter(|s| s.enabled) {
            let names: Vec<&'static str> = slot
                .pass
                .params()
                .iter()
                .filter(|p| p.clock_driven)
                .map(|p| p.name)
                .collect();
            for name in names {
                if let Err(e) = slot.pass.params_mut().set_float(name, elapsed) {
                    tracing::warn!(pass = slot.pass.id(), param = name, error = %e, "clock update rejected");
                }
            }
        }
    }

    /// Run every enabled pass, scene stage included, and return the final image.
    pub fn render(&mut self, ctx: &FrameContext) -> &LinearFrame {
        let (w, h) = self.physical;
        self.read.resize(w, h);
        let starts_with_scene = self
            .slots
            .first()
            .is_some_and(|s| s.pass.kind() == PassKind::Scene);
        if !starts_with_scene {
            self.read.fill(Rgba::TRANSPARENT);
        }
        self.run(ctx, false)
    }

    /// Run the post-processing passes over an externally rendered scene image. The scene stage,
    /// if present, is not executed. An image whose size differs from the current physical size is
    /// resampled to it, so the output always matches [`physical_size`].
    ///
    /// [`physical_size`]: PassChain::physical_size
    pub fn process(&mut self, scene: &LinearFrame, ctx: &FrameContext) -> &LinearFrame {
        let (w, h) = self.physical;
        if scene.dimensions() == (w, h) {
            self.read.copy_from(scene);
        } else {
            tracing::debug!(
                input = ?scene.dimensions(),
                physical = ?(w, h),
                "resampling scene image to surface size"
            );
            self.read.resize(w, h);
            shade_pixels(&mut self.read, |_, _, uv| scene.sample(uv));
        }
        self.run(ctx, true)
    }

    fn run(&mut self, ctx: &FrameContext, skip_scene: bool) -> &LinearFrame {
        tracing::trace!(frame = ctx.frame, elapsed = ctx.elapsed, "render chain");
        for slot in &mut self.slots {
            if !slot.enabled || (skip_scene && slot.pass.kind() == PassKind::Scene) {
                continue;
            }
            let (w, h) = self.read.dimensions();
            self.write.resize(w, h);
            slot.pass.render(ctx, &self.read, &mut self.write);
            std::mem::swap(&mut self.read, &mut self.write);
        }
        &self.read
    }

    /// Serializable view of every pass and parameter, for observers such as the control panel.
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            size: self.size,
            physical: self.physical,
            passes: self
                .slots
                .iter()
                .map(|s| PassSnapshot {
                    id: s.pass.id().to_string(),
                    label: s.pass.label().to_string(),
                    kind: s.pass.kind(),
                    enabled: s.enabled,
                    toggleable: s.toggleable,
                    params: s
                        .pass
                        .params()
                        .iter()
                        .map(|p| ParamSnapshot {
                            name: p.name.to_string(),
                            type_name: p.value.type_name().to_string(),
                            value: p.value.to_json(),
                            range: p.range,
                            labels: p.labels.iter().map(|l| l.to_string()).collect(),
                            clock_driven: p.clock_driven,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChainSnapshot {
    pub size: SurfaceSize,
    pub physical: (u32, u32),
    pub passes: Vec<PassSnapshot>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PassSnapshot {
    pub id: String,
    pub label: String,
    pub kind: PassKind,
    pub enabled: bool,
    pub toggleable: bool,
    pub params: Vec<ParamSnapshot>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParamSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: serde_json::Value,
    pub range: Option<ParamRange>,
    pub labels: Vec<String>,
    pub clock_driven: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/render/chain.rs"]
mod tests;
