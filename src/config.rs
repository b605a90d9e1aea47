use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    thread::JoinHandle,
};

use crate::{
    assets::loader::{TextureLoader, TextureRequest},
    control::ParamUpdate,
    effects::pass::SurfaceCaps,
    foundation::{
        core::{Rgba, SurfaceSize},
        error::{ChainError, ChainResult},
    },
    render::{
        chain::PassChain,
        clock::{FixedStep, FrameClock},
        standard::{StandardChainOpts, standard_chain},
        surface::Surface,
        viewer::Viewer,
    },
    scene::{
        SceneRenderer,
        graph::demo_scene,
        image_scene::{ImageScene, SolidScene},
        procedural::ProceduralScene,
    },
};

/// JSON-facing description of a viewer: surface, scene, and per-pass overrides on top of the
/// standard chain. Relative paths are resolved against the directory passed to the builders
/// (usually the config file's parent).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    pub surface: SurfaceSize,
    #[serde(default = "default_true")]
    pub native_antialias: bool,
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub normal_map: Option<PathBuf>,
    /// Keyed by pass id.
    #[serde(default)]
    pub passes: BTreeMap<String, PassOverride>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum SceneConfig {
    /// The built-in lit sphere scene.
    Demo {
        #[serde(default = "default_exposure")]
        exposure: f32,
    },
    /// A still image stretched over the surface.
    Image { path: PathBuf },
    Solid { color: Rgba },
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::Demo {
            exposure: default_exposure(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassOverride {
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Parameter name to value: number, bool, or a 2/3-element number array.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

fn default_fps() -> f64 {
    60.0
}

fn default_exposure() -> f32 {
    1.5
}

impl ChainConfig {
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            native_antialias: true,
            fps: default_fps(),
            seed: 0,
            scene: SceneConfig::default(),
            normal_map: None,
            passes: BTreeMap::new(),
        }
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> ChainResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChainError::serde(format!("parse chain config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChainResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChainError::config(format!("open chain config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> ChainResult<()> {
        if self.surface.is_degenerate() {
            return Err(ChainError::config(format!(
                "surface {}x{} must be non-zero",
                self.surface.width, self.surface.height
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(ChainError::config(format!(
                "fps must be finite and > 0, got {}",
                self.fps
            )));
        }
        if let SceneConfig::Demo { exposure } = self.scene
            && (!exposure.is_finite() || exposure <= 0.0)
        {
            return Err(ChainError::config(format!(
                "scene exposure must be finite and > 0, got {exposure}"
            )));
        }
        Ok(())
    }

    pub fn caps(&self) -> SurfaceCaps {
        SurfaceCaps {
            native_antialias: self.native_antialias,
            pixel_ratio: self.surface.pixel_ratio,
        }
    }

    /// Scene renderer for this config. An image that fails to load degrades to a black scene.
    pub fn scene_renderer(&self, root: &Path) -> Box<dyn SceneRenderer> {
        match &self.scene {
            SceneConfig::Demo { exposure } => Box::new(ProceduralScene::new(demo_scene(), *exposure)),
            SceneConfig::Solid { color } => Box::new(SolidScene { color: *color }),
            SceneConfig::Image { path } => {
                let path = resolve(root, path);
                match ImageScene::from_path(&path) {
                    Ok(scene) => Box::new(scene),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "scene image unavailable");
                        Box::new(SolidScene { color: Rgba::BLACK })
                    }
                }
            }
        }
    }

    /// Build the standard chain and apply the per-pass overrides.
    #[tracing::instrument(skip(self))]
    pub fn build_chain(&self, root: &Path) -> ChainResult<PassChain> {
        self.validate()?;
        let opts = StandardChainOpts {
            size: self.surface,
            caps: self.caps(),
            seed: self.seed,
            normal_map: None,
        };
        let mut chain = standard_chain(self.scene_renderer(root), opts)?;

        for (id, ov) in &self.passes {
            if let Some(enabled) = ov.enabled {
                chain
                    .apply(ParamUpdate::enabled(id.as_str(), enabled))
                    .map_err(|e| ChainError::config(format!("override '{id}.enabled': {e}")))?;
            }
            for (name, value) in &ov.params {
                ParamUpdate::from_json(id.as_str(), name.as_str(), value)
                    .and_then(|u| chain.apply(u))
                    .map_err(|e| ChainError::config(format!("override '{id}.{name}': {e}")))?;
            }
        }
        Ok(chain)
    }

    pub fn normal_map_request(&self, root: &Path) -> Option<TextureRequest> {
        self.normal_map
            .as_ref()
            .map(|p| TextureRequest::data(resolve(root, p), "normal_displacement", "normal_map"))
    }

    /// Build the viewer with a fixed-step clock, and start loading the normal map if one is
    /// configured. Join the returned handle to make the map available before the next tick.
    pub fn build_viewer(
        &self,
        root: &Path,
        surface: Box<dyn Surface>,
        start_frame: u64,
    ) -> ChainResult<(Viewer, Option<JoinHandle<bool>>)> {
        let chain = self.build_chain(root)?;
        let clock = FrameClock::new(Box::new(
            FixedStep::new(self.fps)?.starting_at(start_frame),
        ))
        .starting_at(start_frame);
        let viewer = Viewer::new(chain, clock, surface);
        let loader = match self.normal_map_request(root) {
            Some(req) => Some(TextureLoader::spawn(req, viewer.control())?),
            None => None,
        };
        Ok((viewer, loader))
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/chain_config.rs"]
mod tests;
