//! passchain renders a scene through an ordered chain of toggle-able post-processing passes.
//!
//! # Frame overview
//!
//! 1. **Drain**: queued [`ChainEvent`]s (parameter edits, enable toggles, resizes) are applied
//! 2. **Clock**: [`FrameClock`] yields elapsed seconds; clock-driven parameters of enabled passes
//!    are updated
//! 3. **Render**: [`PassChain`] runs the scene stage, then every enabled pass in declared order
//!    over linear-light `f32` buffers
//! 4. **Present**: the final buffer is quantized to [`FrameRGBA`] and handed to a [`Surface`]
//!
//! Disabled passes are skipped outright, so a chain `[A, B (disabled), C]` produces exactly
//! `C(A(scene))`. Pass construction errors surface when the chain is built; rendering a frame
//! never fails inside a pass.
//!
//! The [`standard_chain`] reproduces the demo ordering: scene, dot screen, glitch, RGB shift,
//! bloom, tint, UV displacement, normal-map displacement, FXAA (only without native
//! antialiasing at pixel ratio 1), gamma.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod control;
mod effects;
mod foundation;
mod render;
mod scene;

pub use assets::decode::{decode_texture, load_texture};
pub use assets::loader::{TextureLoader, TextureRequest};
pub use assets::{ColorSpace, Texture};
pub use config::{ChainConfig, PassOverride, SceneConfig};
pub use control::panel::{ControlInput, ControlKind, ControlPanel, ControlSpec, PanelFolder};
pub use control::{ChainEvent, ControlHandle, ParamUpdate, control_channel};
pub use effects::bloom::{BloomPass, high_pass, mip_weight};
pub use effects::blur::{blur_frame, gaussian_kernel};
pub use effects::displacement::{DisplacementPass, displacement_offset};
pub use effects::dot_screen::{DotScreenPass, dot_pattern};
pub use effects::fxaa::{FxaaPass, needs_post_antialias};
pub use effects::gamma::GammaPass;
pub use effects::glitch::{GlitchPass, GlitchState};
pub use effects::normal_displacement::{
    NEUTRAL_NORMAL, NormalDisplacementPass, decode_normal, relief,
};
pub use effects::params::{ParamRange, ParamSet, ParamSpec, ParamValue};
pub use effects::pass::{FrameContext, Pass, PassKind, SurfaceCaps, shade_pixels};
pub use effects::rgb_shift::RgbShiftPass;
pub use effects::scene_pass::ScenePass;
pub use effects::tint::{DEFAULT_TINT, TintPass};
pub use foundation::core::{
    MAX_PIXEL_RATIO, Point, Rgba, SurfaceSize, Vec2, clamp_pixel_ratio, pixel_uv,
};
pub use foundation::error::{ChainError, ChainResult};
pub use render::chain::{
    ChainSnapshot, MAX_PHYSICAL_PIXELS, ParamSnapshot, PassChain, PassChainBuilder, PassSnapshot,
};
pub use render::clock::{FixedStep, FrameClock, TimeSource, WallClock};
pub use render::frame::{FrameRGBA, LinearFrame, linear_to_srgb, srgb_to_linear};
pub use render::standard::{StandardChainOpts, standard_chain};
pub use render::surface::{InMemorySurface, PngSequenceSurface, Surface, write_png};
pub use render::viewer::Viewer;
pub use scene::SceneRenderer;
pub use scene::graph::{
    BasicMaterial, Camera, DirectionalLight, Group, Material, MaterialTuner, Mesh, SceneNode,
    SceneVisitor, Shape, StandardMaterial, demo_scene,
};
pub use scene::image_scene::{ImageScene, SolidScene};
pub use scene::procedural::{ProceduralScene, environment, reinhard};
