use std::sync::{Arc, Mutex};

use super::*;
use crate::{
    effects::{
        displacement::DisplacementPass,
        fxaa::FxaaPass,
        gamma::GammaPass,
        params::{ParamSet, ParamSpec},
        pass::shade_pixels,
        tint::TintPass,
    },
    scene::image_scene::SolidScene,
};

type CallLog = Arc<Mutex<Vec<String>>>;

/// `out = in * mul + add` on RGB, recording each call.
struct Affine {
    id: &'static str,
    mul: f32,
    add: f32,
    log: CallLog,
    resized: Vec<(u32, u32)>,
    params: ParamSet,
}

impl Affine {
    fn new(id: &'static str, mul: f32, add: f32, log: &CallLog) -> Self {
        Self {
            id,
            mul,
            add,
            log: Arc::clone(log),
            resized: Vec::new(),
            params: ParamSet::new(vec![ParamSpec::float("phase", 0.0, None).clock_driven()]),
        }
    }

    fn apply(&self, c: Rgba) -> Rgba {
        c.map_rgb(|v| v * self.mul + self.add)
    }
}

impl Pass for Affine {
    fn id(&self) -> &str {
        self.id
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resized.push((width, height));
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        self.log.lock().unwrap().push(self.id.to_string());
        shade_pixels(output, |x, y, _| self.apply(input.get(x, y)));
    }
}

fn size(w: u32, h: u32) -> SurfaceSize {
    SurfaceSize::new(w, h, 1.0)
}

fn gray_input() -> LinearFrame {
    LinearFrame::from_fn(4, 3, |x, y| Rgba::gray(0.05 * (x + y) as f32))
}

#[test]
fn disabled_pass_between_two_enabled_is_skipped() {
    let log = CallLog::default();
    let a = Affine::new("a", 2.0, 0.0, &log);
    let c = Affine::new("c", 1.0, 0.1, &log);
    let expected_a = Affine::new("a", 2.0, 0.0, &log);
    let expected_c = Affine::new("c", 1.0, 0.1, &log);

    let mut chain = PassChain::builder(size(4, 3), SurfaceCaps::default())
        .pass(a, true)
        .pass(Affine::new("b", 0.0, 0.9, &log), false)
        .pass(c, true)
        .build()
        .unwrap();

    let input = gray_input();
    let out = chain.process(&input, &FrameContext::default()).clone();
    for y in 0..3 {
        for x in 0..4 {
            let want = expected_c.apply(expected_a.apply(input.get(x, y)));
            assert!(out.get(x, y).approx_eq(want, 1e-6));
        }
    }
    assert_eq!(*log.lock().unwrap(), vec!["a", "c"]);
}

#[test]
fn chain_with_everything_disabled_is_identity() {
    let log = CallLog::default();
    let mut chain = PassChain::builder(size(4, 3), SurfaceCaps::default())
        .pass(Affine::new("a", 3.0, 1.0, &log), false)
        .pass(TintPass::new(), false)
        .build()
        .unwrap();
    let input = gray_input();
    assert_eq!(chain.process(&input, &FrameContext::default()), &input);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn render_runs_scene_then_passes() {
    let mut chain = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .scene(Box::new(SolidScene {
            color: Rgba::gray(0.5),
        }))
        .pass(TintPass::new(), true)
        .build()
        .unwrap();
    let out = chain.render(&FrameContext::default());
    assert_eq!(out.dimensions(), (2, 2));
    assert!(out.get(1, 0).approx_eq(Rgba::new(1.0, 0.6, 0.6, 1.0), 1e-6));
}

#[test]
fn process_skips_the_scene_stage() {
    let mut chain = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .scene(Box::new(SolidScene { color: Rgba::BLACK }))
        .pass(TintPass::with_tint([0.0, 0.0, 0.25]), true)
        .build()
        .unwrap();
    let input = LinearFrame::filled(2, 2, Rgba::gray(0.5));
    let out = chain.process(&input, &FrameContext::default());
    assert!(out.get(0, 0).approx_eq(Rgba::new(0.5, 0.5, 0.75, 1.0), 1e-6));
}

#[test]
fn build_rejects_duplicate_ids() {
    let log = CallLog::default();
    let err = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .pass(Affine::new("x", 1.0, 0.0, &log), true)
        .pass(Affine::new("x", 1.0, 0.0, &log), true)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ChainError::Config(ref m) if m.contains("duplicate")));
}

#[test]
fn build_rejects_misplaced_scene_and_gamma() {
    let err = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .pass(TintPass::new(), true)
        .scene(Box::new(SolidScene { color: Rgba::BLACK }))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ChainError::Config(_)));

    let err = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .fixed(GammaPass::new())
        .pass(TintPass::new(), true)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ChainError::Config(_)));
}

#[test]
fn build_rejects_empty_chain_and_zero_size() {
    assert!(PassChain::builder(size(2, 2), SurfaceCaps::default())
        .build()
        .is_err());
    let err = PassChain::builder(size(0, 2), SurfaceCaps::default())
        .pass(TintPass::new(), true)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ChainError::Config(_)));
}

#[test]
fn build_surfaces_pass_validation_failures() {
    // FXAA is redundant on a surface that already antialiases.
    let err = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .fixed(FxaaPass::new())
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ChainError::Config(ref m) if m.contains("fxaa")));
}

#[test]
fn resize_clamps_pixel_ratio() {
    let log = CallLog::default();
    let mut chain = PassChain::builder(size(4, 4), SurfaceCaps::default())
        .pass(Affine::new("a", 1.0, 0.0, &log), true)
        .build()
        .unwrap();
    assert!(chain.resize(SurfaceSize::new(100, 50, 3.0)).unwrap());
    assert_eq!(chain.physical_size(), (200, 100));
    assert!(chain.resize(SurfaceSize::new(100, 50, 1.5)).unwrap());
    assert_eq!(chain.physical_size(), (150, 75));
}

#[test]
fn resize_is_idempotent() {
    let log = CallLog::default();
    let mut chain = PassChain::builder(size(4, 4), SurfaceCaps::default())
        .pass(Affine::new("a", 1.0, 0.0, &log), true)
        .build()
        .unwrap();
    let s = SurfaceSize::new(30, 20, 2.0);
    chain.resize(s).unwrap();
    let first = chain.snapshot();
    chain.resize(s).unwrap();
    assert_eq!(chain.snapshot(), first);
    assert_eq!(chain.physical_size(), (60, 40));

    let out = chain.process(&LinearFrame::new(60, 40), &FrameContext::default());
    assert_eq!(out.dimensions(), (60, 40));
}

#[test]
fn process_renders_at_current_size_after_resize() {
    let log = CallLog::default();
    let mut chain = PassChain::builder(size(8, 8), SurfaceCaps::default())
        .pass(Affine::new("a", 0.5, 0.0, &log), true)
        .build()
        .unwrap();
    assert!(chain.resize(size(4, 4)).unwrap());

    let stale = LinearFrame::filled(16, 8, Rgba::new(0.8, 0.4, 0.2, 1.0));
    let out = chain.process(&stale, &FrameContext::default()).clone();
    assert_eq!(out.dimensions(), chain.physical_size());
    assert_eq!(out.dimensions(), (4, 4));
    let px = out.get(3, 0);
    assert!((px.r - 0.4).abs() < 1e-6);
    assert!((px.g - 0.2).abs() < 1e-6);
    assert!((px.b - 0.1).abs() < 1e-6);
}

#[test]
fn oversized_resize_is_rejected() {
    let log = CallLog::default();
    let mut chain = PassChain::builder(size(4, 4), SurfaceCaps::default())
        .pass(Affine::new("a", 1.0, 0.0, &log), true)
        .build()
        .unwrap();
    let err = chain
        .resize(SurfaceSize::new(200_000, 200_000, 2.0))
        .unwrap_err();
    assert!(err.to_string().contains("too large"), "{err}");
    assert_eq!(chain.physical_size(), (4, 4));
}

#[test]
fn degenerate_resize_is_ignored() {
    let log = CallLog::default();
    let mut chain = PassChain::builder(size(8, 6), SurfaceCaps::default())
        .pass(Affine::new("a", 1.0, 0.0, &log), true)
        .build()
        .unwrap();
    assert!(!chain.resize(SurfaceSize::new(0, 10, 1.0)).unwrap());
    assert!(!chain.resize(SurfaceSize::new(10, 0, 1.0)).unwrap());
    assert_eq!(chain.size(), size(8, 6));
    assert_eq!(chain.physical_size(), (8, 6));
}

#[test]
fn apply_edits_and_toggles() {
    let mut chain = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .pass(TintPass::new(), true)
        .fixed(GammaPass::new())
        .build()
        .unwrap();

    chain
        .apply(ParamUpdate::vec3_component("tint", "tint", 0, 7.0))
        .unwrap();
    assert_eq!(chain.pass("tint").unwrap().params().vec3("tint"), [1.0, 0.1, 0.1]);

    chain.apply(ParamUpdate::enabled("tint", false)).unwrap();
    assert_eq!(chain.is_enabled("tint"), Some(false));

    let err = chain.apply(ParamUpdate::enabled("gamma", false)).unwrap_err();
    assert!(matches!(err, ChainError::Validation(_)));
    assert_eq!(chain.is_enabled("gamma"), Some(true));

    let err = chain.apply(ParamUpdate::enabled("nope", true)).unwrap_err();
    assert!(matches!(err, ChainError::Validation(ref m) if m.contains("nope")));

    let err = chain.apply(ParamUpdate::float("tint", "tint", 0.5)).unwrap_err();
    assert!(matches!(err, ChainError::Validation(_)));
}

#[test]
fn time_is_written_only_into_enabled_passes() {
    let log = CallLog::default();
    let mut chain = PassChain::builder(size(2, 2), SurfaceCaps::default())
        .pass(DisplacementPass::new(), true)
        .pass(Affine::new("a", 1.0, 0.0, &log), false)
        .build()
        .unwrap();
    chain.update_time(2.5);
    assert_eq!(chain.pass("displacement").unwrap().params().float("time"), 2.5);
    assert_eq!(chain.pass("a").unwrap().params().float("phase"), 0.0);

    chain.apply(ParamUpdate::enabled("displacement", false)).unwrap();
    chain.update_time(4.0);
    assert_eq!(chain.pass("displacement").unwrap().params().float("time"), 2.5);
}

#[test]
fn snapshot_lists_passes_in_order() {
    let mut chain = PassChain::builder(size(3, 2), SurfaceCaps::default())
        .scene(Box::new(SolidScene { color: Rgba::BLACK }))
        .pass(TintPass::new(), true)
        .fixed(GammaPass::new())
        .build()
        .unwrap();
    chain.apply(ParamUpdate::enabled("tint", false)).unwrap();

    let snap = chain.snapshot();
    let ids: Vec<&str> = snap.passes.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["scene", "tint", "gamma"]);
    assert_eq!(snap.physical, (3, 2));
    let tint = &snap.passes[1];
    assert!(!tint.enabled && tint.toggleable);
    assert_eq!(tint.label, "TintPass");
    assert_eq!(tint.params[0].value, serde_json::json!([0.5, 0.1, 0.1]));
    assert!(!snap.passes[2].toggleable);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["passes"][1]["kind"], "tint");
    assert_eq!(json["passes"][1]["params"][0]["type"], "vec3");
}
