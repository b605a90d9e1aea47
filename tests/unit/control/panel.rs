use super::*;
use crate::{
    assets::ColorSpace,
    foundation::core::{Rgba, SurfaceSize},
    render::{
        frame::LinearFrame,
        standard::{StandardChainOpts, standard_chain},
    },
    scene::image_scene::SolidScene,
};

fn demo_panel() -> ControlPanel {
    let chain = standard_chain(
        Box::new(SolidScene { color: Rgba::BLACK }),
        StandardChainOpts::new(SurfaceSize::new(4, 4, 1.0)),
    )
    .unwrap();
    ControlPanel::from_snapshot(&chain.snapshot())
}

#[test]
fn fixed_stages_get_no_folder() {
    let panel = demo_panel();
    let titles: Vec<&str> = panel.folders.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "DotScreenPass",
            "GlitchPass",
            "RGBShiftPass",
            "UnrealBloomPass",
            "TintPass",
            "DisplacementPass",
            "FuturisticDisplacementPass",
        ]
    );
}

#[test]
fn bloom_folder_has_ranged_sliders() {
    let panel = demo_panel();
    let toggle = panel.control("UnrealBloomPass", "UnrealBloomPass").unwrap();
    assert_eq!(toggle.kind, ControlKind::Toggle { value: false });

    let strength = panel.control("UnrealBloomPass", "strength").unwrap();
    assert_eq!(
        strength.kind,
        ControlKind::Slider {
            min: 0.0,
            max: 2.0,
            step: 0.001,
            value: 0.3,
        }
    );
    let threshold = panel.control("UnrealBloomPass", "threshold").unwrap();
    assert!(matches!(threshold.kind, ControlKind::Slider { max, .. } if max == 1.0));
}

#[test]
fn tint_components_are_labelled_sliders() {
    let panel = demo_panel();
    let folder = panel.folder("TintPass").unwrap();
    let labels: Vec<&str> = folder.controls.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["TintPass", "Red", "Green", "Blue"]);

    let green = panel.control("TintPass", "Green").unwrap();
    assert_eq!(green.component, Some(1));
    let update = green.update(ControlInput::Number(0.8)).unwrap();
    assert!(matches!(
        update,
        ParamUpdate::SetVec3Component { component: 1, value, .. } if value == 0.8
    ));
}

#[test]
fn clock_driven_and_unranged_params_are_hidden() {
    let panel = demo_panel();
    assert_eq!(panel.folder("DisplacementPass").unwrap().controls.len(), 1);
    let dots = panel.folder("DotScreenPass").unwrap();
    assert!(dots.controls.iter().all(|c| c.param.as_deref() != Some("size")));
    assert!(panel.control("DotScreenPass", "angle").is_some());
}

#[test]
fn toggles_map_to_enable_and_bool_updates() {
    let panel = demo_panel();
    let enable = panel.control("GlitchPass", "GlitchPass").unwrap();
    assert!(matches!(
        enable.update(ControlInput::Toggle(true)).unwrap(),
        ParamUpdate::SetEnabled { enabled: true, .. }
    ));
    let wild = panel.control("GlitchPass", "go_wild").unwrap();
    assert!(matches!(
        wild.update(ControlInput::Toggle(true)).unwrap(),
        ParamUpdate::SetBool { value: true, .. }
    ));
    assert!(wild.update(ControlInput::Number(1.0)).is_err());
}

#[test]
fn image_picker_sends_textures() {
    let panel = demo_panel();
    let picker = panel
        .control("FuturisticDisplacementPass", "normal_map")
        .unwrap();
    assert_eq!(picker.kind, ControlKind::ImagePicker { loaded: false });
    let tex = Arc::new(Texture::from_frame(
        LinearFrame::new(1, 1),
        ColorSpace::Data,
    ));
    assert!(matches!(
        picker.update(ControlInput::Image(tex)).unwrap(),
        ParamUpdate::SetTexture { .. }
    ));
}

#[test]
fn panel_serializes_with_widget_tags() {
    let json: serde_json::Value =
        serde_json::from_str(&demo_panel().to_json_pretty().unwrap()).unwrap();
    let tint = &json["folders"][4];
    assert_eq!(tint["title"], "TintPass");
    assert_eq!(tint["controls"][0]["widget"], "toggle");
    assert_eq!(tint["controls"][1]["widget"], "slider");
    assert_eq!(tint["controls"][1]["param"], "tint");
    assert!(tint["controls"][0].get("param").is_none());
}
