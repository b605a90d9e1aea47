use super::*;
use crate::assets::ColorSpace;

fn flat_map() -> Arc<Texture> {
    Arc::new(Texture::from_frame(
        LinearFrame::filled(4, 4, Rgba::new(0.5, 0.5, 1.0, 1.0)),
        ColorSpace::Data,
    ))
}

fn gradient(w: u32, h: u32) -> LinearFrame {
    LinearFrame::from_fn(w, h, |x, y| {
        Rgba::new(x as f32 / w as f32, y as f32 / h as f32, 0.25, 1.0)
    })
}

#[test]
fn flat_normal_has_no_offset_or_light() {
    let (offset, intensity) = relief(decode_normal(Rgba::new(0.5, 0.5, 1.0, 1.0)));
    assert_eq!(offset, Vec2::ZERO);
    assert_eq!(intensity, 0.0);
}

#[test]
fn normal_facing_light_gets_full_intensity() {
    let inv = std::f32::consts::FRAC_1_SQRT_2;
    let (offset, intensity) = relief([-inv, inv, 0.0]);
    assert!((intensity - 1.0).abs() < 1e-6);
    assert!((offset.x + 0.1 * f64::from(inv)).abs() < 1e-6);
    assert!((offset.y - 0.1 * f64::from(inv)).abs() < 1e-6);
}

#[test]
fn normal_facing_away_is_clamped_to_zero() {
    let (_, intensity) = relief([1.0, -1.0, 0.0]);
    assert_eq!(intensity, 0.0);
}

#[test]
fn flat_map_is_identity() {
    let input = gradient(6, 5);
    let mut out = LinearFrame::new(6, 5);
    let mut pass = NormalDisplacementPass::with_normal_map(flat_map());
    pass.render(&FrameContext::default(), &input, &mut out);
    for (a, b) in input.pixels().iter().zip(out.pixels()) {
        assert!(a.approx_eq(*b, 1e-6));
    }
}

#[test]
fn unloaded_map_is_neutral() {
    let input = gradient(3, 3);
    let mut out = LinearFrame::new(3, 3);
    let mut pass = NormalDisplacementPass::new();
    assert!(pass.normal_map().is_none());
    pass.render(&FrameContext::default(), &input, &mut out);
    assert_eq!(out, input);
}

#[test]
fn lit_normal_brightens_uniform_input() {
    // Stored texel for the decoded normal (-1, 1, 0) pointing at the light.
    let map = Arc::new(Texture::from_frame(
        LinearFrame::filled(2, 2, Rgba::new(0.0, 1.0, 0.5, 1.0)),
        ColorSpace::Data,
    ));
    let input = LinearFrame::filled(4, 4, Rgba::gray(0.2));
    let mut out = LinearFrame::new(4, 4);
    let mut pass = NormalDisplacementPass::with_normal_map(map);
    pass.render(&FrameContext::default(), &input, &mut out);

    // dot((-1, 1, 0), normalize(-1, 1, 0)) = sqrt(2), clamped to 1, scaled by 0.5.
    assert!(out.get(2, 2).approx_eq(Rgba::new(0.7, 0.7, 0.7, 1.0), 1e-5));
}
