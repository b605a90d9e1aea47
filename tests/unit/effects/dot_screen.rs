use super::*;

#[test]
fn pattern_is_bounded() {
    for i in 0..50 {
        let uv = Point::new(f64::from(i) / 50.0, 1.0 - f64::from(i) / 70.0);
        let p = dot_pattern(uv, [0.5, 0.5], 1.57, 1.0, [256.0, 256.0]);
        assert!((-4.0..=4.0).contains(&p));
    }
}

#[test]
fn output_is_grayscale_and_keeps_alpha() {
    let input = LinearFrame::from_fn(5, 4, |x, y| {
        Rgba::new(x as f32 * 0.2, y as f32 * 0.25, 0.3, 0.75)
    });
    let mut out = LinearFrame::new(5, 4);
    DotScreenPass::new().render(&FrameContext::default(), &input, &mut out);
    for c in out.pixels() {
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert_eq!(c.a, 0.75);
    }
}

#[test]
fn tile_size_is_fixed_across_resizes() {
    let mut pass = DotScreenPass::new();
    assert_eq!(pass.params().vec2("size"), [256.0, 256.0]);
    pass.resize(1920, 1080);
    assert_eq!(pass.params().vec2("size"), [256.0, 256.0]);
}
