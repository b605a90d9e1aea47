use super::*;
use crate::foundation::core::Rgba;

#[test]
fn tint_adds_offset_without_clamping() {
    let input = LinearFrame::from_fn(3, 2, |x, y| {
        Rgba::new(x as f32 * 0.4, y as f32 * 0.9, 0.75, 0.5)
    });
    let mut out = LinearFrame::new(3, 2);
    let mut pass = TintPass::with_tint([0.5, 0.1, 1.0]);
    pass.render(&FrameContext::default(), &input, &mut out);

    for y in 0..2 {
        for x in 0..3 {
            let c = input.get(x, y);
            let expected = Rgba::new(c.r + 0.5, c.g + 0.1, c.b + 1.0, c.a);
            assert!(out.get(x, y).approx_eq(expected, 1e-6));
        }
    }
    // 0.75 + 1.0 stays above 1.0 in the working buffer.
    assert!(out.get(0, 0).b > 1.0);
}

#[test]
fn gray_plus_default_tint() {
    let input = LinearFrame::filled(2, 2, Rgba::gray(0.5));
    let mut out = LinearFrame::new(2, 2);
    let mut pass = TintPass::new();
    pass.render(&FrameContext::default(), &input, &mut out);
    assert!(out.get(1, 1).approx_eq(Rgba::new(1.0, 0.6, 0.6, 1.0), 1e-6));
}

#[test]
fn tint_channels_have_unit_ranges() {
    let pass = TintPass::new();
    let spec = pass.params().spec("tint").unwrap();
    let range = spec.range.unwrap();
    assert_eq!((range.min, range.max, range.step), (0.0, 1.0, 0.001));
    assert_eq!(spec.labels, &["Red", "Green", "Blue"]);
}
