use super::*;
use crate::foundation::core::Rgba;

#[test]
fn encodes_linear_to_srgb() {
    let input = LinearFrame::from_pixels(
        3,
        1,
        vec![Rgba::gray(0.0), Rgba::gray(0.5), Rgba::new(1.0, 0.002, -1.0, 0.5)],
    )
    .unwrap();
    let mut out = LinearFrame::new(3, 1);
    GammaPass::new().render(&FrameContext::default(), &input, &mut out);

    assert_eq!(out.get(0, 0), Rgba::gray(0.0));
    assert!((out.get(1, 0).r - 0.7354).abs() < 1e-3);
    let c = out.get(2, 0);
    assert!((c.r - 1.0).abs() < 1e-5);
    assert!((c.g - 0.002 * 12.92).abs() < 1e-6);
    assert_eq!(c.b, 0.0);
    assert_eq!(c.a, 0.5);
}
