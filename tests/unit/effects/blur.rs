use super::*;

#[test]
fn kernel_radius_0_is_identity() {
    assert_eq!(gaussian_kernel(0, 1.0).unwrap(), vec![1.0]);
}

#[test]
fn kernel_is_normalized_and_symmetric() {
    let k = gaussian_kernel(5, 5.0).unwrap();
    assert_eq!(k.len(), 11);
    let sum: f32 = k.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
    for i in 0..5 {
        assert!((k[i] - k[10 - i]).abs() < 1e-7);
    }
}

#[test]
fn bad_sigma_is_rejected() {
    assert!(gaussian_kernel(3, 0.0).is_err());
    assert!(gaussian_kernel(3, f32::NAN).is_err());
}

#[test]
fn blur_constant_image_is_identity() {
    let src = LinearFrame::filled(4, 3, Rgba::new(0.1, 0.2, 0.3, 0.4));
    let mut tmp = LinearFrame::new(0, 0);
    let mut dst = LinearFrame::new(0, 0);
    blur_frame(&src, &mut tmp, &mut dst, &gaussian_kernel(3, 2.0).unwrap());
    for c in dst.pixels() {
        assert!(c.approx_eq(Rgba::new(0.1, 0.2, 0.3, 0.4), 1e-5));
    }
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let mut src = LinearFrame::new(9, 9);
    src.set(4, 4, Rgba::new(1.0, 1.0, 1.0, 1.0));
    let mut tmp = LinearFrame::new(0, 0);
    let mut dst = LinearFrame::new(0, 0);
    blur_frame(&src, &mut tmp, &mut dst, &gaussian_kernel(2, 1.2).unwrap());

    let nonzero = dst.pixels().iter().filter(|c| c.a > 0.0).count();
    assert!(nonzero > 1);
    let total: f32 = dst.pixels().iter().map(|c| c.a).sum();
    assert!((total - 1.0).abs() < 1e-4);
}
