use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, px.repeat((w * h) as usize)).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn data_textures_keep_raw_channels() {
    let bytes = png_bytes(2, 3, [128, 128, 255, 255]);
    let tex = decode_texture(&bytes, ColorSpace::Data).unwrap();
    assert_eq!((tex.width(), tex.height()), (2, 3));
    assert_eq!(tex.color_space(), ColorSpace::Data);
    let c = tex.texels().get(1, 2);
    assert!((c.r - 128.0 / 255.0).abs() < 1e-6);
    assert!((c.b - 1.0).abs() < 1e-6);
}

#[test]
fn srgb_textures_are_linearized() {
    let bytes = png_bytes(1, 1, [188, 188, 188, 255]);
    let tex = decode_texture(&bytes, ColorSpace::Srgb).unwrap();
    let c = tex.texels().get(0, 0);
    // sRGB 188 is roughly linear 0.5.
    assert!((c.r - 0.5).abs() < 0.01);
    assert_eq!(c.a, 1.0);
}

#[test]
fn garbage_bytes_fail() {
    assert!(decode_texture(b"not an image", ColorSpace::Data).is_err());
}

#[test]
fn missing_file_is_an_asset_error() {
    let err = load_texture(
        std::path::Path::new("target/definitely/missing.png"),
        ColorSpace::Data,
    )
    .unwrap_err();
    assert!(matches!(err, ChainError::Asset(_)));
}
