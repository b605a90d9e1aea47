use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_surface")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn in_memory_surface_keeps_frames_in_order() {
    let mut s = InMemorySurface::new();
    s.present(0, &solid(1, 1, [1, 2, 3, 4])).unwrap();
    s.present(1, &solid(1, 1, [5, 6, 7, 8])).unwrap();
    assert_eq!(s.frames().len(), 2);
    assert_eq!(s.frames()[0].0, 0);
    assert_eq!(s.last().unwrap().data, vec![5, 6, 7, 8]);
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = scratch_dir("sequence");
    let mut s = PngSequenceSurface::new(&dir, "frame_").unwrap();
    s.present(3, &solid(4, 2, [255, 0, 0, 255])).unwrap();

    let path = dir.join("frame_00003.png");
    assert_eq!(s.written(), &[path.clone()]);
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(3, 1).0, [255, 0, 0, 255]);
}

#[test]
fn unwritable_directory_is_an_error() {
    let dir = scratch_dir("blocked");
    std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
    std::fs::write(&dir, b"not a directory").unwrap();
    let err = PngSequenceSurface::new(dir.join("inner"), "f").unwrap_err();
    assert!(err.to_string().contains("create output dir"));
}
