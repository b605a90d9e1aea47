use super::*;
use crate::foundation::core::Rgba;

#[test]
fn first_frame_is_a_strong_glitch() {
    let mut pass = GlitchPass::new(1);
    let s = pass.advance();
    assert!(!s.bypass);
    assert!(s.amount < 1.0 / 30.0);
    assert!((-1.0..1.0).contains(&s.seed_x));
}

#[test]
fn quiet_frames_follow_the_glitch_burst() {
    let mut pass = GlitchPass::new(3);
    let states: Vec<GlitchState> = (0..100).map(|_| pass.advance()).collect();
    // Trigger is at least 120 frames, so the burst lasts at most 48 frames and
    // frames 48..100 are all passthrough.
    assert!(!states[0].bypass);
    assert!(states[1].amount <= 1.0 / 90.0);
    assert!(states[60..].iter().all(|s| s.bypass));
}

#[test]
fn go_wild_glitches_every_frame() {
    let mut pass = GlitchPass::new(9);
    pass.params_mut().set_bool("go_wild", true).unwrap();
    for _ in 0..300 {
        assert!(!pass.advance().bypass);
    }
}

#[test]
fn displacement_map_is_a_single_channel_heightmap() {
    let pass = GlitchPass::new(7);
    assert_eq!(
        pass.displacement.dimensions(),
        (DISPLACEMENT_SIZE, DISPLACEMENT_SIZE)
    );
    assert!(pass.displacement.pixels().iter().all(|p| p.r == p.g && p.g == p.b));
    let first = pass.displacement.get(0, 0).r;
    assert!(pass.displacement.pixels().iter().any(|p| p.r != first));
}

#[test]
fn same_seed_same_sequence() {
    let mut a = GlitchPass::new(11);
    let mut b = GlitchPass::new(11);
    for _ in 0..10 {
        assert_eq!(a.advance(), b.advance());
    }
}

#[test]
fn bypass_frame_copies_input() {
    let mut pass = GlitchPass::new(5);
    let input = LinearFrame::from_fn(4, 4, |x, y| Rgba::gray((x + y) as f32 / 8.0));
    let mut out = LinearFrame::new(4, 4);
    for _ in 0..60 {
        pass.render(&FrameContext::default(), &input, &mut out);
    }
    assert!(pass.last_state().bypass);
    assert_eq!(out, input);
}
