use crate::{
    effects::{
        params::{ParamSet, ParamSpec},
        pass::{FrameContext, Pass, PassKind, shade_pixels},
        rgb_shift::split_channels,
    },
    foundation::{
        core::{Point, Rgba, Vec2},
        math::{SplitMix64, hash2},
    },
    render::frame::LinearFrame,
};

const DISPLACEMENT_SIZE: u32 = 64;
const TRIGGER_MIN: u32 = 120;
const TRIGGER_MAX: u32 = 240;
const BAND_WIDTH: f64 = 0.05;

/// Uniforms of one glitch frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlitchState {
    pub bypass: bool,
    pub amount: f64,
    pub angle: f64,
    pub seed: f64,
    pub seed_x: f64,
    pub seed_y: f64,
    pub distortion_x: f64,
    pub distortion_y: f64,
}

/// Periodic digital corruption: every `trigger` frames a strong glitch, followed by a short
/// run of mild ones, otherwise a passthrough. `go_wild` glitches every frame.
pub struct GlitchPass {
    params: ParamSet,
    rng: SplitMix64,
    displacement: LinearFrame,
    frame_counter: u32,
    trigger: u32,
    last: GlitchState,
}

impl GlitchPass {
    pub fn new(seed: u64) -> Self {
        let mut rng = SplitMix64::new(seed);
        // Heightmap: one value per texel in every channel.
        let displacement = LinearFrame::from_fn(DISPLACEMENT_SIZE, DISPLACEMENT_SIZE, |_, _| {
            let v = rng_unit(&mut rng);
            Rgba::new(v, v, v, 1.0)
        });
        let trigger = rng.range_u32(TRIGGER_MIN, TRIGGER_MAX);
        Self {
            params: ParamSet::new(vec![ParamSpec::boolean("go_wild", false)]),
            rng,
            displacement,
            frame_counter: 0,
            trigger,
            last: GlitchState::default(),
        }
    }

    /// State used by the most recent frame.
    pub fn last_state(&self) -> GlitchState {
        self.last
    }

    /// Advance the per-frame state machine.
    pub fn advance(&mut self) -> GlitchState {
        let go_wild = self.params.boolean("go_wild");
        let rng = &mut self.rng;
        let mut s = GlitchState {
            seed: rng.next_f64(),
            ..self.last
        };
        s.bypass = false;

        if self.frame_counter % self.trigger == 0 || go_wild {
            s.amount = rng.next_f64() / 30.0;
            s.angle = rng.range_f64(-std::f64::consts::PI, std::f64::consts::PI);
            s.seed_x = rng.range_f64(-1.0, 1.0);
            s.seed_y = rng.range_f64(-1.0, 1.0);
            s.distortion_x = rng.range_f64(0.0, 1.0);
            s.distortion_y = rng.range_f64(0.0, 1.0);
            self.frame_counter = 0;
            self.trigger = rng.range_u32(TRIGGER_MIN, TRIGGER_MAX);
        } else if self.frame_counter % self.trigger < self.trigger / 5 {
            s.amount = rng.next_f64() / 90.0;
            s.angle = rng.range_f64(-std::f64::consts::PI, std::f64::consts::PI);
            s.distortion_x = rng.range_f64(0.0, 1.0);
            s.distortion_y = rng.range_f64(0.0, 1.0);
            s.seed_x = rng.range_f64(-0.3, 0.3);
            s.seed_y = rng.range_f64(-0.3, 0.3);
        } else {
            s.bypass = true;
        }

        self.frame_counter += 1;
        self.last = s;
        s
    }
}

fn rng_unit(rng: &mut SplitMix64) -> f32 {
    rng.next_f64() as f32
}

fn glitch_uv(mut p: Point, s: &GlitchState, disp: &LinearFrame) -> Point {
    let n = disp.sample(Point::new(p.x * s.seed * s.seed, p.y * s.seed * s.seed));

    if p.y < s.distortion_x + BAND_WIDTH && p.y > s.distortion_x - BAND_WIDTH * s.seed {
        p.y = if s.seed_x > 0.0 {
            1.0 - (p.y + s.distortion_y)
        } else {
            s.distortion_y
        };
    }
    if p.x < s.distortion_y + BAND_WIDTH && p.x > s.distortion_y - BAND_WIDTH * s.seed {
        p.x = if s.seed_y > 0.0 {
            s.distortion_x
        } else {
            1.0 - (p.x + s.distortion_x)
        };
    }

    p.x += f64::from(n.r) * s.seed_x * (s.seed / 5.0);
    p.y += f64::from(n.g) * s.seed_y * (s.seed / 5.0);
    p
}

impl Pass for GlitchPass {
    fn id(&self) -> &str {
        "glitch"
    }

    fn label(&self) -> &str {
        "GlitchPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::Glitch
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let s = self.advance();
        if s.bypass {
            output.copy_from(input);
            return;
        }

        let offset = Vec2::new(s.angle.cos(), s.angle.sin()) * s.amount;
        let h = input.height();
        let disp = &self.displacement;
        shade_pixels(output, |x, y, uv| {
            let p = glitch_uv(uv, &s, disp);
            let c = split_channels(input, p, offset);

            // Window coordinates, origin bottom-left.
            let xs = ((f64::from(x) + 0.5) / 0.5).floor();
            let ys = ((f64::from(h - 1 - y) + 0.5) / 0.5).floor();
            let snow = (200.0 * s.amount * hash2(xs * s.seed, ys * s.seed * 50.0) * 0.2) as f32;
            Rgba::new(c.r + snow, c.g + snow, c.b + snow, c.a + snow)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glitch.rs"]
mod tests;
