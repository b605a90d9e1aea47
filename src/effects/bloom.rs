use crate::{
    effects::{
        blur::{blur_frame, kernel_weights},
        params::{ParamRange, ParamSet, ParamSpec},
        pass::{FrameContext, Pass, PassKind, shade_pixels},
    },
    foundation::{
        core::Rgba,
        math::{mix, smoothstep},
    },
    render::frame::LinearFrame,
};

const MIP_COUNT: usize = 5;
const KERNEL_RADII: [u32; MIP_COUNT] = [3, 5, 7, 9, 11];
const BLOOM_FACTORS: [f32; MIP_COUNT] = [1.0, 0.8, 0.6, 0.4, 0.2];
const SMOOTH_WIDTH: f32 = 0.01;

/// Weight of one mip level: `radius` blends the factor toward its mirror `1.2 - f`.
pub fn mip_weight(factor: f32, radius: f32) -> f32 {
    mix(factor, 1.2 - factor, radius)
}

/// Keep pixels whose luma is above `threshold` (with a soft knee), black elsewhere.
pub fn high_pass(c: Rgba, threshold: f32) -> Rgba {
    let alpha = smoothstep(threshold, threshold + SMOOTH_WIDTH, c.luma());
    Rgba::TRANSPARENT.lerp(c, alpha)
}

struct Mip {
    blurred: LinearFrame,
    scratch: LinearFrame,
    resampled: LinearFrame,
}

/// Multi-scale glow: high-pass at half resolution, a Gaussian blur per mip, weighted sum added
/// back onto the input.
pub struct BloomPass {
    params: ParamSet,
    kernels: Vec<Vec<f32>>,
    bright: LinearFrame,
    mips: Vec<Mip>,
}

impl BloomPass {
    pub fn new() -> Self {
        let unit = Some(ParamRange::new(0.0, 1.0, 0.001));
        let two = Some(ParamRange::new(0.0, 2.0, 0.001));
        Self {
            params: ParamSet::new(vec![
                ParamSpec::float("strength", 0.3, two),
                ParamSpec::float("radius", 1.0, two),
                ParamSpec::float("threshold", 0.6, unit),
            ]),
            kernels: KERNEL_RADII
                .iter()
                .map(|&r| kernel_weights(r, r as f32))
                .collect(),
            bright: LinearFrame::new(0, 0),
            mips: Vec::new(),
        }
    }

    pub fn mip_sizes(width: u32, height: u32) -> Vec<(u32, u32)> {
        let mut w = width.div_ceil(2).max(1);
        let mut h = height.div_ceil(2).max(1);
        let mut sizes = Vec::with_capacity(MIP_COUNT);
        for _ in 0..MIP_COUNT {
            sizes.push((w, h));
            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }
        sizes
    }
}

impl Default for BloomPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for BloomPass {
    fn id(&self) -> &str {
        "bloom"
    }

    fn label(&self) -> &str {
        "UnrealBloomPass"
    }

    fn kind(&self) -> PassKind {
        PassKind::Bloom
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    fn resize(&mut self, width: u32, height: u32) {
        let sizes = Self::mip_sizes(width, height);
        let (bw, bh) = sizes[0];
        self.bright.resize(bw, bh);
        self.mips = sizes
            .into_iter()
            .map(|(w, h)| Mip {
                blurred: LinearFrame::new(w, h),
                scratch: LinearFrame::new(w, h),
                resampled: LinearFrame::new(w, h),
            })
            .collect();
    }

    fn render(&mut self, _ctx: &FrameContext, input: &LinearFrame, output: &mut LinearFrame) {
        let (w, h) = input.dimensions();
        if self.mips.is_empty() || self.bright.dimensions() != Self::mip_sizes(w, h)[0] {
            self.resize(w, h);
        }

        let strength = self.params.float("strength") as f32;
        let radius = self.params.float("radius") as f32;
        let threshold = self.params.float("threshold") as f32;

        shade_pixels(&mut self.bright, |_, _, uv| {
            high_pass(input.sample(uv), threshold)
        });

        for i in 0..self.mips.len() {
            let (done, rest) = self.mips.split_at_mut(i);
            let mip = &mut rest[0];
            let source = match done.last() {
                Some(prev) => &prev.blurred,
                None => &self.bright,
            };
            shade_pixels(&mut mip.resampled, |_, _, uv| source.sample(uv));
            blur_frame(
                &mip.resampled,
                &mut mip.scratch,
                &mut mip.blurred,
                &self.kernels[i],
            );
        }

        let weights: Vec<f32> = BLOOM_FACTORS
            .iter()
            .map(|&f| mip_weight(f, radius) * strength)
            .collect();
        let mips = &self.mips;
        shade_pixels(output, |x, y, uv| {
            let mut glow = Rgba::TRANSPARENT;
            for (mip, &wt) in mips.iter().zip(&weights) {
                glow = glow + mip.blurred.sample(uv) * wt;
            }
            input.get(x, y).add_rgb(glow.rgb())
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/bloom.rs"]
mod tests;
