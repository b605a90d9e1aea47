use std::time::Instant;

use crate::foundation::error::{ChainError, ChainResult};

/// Source of "seconds since start" readings.
pub trait TimeSource: Send {
    fn now_secs(&mut self) -> f64;
}

/// Wall clock. Starts on the first reading, so the first frame sees `0.0`.
#[derive(Debug, Default)]
pub struct WallClock {
    start: Option<Instant>,
}

impl TimeSource for WallClock {
    fn now_secs(&mut self) -> f64 {
        self.start.get_or_insert_with(Instant::now).elapsed().as_secs_f64()
    }
}

/// Deterministic clock advancing by `1 / fps` per reading. Used for offline rendering and tests.
#[derive(Debug)]
pub struct FixedStep {
    fps: f64,
    frames: u64,
}

impl FixedStep {
    pub fn new(fps: f64) -> ChainResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ChainError::validation(format!(
                "fps must be finite and > 0, got {fps}"
            )));
        }
        Ok(Self { fps, frames: 0 })
    }

    /// Start at frame `index` instead of 0.
    pub fn starting_at(mut self, index: u64) -> Self {
        self.frames = index;
        self
    }
}

impl TimeSource for FixedStep {
    fn now_secs(&mut self) -> f64 {
        let t = self.frames as f64 / self.fps;
        self.frames += 1;
        t
    }
}

/// Per-frame elapsed time. Readings never go backwards even if the source does.
pub struct FrameClock {
    source: Box<dyn TimeSource>,
    last: f64,
    frame: u64,
}

impl FrameClock {
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        Self {
            source,
            last: 0.0,
            frame: 0,
        }
    }

    pub fn wall() -> Self {
        Self::new(Box::<WallClock>::default())
    }

    pub fn fixed(fps: f64) -> ChainResult<Self> {
        Ok(Self::new(Box::new(FixedStep::new(fps)?)))
    }

    /// Number the next tick `index` instead of 0. The time source is left untouched.
    pub fn starting_at(mut self, index: u64) -> Self {
        self.frame = index;
        self
    }

    /// Take the reading for the next frame: `(elapsed seconds, frame index)`.
    pub fn tick(&mut self) -> (f64, u64) {
        let now = self.source.now_secs();
        if now.is_finite() && now > self.last {
            self.last = now;
        }
        let frame = self.frame;
        self.frame += 1;
        (self.last, frame)
    }

    pub fn elapsed(&self) -> f64 {
        self.last
    }

    /// Index the next tick will report.
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/clock.rs"]
mod tests;
