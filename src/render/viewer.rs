use crossbeam_channel::Receiver;

use crate::{
    control::{ChainEvent, ControlHandle, control_channel},
    effects::pass::FrameContext,
    foundation::{core::SurfaceSize, error::ChainResult},
    render::{chain::PassChain, clock::FrameClock, frame::FrameRGBA, surface::Surface},
};

/// Frame loop driver: drains control events, advances the clock, runs the chain and presents.
pub struct Viewer {
    chain: PassChain,
    clock: FrameClock,
    surface: Box<dyn Surface>,
    handle: ControlHandle,
    events: Receiver<ChainEvent>,
    presented: u64,
}

impl Viewer {
    pub fn new(chain: PassChain, clock: FrameClock, surface: Box<dyn Surface>) -> Self {
        let (handle, events) = control_channel();
        Self {
            chain,
            clock,
            surface,
            handle,
            events,
            presented: 0,
        }
    }

    /// A sender for edits and resizes, applied at the start of the next tick.
    pub fn control(&self) -> ControlHandle {
        self.handle.clone()
    }

    pub fn chain(&self) -> &PassChain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut PassChain {
        &mut self.chain
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    /// Resize immediately instead of through the event queue.
    pub fn resize(&mut self, size: SurfaceSize) -> ChainResult<bool> {
        self.chain.resize(size)
    }

    /// Apply every queued event in arrival order. Rejected updates are logged and dropped.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            let result = match event {
                ChainEvent::Update(update) => self.chain.apply(update),
                ChainEvent::Resize(size) => self.chain.resize(size).map(|_| ()),
            };
            match result {
                Ok(()) => applied += 1,
                Err(e) => tracing::warn!(error = %e, "dropping control event"),
            }
        }
        applied
    }

    /// Produce and present one frame.
    #[tracing::instrument(skip(self))]
    pub fn tick(&mut self) -> ChainResult<FrameRGBA> {
        self.drain_events();
        let (elapsed, frame) = self.clock.tick();
        self.chain.update_time(elapsed);
        let ctx = FrameContext { elapsed, frame };
        let out = self.chain.render(&ctx).to_rgba8();
        self.surface.present(frame, &out)?;
        self.presented += 1;
        Ok(out)
    }

    /// Tick `count` times, stopping at the first presentation error.
    pub fn run(&mut self, count: u64) -> ChainResult<()> {
        for _ in 0..count {
            self.tick()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewer.rs"]
mod tests;
