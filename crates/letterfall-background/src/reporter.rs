//! Frame rate and body count status.

use std::time::{Duration, Instant};

use letterfall_sim::{Canvas, FrameInfo, RenderHook, Simulation};

/// Counts frames and periodically summarises fps and live glyphs.
#[derive(Debug, Clone)]
pub struct FrameReporter {
    interval: Duration,
    frames: u32,
    window_start: Option<Instant>,
    status: Option<String>,
}

impl FrameReporter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frames: 0,
            window_start: None,
            status: None,
        }
    }

    /// Count one frame at `now`; report when the interval has elapsed.
    pub fn record(&mut self, now: Instant, glyphs: usize) {
        self.frames += 1;
        let start = *self.window_start.get_or_insert(now);
        let elapsed = now.duration_since(start);
        if elapsed < self.interval {
            return;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.status = Some(format!("bodies: {glyphs} · fps: {fps:.0}"));
        self.frames = 0;
        self.window_start = Some(now);
    }
}

impl RenderHook for FrameReporter {
    fn after_render(&mut self, sim: &Simulation, _canvas: &mut dyn Canvas, frame: &FrameInfo) {
        self.record(frame.now, sim.glyph_count());
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
