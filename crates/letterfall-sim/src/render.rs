//! The engine draw pass and the after-render hook list.

use std::time::Instant;

use letterfall_core::Viewport;

use crate::{Canvas, Simulation};

/// Per-frame context handed to hooks.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub now: Instant,
    pub viewport: Viewport,
}

/// Work performed after the engine has drawn its own bodies.
pub trait RenderHook {
    /// Paint on top of the frame. Must not mutate the simulation.
    fn after_render(&mut self, sim: &Simulation, canvas: &mut dyn Canvas, frame: &FrameInfo);

    /// Short human-readable status, if the hook reports one.
    fn status(&self) -> Option<&str> {
        None
    }
}

/// Draws visible bodies, then runs hooks in registration order.
#[derive(Default)]
pub struct Renderer {
    hooks: Vec<Box<dyn RenderHook>>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook to run after every render.
    pub fn on_after_render(&mut self, hook: impl RenderHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn render(&mut self, sim: &Simulation, canvas: &mut dyn Canvas, frame: &FrameInfo) {
        draw_bodies(sim, canvas);
        for hook in &mut self.hooks {
            hook.after_render(sim, canvas, frame);
        }
    }

    /// Status strings of every hook that reports one.
    pub fn status_lines(&self) -> Vec<&str> {
        self.hooks.iter().filter_map(|hook| hook.status()).collect()
    }
}

/// Fill each visible body's box with its appearance colour.
fn draw_bodies(sim: &Simulation, canvas: &mut dyn Canvas) {
    for view in sim.entities() {
        if !view.appearance.visible || view.appearance.fill.is_transparent() {
            continue;
        }
        canvas.save();
        canvas.translate(view.position);
        canvas.rotate(view.angle);
        canvas.set_fill(view.appearance.fill);
        canvas.fill_rect(glam::Vec2::ZERO, view.entity.extents());
        canvas.restore();
    }
}
