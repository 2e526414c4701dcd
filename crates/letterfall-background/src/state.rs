//! The falling-glyph scene and its per-frame driver.

use std::time::Instant;

use letterfall_core::{Preset, PresetParams, Region, Rgba};
use letterfall_sim::{FrameInfo, Renderer, Simulation};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    bounds::BoundsManager,
    canvas::{CellMetrics, TerminalCanvas},
    color::PAPER,
    interaction::{InteractionAdapter, PointerEvent},
    overlay::RenderOverlay,
    reporter::FrameReporter,
    spawner::SpawnController,
};

/// Presentation settings that do not affect the physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub paper: Rgba,
    pub show_bounds: bool,
    pub cells: CellMetrics,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            paper: PAPER,
            show_bounds: false,
            cells: CellMetrics::default(),
        }
    }
}

/// Everything that makes up one running background.
#[derive(Debug)]
pub struct Scene {
    preset: Preset,
    params: &'static PresetParams,
    sim: Simulation,
    bounds: BoundsManager,
    spawner: SpawnController,
    renderer: Renderer,
    input: Option<InteractionAdapter>,
    options: SceneOptions,
    rng: StdRng,
    /// Area of the last update, `None` before the first frame.
    area: Option<Rect>,
    /// Content regions reported by the last update, in world units.
    regions: Vec<Region>,
}

impl Scene {
    /// Create a scene seeded from OS entropy.
    pub fn new(preset: Preset, options: SceneOptions) -> Self {
        Self::with_rng(preset, options, StdRng::from_os_rng())
    }

    /// Create a scene with a deterministic seed.
    pub fn with_seed(preset: Preset, options: SceneOptions, seed: u64) -> Self {
        Self::with_rng(preset, options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(preset: Preset, options: SceneOptions, rng: StdRng) -> Self {
        let params = preset.params();

        let mut renderer = Renderer::new();
        renderer.on_after_render(RenderOverlay::new(params));
        if let Some(interval) = params.report_interval {
            renderer.on_after_render(FrameReporter::new(interval));
        }

        log::info!("starting {} scene", preset.name());
        Self {
            preset,
            params,
            sim: Simulation::new(params.gravity),
            bounds: BoundsManager::new(params).with_visible_bounds(options.show_bounds),
            spawner: SpawnController::new(params),
            renderer,
            input: params.drag_stiffness.map(InteractionAdapter::new),
            options,
            rng,
            area: None,
            regions: Vec::new(),
        }
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn bounds(&self) -> &BoundsManager {
        &self.bounds
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// Whether pointer dragging is enabled for this preset.
    pub fn is_interactive(&self) -> bool {
        self.input.is_some()
    }

    /// Advance the scene by one frame.
    ///
    /// `content` holds the rects of the foreground cards glyphs should pile
    /// on. Geometry follows the area: walls are rebuilt immediately on resize
    /// and blockers a short while after.
    pub fn update(&mut self, area: Rect, content: &[Rect], now: Instant) {
        let cells = self.options.cells;
        let viewport = cells.viewport(area);
        let regions: Vec<Region> = content.iter().map(|r| cells.region(area, *r)).collect();

        match self.area {
            None => {
                self.bounds.rebuild_edge_walls(&mut self.sim, viewport);
                self.bounds.rebuild_content_blockers(&mut self.sim, &regions);
                // Layout may still settle after the first frame.
                self.bounds.schedule_blockers(now + self.params.load_blocker_delay);
            }
            Some(last) if (last.width, last.height) != (area.width, area.height) => {
                self.bounds.rebuild_edge_walls(&mut self.sim, viewport);
                self.bounds
                    .schedule_blockers(now + self.params.resize_blocker_delay);
            }
            Some(_) => {
                if regions != self.regions {
                    self.bounds
                        .schedule_blockers(now + self.params.resize_blocker_delay);
                }
            }
        }
        self.area = Some(area);
        self.regions = regions;

        self.bounds.poll(now, &mut self.sim, &self.regions);
        self.spawner
            .poll(now, &mut self.sim, &mut self.rng, viewport);
        if let Some(input) = &mut self.input {
            input.apply(&mut self.sim);
        }
        self.sim.step();
    }

    /// Paint paper, bodies and glyphs into `area` of `buf`.
    pub fn render(&mut self, buf: &mut Buffer, area: Rect, now: Instant) {
        let mut canvas = TerminalCanvas::new(buf, area, self.options.cells, self.options.paper);
        canvas.clear();
        let frame = FrameInfo {
            now,
            viewport: self.options.cells.viewport(area),
        };
        self.renderer.render(&self.sim, &mut canvas, &frame);
    }

    /// Forward a mouse event to the drag constraint, if this preset has one.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let (Some(input), Some(area)) = (&mut self.input, self.area) else {
            return;
        };
        input.handle(&self.sim, self.options.cells, area, event);
    }

    /// Remove every glyph, keeping walls and blockers.
    pub fn clear_glyphs(&mut self) -> usize {
        let removed = self.sim.clear_glyphs();
        log::info!("cleared {removed} glyphs");
        removed
    }

    /// Status strings from the render hooks.
    pub fn status_lines(&self) -> Vec<&str> {
        self.renderer.status_lines()
    }
}
