//! Fixed tuning presets.
//!
//! Two variants of the falling-letter background exist: a playful one where
//! letters can be dragged around, and a diagnostic one that reports body count
//! and frame rate. Their constants are fixed; only the choice of preset is
//! configurable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{HEBREW_LATIN_DIGITS, HEBREW_WITH_FINAL_MEM, Rgba};

/// A half-open interval `[lo, hi)` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lo: f32,
    pub hi: f32,
}

impl Band {
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    /// Map a unit sample `t` in `[0, 1)` onto the band.
    pub fn lerp(&self, t: f32) -> f32 {
        self.lo + t * (self.hi - self.lo)
    }

    /// Inclusive containment check, tolerant of the closed upper end.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// Background preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Hebrew + Latin + digits, 90 letters, pointer drag enabled.
    #[default]
    Playground,
    /// Hebrew only, 80 letters, body count and fps status line.
    Diagnostic,
}

impl Preset {
    /// Cycle to the next preset.
    pub fn next(self) -> Self {
        match self {
            Preset::Playground => Preset::Diagnostic,
            Preset::Diagnostic => Preset::Playground,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Playground => "playground",
            Preset::Diagnostic => "diagnostic",
        }
    }

    /// The fixed tuning for this preset.
    pub fn params(self) -> &'static PresetParams {
        match self {
            Preset::Playground => &PLAYGROUND,
            Preset::Diagnostic => &DIAGNOSTIC,
        }
    }
}

/// Every constant that shapes the animation.
///
/// Velocities and air friction are in engine "per step" units; multiply by
/// [`crate::STEP_RATE`] for per-second values.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetParams {
    /// Glyphs a letter may be drawn from.
    pub alphabet: &'static [char],
    /// Live glyph population cap.
    pub spawn_cap: usize,
    /// Period of the spawn controller.
    pub spawn_period: Duration,
    /// Visual font size in world units.
    pub font_size: Band,
    /// Physics box size as a multiple of the font size.
    pub box_scale: Band,
    /// Horizontal distance kept from each viewport edge when spawning.
    pub spawn_margin_x: f32,
    /// Spawn height, above the visible area.
    pub spawn_y: f32,
    /// Glyphs this far below the viewport bottom are evicted.
    pub eviction_margin: f32,
    pub restitution: Band,
    pub friction: f32,
    pub air_friction: f32,
    pub density: f32,
    /// Corner radius of the glyph collision box.
    pub chamfer_radius: f32,
    /// Initial horizontal drift per step.
    pub velocity_x: Band,
    /// Initial fall speed per step.
    pub velocity_y: Band,
    /// Initial tumble per step, in radians.
    pub angular_velocity: Band,
    /// Gravity in engine units (scaled by 0.001 per ms²).
    pub gravity: f32,
    /// Thickness of the edge walls, which extends outward from the viewport.
    pub wall_thickness: f32,
    /// Padding added around each foreground region.
    pub blocker_padding: f32,
    /// Delay before content blockers are rebuilt after a resize.
    pub resize_blocker_delay: Duration,
    /// Delay before content blockers are rebuilt after startup.
    pub load_blocker_delay: Duration,
    /// Main ink, chosen with `ink_primary_chance`.
    pub ink_primary: Rgba,
    pub ink_secondary: Rgba,
    pub ink_primary_chance: f32,
    /// Glyph drop shadow.
    pub shadow_color: Rgba,
    pub shadow_blur: f32,
    pub shadow_offset: (f32, f32),
    /// Vertical offset of the glyph inside its box.
    pub text_offset_y: f32,
    /// Pointer drag spring stiffness, `None` when dragging is disabled.
    pub drag_stiffness: Option<f32>,
    /// Status report interval, `None` when the reporter is disabled.
    pub report_interval: Option<Duration>,
}

const INK: (u8, u8, u8) = (31, 29, 23);

pub const PLAYGROUND: PresetParams = PresetParams {
    alphabet: HEBREW_LATIN_DIGITS,
    spawn_cap: 90,
    spawn_period: Duration::from_millis(380),
    font_size: Band::new(28.0, 64.0),
    box_scale: Band::new(0.85, 1.15),
    spawn_margin_x: 40.0,
    spawn_y: -80.0,
    eviction_margin: 400.0,
    restitution: Band::new(0.45, 0.85),
    friction: 0.25,
    air_friction: 0.015,
    density: 0.0025,
    chamfer_radius: 10.0,
    velocity_x: Band::new(-2.4, 2.4),
    velocity_y: Band::new(0.2, 1.2),
    angular_velocity: Band::new(-0.08, 0.08),
    gravity: 1.05,
    wall_thickness: 80.0,
    blocker_padding: 10.0,
    resize_blocker_delay: Duration::from_millis(50),
    load_blocker_delay: Duration::from_millis(100),
    ink_primary: Rgba::new(INK.0, INK.1, INK.2, 0.38),
    ink_secondary: Rgba::new(INK.0, INK.1, INK.2, 0.22),
    ink_primary_chance: 0.85,
    shadow_color: Rgba::new(INK.0, INK.1, INK.2, 0.10),
    shadow_blur: 10.0,
    shadow_offset: (0.0, 6.0),
    text_offset_y: 2.0,
    drag_stiffness: Some(0.12),
    report_interval: None,
};

pub const DIAGNOSTIC: PresetParams = PresetParams {
    alphabet: HEBREW_WITH_FINAL_MEM,
    spawn_cap: 80,
    font_size: Band::new(26.0, 64.0),
    box_scale: Band::new(0.85, 1.2),
    eviction_margin: 500.0,
    drag_stiffness: None,
    report_interval: Some(Duration::from_millis(800)),
    ..PLAYGROUND
};
