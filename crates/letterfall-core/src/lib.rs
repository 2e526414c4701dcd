//! Core types shared by the letterfall crates.
//!
//! World coordinates are "visual units" (one unit is one CSS-like pixel),
//! with the origin at the top-left corner of the viewport and +y pointing down.

mod alphabet;
mod preset;

use glam::Vec2;

pub use alphabet::{HEBREW_LATIN_DIGITS, HEBREW_WITH_FINAL_MEM};
pub use preset::{Band, Preset, PresetParams};

/// Simulation steps per second. Per-step tuning values are converted with it.
pub const STEP_RATE: f32 = 60.0;

/// Size of the visible area in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in viewport coordinates, shaped like a layout rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Grow the region by `pad` on every side.
    pub fn inflate(&self, pad: f32) -> Self {
        Self::new(
            self.left - pad,
            self.top - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }
}

/// A colour with straight (non-premultiplied) alpha in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Composite this colour over an opaque backdrop, returning the resulting RGB.
    pub fn over(&self, backdrop: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * a + bg as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
        };
        (
            mix(self.r, backdrop.0),
            mix(self.g, backdrop.1),
            mix(self.b, backdrop.2),
        )
    }

    /// Parse `#rrggbb` (the leading `#` is optional) into an opaque colour.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?))
    }
}
