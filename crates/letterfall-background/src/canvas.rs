//! A [`Canvas`] that paints into a ratatui buffer.

use std::collections::HashSet;

use glam::{Affine2, Vec2};
use letterfall_core::{Region, Rgba, Viewport};
use letterfall_sim::{Canvas, StateStack};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::color::{composite, to_color};

/// Fonts below this size are drawn dim.
const SMALL_FONT: f32 = 36.0;

/// Size of one terminal cell in world units.
///
/// This plays the role of the device pixel ratio: it is the base transform
/// from world units to device (cell) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 20.0,
        }
    }
}

impl CellMetrics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The world-space size of `area`.
    pub fn viewport(&self, area: Rect) -> Viewport {
        Viewport::new(
            area.width as f32 * self.width,
            area.height as f32 * self.height,
        )
    }

    /// World-space centre of a cell, relative to `area`.
    pub fn cell_center(&self, area: Rect, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (column.saturating_sub(area.x) as f32 + 0.5) * self.width,
            (row.saturating_sub(area.y) as f32 + 0.5) * self.height,
        )
    }

    /// World-space region covered by `rect`, relative to `area`.
    pub fn region(&self, area: Rect, rect: Rect) -> Region {
        Region::new(
            rect.x.saturating_sub(area.x) as f32 * self.width,
            rect.y.saturating_sub(area.y) as f32 * self.height,
            rect.width as f32 * self.width,
            rect.height as f32 * self.height,
        )
    }

    pub fn base_transform(&self) -> Affine2 {
        Affine2::from_scale(Vec2::new(1.0 / self.width, 1.0 / self.height))
    }
}

/// Paints text and rectangles into the cells of `area`.
///
/// Text lands in the cell containing its transformed anchor. Colours are
/// composited over the paper colour. Shadows never overwrite a glyph painted
/// earlier in the same frame.
pub struct TerminalCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cells: CellMetrics,
    paper: (u8, u8, u8),
    state: StateStack,
    inked: HashSet<(u16, u16)>,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, cells: CellMetrics, paper: Rgba) -> Self {
        Self {
            buf,
            area,
            cells,
            paper: (paper.r, paper.g, paper.b),
            state: StateStack::new(cells.base_transform()),
            inked: HashSet::new(),
        }
    }

    /// Fill the whole area with blank paper.
    pub fn clear(&mut self) {
        let style = Style::new().bg(to_color(self.paper));
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_style(style);
                }
            }
        }
        self.inked.clear();
    }

    /// Map device (cell) coordinates to a buffer position inside the area.
    fn cell_at(&self, device: Vec2) -> Option<(u16, u16)> {
        let column = device.x.floor();
        let row = device.y.floor();
        if column < 0.0
            || row < 0.0
            || column >= self.area.width as f32
            || row >= self.area.height as f32
        {
            return None;
        }
        Some((self.area.x + column as u16, self.area.y + row as u16))
    }

    fn paint_char(&mut self, position: (u16, u16), ch: char, ink: Rgba, modifier: Modifier) {
        let style = Style::new()
            .fg(composite(ink, self.paper))
            .bg(to_color(self.paper))
            .add_modifier(modifier);
        if let Some(cell) = self.buf.cell_mut(position) {
            cell.reset();
            cell.set_char(ch);
            cell.set_style(style);
        }
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn fill_text(&mut self, text: &str, at: Vec2) {
        let current = self.state.current;
        let anchor = current.transform.transform_point2(at);
        let count = text.chars().count();
        let first = anchor.x - (count as f32 - 1.0) / 2.0;

        let mut modifier = Modifier::empty();
        if current.font.bold {
            modifier |= Modifier::BOLD;
        }
        if current.font.size < SMALL_FONT {
            modifier |= Modifier::DIM;
        }

        for (i, ch) in text.chars().enumerate() {
            let device = Vec2::new(first + i as f32, anchor.y);

            if let Some(shadow) = current.shadow.filter(|s| !s.color.is_transparent()) {
                let drop = Vec2::new(
                    shadow.offset.x / self.cells.width,
                    (shadow.offset.y + shadow.blur) / self.cells.height,
                );
                if let Some(position) = self.cell_at(device + drop)
                    && !self.inked.contains(&position)
                {
                    self.paint_char(position, ch, shadow.color, Modifier::empty());
                }
            }

            if let Some(position) = self.cell_at(device) {
                self.paint_char(position, ch, current.fill, modifier);
                self.inked.insert(position);
            }
        }
    }

    fn fill_rect(&mut self, center: Vec2, size: Vec2) {
        let current = self.state.current;
        if current.fill.is_transparent() {
            return;
        }
        let half = size / 2.0;
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| current.transform.transform_point2(center + corner));
        let min = corners.iter().fold(Vec2::INFINITY, |acc, c| acc.min(*c));
        let max = corners.iter().fold(Vec2::NEG_INFINITY, |acc, c| acc.max(*c));

        let x0 = min.x.floor().max(0.0) as u16;
        let y0 = min.y.floor().max(0.0) as u16;
        let x1 = max.x.ceil().min(self.area.width as f32).max(0.0) as u16;
        let y1 = max.y.ceil().min(self.area.height as f32).max(0.0) as u16;
        let bg = composite(current.fill, self.paper);

        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(cell) = self.buf.cell_mut((self.area.x + x, self.area.y + y)) {
                    cell.set_bg(bg);
                }
            }
        }
    }
}
