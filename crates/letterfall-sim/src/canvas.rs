//! 2D drawing surface abstraction.

use glam::{Affine2, Vec2};
use letterfall_core::Rgba;

/// Text font. Size is in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 16.0,
            bold: false,
        }
    }
}

/// Drop shadow applied to subsequent fills. Offset and blur are in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f32,
    pub offset: Vec2,
}

/// Everything `save`/`restore` snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub transform: Affine2,
    pub fill: Rgba,
    pub font: Font,
    pub shadow: Option<Shadow>,
}

impl DrawState {
    pub fn new(transform: Affine2) -> Self {
        Self {
            transform,
            fill: Rgba::opaque(0, 0, 0),
            font: Font::default(),
            shadow: None,
        }
    }
}

/// The current draw state plus the saved ones.
#[derive(Debug, Clone)]
pub struct StateStack {
    pub current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn new(base: Affine2) -> Self {
        Self {
            current: DrawState::new(base),
            saved: Vec::new(),
        }
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state. An unbalanced restore is ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// A drawing context with a canvas-like transform model.
pub trait Canvas {
    fn state(&self) -> &StateStack;

    fn state_mut(&mut self) -> &mut StateStack;

    /// Draw `text` centred on `at`, in the current transform.
    fn fill_text(&mut self, text: &str, at: Vec2);

    /// Fill an axis-aligned (in local space) rectangle centred on `center`.
    fn fill_rect(&mut self, center: Vec2, size: Vec2);

    fn save(&mut self) {
        self.state_mut().save();
    }

    fn restore(&mut self) {
        self.state_mut().restore();
    }

    fn transform(&self) -> Affine2 {
        self.state().current.transform
    }

    fn set_transform(&mut self, transform: Affine2) {
        self.state_mut().current.transform = transform;
    }

    fn translate(&mut self, offset: Vec2) {
        let transform = self.transform() * Affine2::from_translation(offset);
        self.set_transform(transform);
    }

    /// Rotate by `angle` radians (clockwise on screen, since +y is down).
    fn rotate(&mut self, angle: f32) {
        let transform = self.transform() * Affine2::from_angle(angle);
        self.set_transform(transform);
    }

    fn set_fill(&mut self, color: Rgba) {
        self.state_mut().current.fill = color;
    }

    fn set_font(&mut self, font: Font) {
        self.state_mut().current.font = font;
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.state_mut().current.shadow = shadow;
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        text: String,
        /// Anchor in device space.
        device: Vec2,
        state: DrawState,
    },
    Rect {
        /// Centre in device space.
        device: Vec2,
        size: Vec2,
        state: DrawState,
    },
}

/// A headless canvas that records every draw call.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    state: StateStack,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(base: Affine2) -> Self {
        Self {
            state: StateStack::new(base),
            commands: Vec::new(),
        }
    }

    /// Text of every `fill_text` call, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Rect { .. } => None,
            })
            .collect()
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new(Affine2::IDENTITY)
    }
}

impl Canvas for RecordingCanvas {
    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn fill_text(&mut self, text: &str, at: Vec2) {
        let state = self.state.current;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            device: state.transform.transform_point2(at),
            state,
        });
    }

    fn fill_rect(&mut self, center: Vec2, size: Vec2) {
        let state = self.state.current;
        self.commands.push(DrawCommand::Rect {
            device: state.transform.transform_point2(center),
            size,
            state,
        });
    }
}
