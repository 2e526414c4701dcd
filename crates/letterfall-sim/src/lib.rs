//! Rigid-body simulation for the letterfall background.
//!
//! Wraps a `rapier2d` world behind an owned [`Simulation`] whose entities are
//! either glyphs or static boundaries, and provides the drawing side: a
//! [`Canvas`] abstraction and a [`Renderer`] that runs after-render hooks.

mod canvas;
mod drag;
mod entity;
mod render;
mod world;

pub use canvas::{Canvas, DrawCommand, DrawState, Font, RecordingCanvas, Shadow, StateStack};
pub use drag::DragConstraint;
pub use entity::{
    Appearance, BoundaryBody, BoundaryKind, Entity, EntityId, EntityView, GlyphEntity,
};
pub use render::{FrameInfo, RenderHook, Renderer};
pub use world::{Simulation, damping_per_second, gravity_per_second};
