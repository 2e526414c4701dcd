//! Falling-glyph background for the terminal.
//!
//! Glyphs are spawned above the viewport, fall under simulated gravity and
//! pile up on the viewport edges and on the foreground content. The crate
//! wires the body factory, boundary and spawn management, pointer dragging
//! and the glyph overlay into a [`Scene`] that renders into a ratatui buffer.

mod bounds;
mod canvas;
mod color;
mod factory;
mod interaction;
mod overlay;
mod reporter;
mod spawner;
mod state;

pub use bounds::{BoundsManager, content_blockers, edge_walls};
pub use canvas::{CellMetrics, TerminalCanvas};
pub use color::{PAPER, composite, contrast_ink, to_color};
pub use factory::{BodyFactory, GlyphSpawn};
pub use interaction::{InteractionAdapter, PointerEvent, PointerKind};
pub use overlay::RenderOverlay;
pub use reporter::FrameReporter;
pub use spawner::{SpawnController, TickOutcome};
pub use state::{Scene, SceneOptions};
