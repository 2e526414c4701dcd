//! Mouse input mapped onto the drag constraint.

use letterfall_sim::{DragConstraint, EntityId, Simulation};
use ratatui::layout::Rect;

use crate::canvas::CellMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Drag,
    Up,
}

/// A pointer event in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, column: u16, row: u16) -> Self {
        Self { kind, column, row }
    }
}

/// Lets the user grab and fling bodies with the mouse.
#[derive(Debug, Clone)]
pub struct InteractionAdapter {
    drag: DragConstraint,
}

impl InteractionAdapter {
    pub fn new(stiffness: f32) -> Self {
        Self {
            drag: DragConstraint::new(stiffness),
        }
    }

    /// Feed one pointer event. Returns the body grabbed by a press, if any.
    pub fn handle(
        &mut self,
        sim: &Simulation,
        cells: CellMetrics,
        area: Rect,
        event: PointerEvent,
    ) -> Option<EntityId> {
        let point = cells.cell_center(area, event.column, event.row);
        match event.kind {
            PointerKind::Down => {
                let grabbed = self.drag.press(sim, point);
                if let Some(id) = grabbed {
                    log::debug!("grabbed {id:?} at ({:.0}, {:.0})", point.x, point.y);
                }
                grabbed
            }
            PointerKind::Drag => {
                self.drag.move_to(point);
                None
            }
            PointerKind::Up => {
                self.drag.release();
                None
            }
        }
    }

    pub fn grabbed(&self) -> Option<EntityId> {
        self.drag.grabbed()
    }

    /// Pull the grabbed body toward the pointer. Call before each step.
    pub fn apply(&mut self, sim: &mut Simulation) {
        self.drag.apply(sim);
    }
}
