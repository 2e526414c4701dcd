//! Pointer-driven spring constraint.

use glam::Vec2;
use letterfall_core::STEP_RATE;

use crate::{EntityId, Simulation};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    id: EntityId,
    /// Grab point in the body's local frame.
    local: Vec2,
}

/// Pulls a grabbed body toward the pointer.
///
/// Each step the grab point closes `stiffness` of its distance to the
/// pointer, so a low stiffness feels elastic.
#[derive(Debug, Clone)]
pub struct DragConstraint {
    stiffness: f32,
    pointer: Vec2,
    grab: Option<Grab>,
}

impl DragConstraint {
    pub fn new(stiffness: f32) -> Self {
        Self {
            stiffness,
            pointer: Vec2::ZERO,
            grab: None,
        }
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    /// Grab whatever body is under `point`. Returns the grabbed entity.
    pub fn press(&mut self, sim: &Simulation, point: Vec2) -> Option<EntityId> {
        self.pointer = point;
        let id = sim.entity_at(point)?;
        let view = sim.get(id)?;
        let local = Vec2::from_angle(-view.angle).rotate(point - view.position);
        self.grab = Some(Grab { id, local });
        Some(id)
    }

    pub fn move_to(&mut self, point: Vec2) {
        self.pointer = point;
    }

    pub fn release(&mut self) {
        self.grab = None;
    }

    pub fn grabbed(&self) -> Option<EntityId> {
        self.grab.map(|grab| grab.id)
    }

    /// Apply the spring to the grabbed body. Call before each step.
    pub fn apply(&mut self, sim: &mut Simulation) {
        let Some(grab) = self.grab else {
            return;
        };
        let Some(view) = sim.get(grab.id) else {
            self.grab = None;
            return;
        };
        if view.entity.is_static() {
            return;
        }
        let anchor = view.position + Vec2::from_angle(view.angle).rotate(grab.local);
        let velocity = (self.pointer - anchor) * self.stiffness * STEP_RATE;
        sim.set_velocity(grab.id, velocity);
    }
}

#[cfg(test)]
mod tests {
    use letterfall_core::Rgba;

    use super::*;
    use crate::{BoundaryBody, BoundaryKind, GlyphEntity};

    fn glyph() -> GlyphEntity {
        GlyphEntity {
            glyph: 'ק',
            font_size: 40.0,
            size: 40.0,
            ink: Rgba::new(31, 29, 23, 0.38),
            restitution: 0.5,
            friction: 0.25,
            air_friction: 0.015,
            density: 0.0025,
            chamfer_radius: 10.0,
        }
    }

    #[test]
    fn test_drag_pulls_glyph_toward_pointer() {
        let mut sim = Simulation::new(0.0);
        let id = sim.insert_glyph(glyph(), Vec2::new(100.0, 100.0), Vec2::ZERO, 0.0);
        let mut drag = DragConstraint::new(0.12);
        assert_eq!(drag.press(&sim, Vec2::new(100.0, 100.0)), Some(id));

        drag.move_to(Vec2::new(300.0, 100.0));
        for _ in 0..60 {
            drag.apply(&mut sim);
            sim.step();
        }
        let x = sim.get(id).unwrap().position.x;
        assert!(x > 250.0 && x < 310.0, "x = {x}");
    }

    #[test]
    fn test_press_on_empty_space_grabs_nothing() {
        let sim = Simulation::new(1.05);
        let mut drag = DragConstraint::new(0.12);
        assert_eq!(drag.press(&sim, Vec2::new(5.0, 5.0)), None);
        assert_eq!(drag.grabbed(), None);
    }

    #[test]
    fn test_boundaries_can_be_grabbed_but_do_not_move() {
        let mut sim = Simulation::new(1.05);
        let wall = sim.insert_boundary(BoundaryBody::new(
            BoundaryKind::Blocker,
            Vec2::new(50.0, 50.0),
            40.0,
            40.0,
        ));
        let mut drag = DragConstraint::new(0.12);
        assert_eq!(drag.press(&sim, Vec2::new(50.0, 50.0)), Some(wall));
        drag.move_to(Vec2::new(500.0, 500.0));
        drag.apply(&mut sim);
        sim.step();
        assert_eq!(sim.get(wall).unwrap().position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_grab_is_dropped_when_body_disappears() {
        let mut sim = Simulation::new(1.05);
        let id = sim.insert_glyph(glyph(), Vec2::new(10.0, 10.0), Vec2::ZERO, 0.0);
        let mut drag = DragConstraint::new(0.12);
        drag.press(&sim, Vec2::new(10.0, 10.0));
        sim.remove(id);
        drag.apply(&mut sim);
        assert_eq!(drag.grabbed(), None);
    }
}
