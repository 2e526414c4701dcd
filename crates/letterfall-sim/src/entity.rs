//! Entities owned by the simulation.

use glam::Vec2;
use letterfall_core::Rgba;
use rapier2d::prelude::RigidBodyHandle;

/// Stable identifier of a body in a [`crate::Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub(crate) RigidBodyHandle);

/// One falling character and the fixed parameters it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphEntity {
    /// Character drawn at the body transform.
    pub glyph: char,
    /// Visual font size in world units.
    pub font_size: f32,
    /// Side of the square collision box.
    pub size: f32,
    pub ink: Rgba,
    pub restitution: f32,
    pub friction: f32,
    /// Fraction of velocity lost per step to air drag.
    pub air_friction: f32,
    pub density: f32,
    /// Corner radius of the collision box.
    pub chamfer_radius: f32,
}

/// Which piece of static geometry a boundary body stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    Floor,
    Ceiling,
    LeftWall,
    RightWall,
    /// Rectangle around a foreground content region.
    Blocker,
}

/// Static, invisible collision geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryBody {
    pub kind: BoundaryKind,
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl BoundaryBody {
    pub fn new(kind: BoundaryKind, center: Vec2, width: f32, height: f32) -> Self {
        Self {
            kind,
            center,
            width,
            height,
        }
    }
}

/// Anything that lives in the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Glyph(GlyphEntity),
    Boundary(BoundaryBody),
}

impl Entity {
    /// The glyph payload, if this entity carries one.
    pub fn glyph(&self) -> Option<&GlyphEntity> {
        match self {
            Entity::Glyph(glyph) => Some(glyph),
            Entity::Boundary(_) => None,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Entity::Boundary(_))
    }

    /// Full width and height of the body's box.
    pub fn extents(&self) -> Vec2 {
        match self {
            Entity::Glyph(glyph) => Vec2::splat(glyph.size),
            Entity::Boundary(boundary) => Vec2::new(boundary.width, boundary.height),
        }
    }
}

/// How the engine's own draw pass paints a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub fill: Rgba,
    pub visible: bool,
}

impl Appearance {
    /// Drawn, but with a fully transparent fill.
    pub const TRANSPARENT: Appearance = Appearance {
        fill: Rgba::TRANSPARENT,
        visible: true,
    };

    pub const HIDDEN: Appearance = Appearance {
        fill: Rgba::TRANSPARENT,
        visible: false,
    };
}

/// Read-only snapshot of an entity and its current transform.
#[derive(Debug, Clone, Copy)]
pub struct EntityView<'a> {
    pub id: EntityId,
    pub entity: &'a Entity,
    pub appearance: Appearance,
    pub position: Vec2,
    pub angle: f32,
    pub linvel: Vec2,
    pub angvel: f32,
}

impl EntityView<'_> {
    /// Whether `point` lies inside the body's rotated box.
    pub fn contains(&self, point: Vec2) -> bool {
        let local = Vec2::from_angle(-self.angle).rotate(point - self.position);
        let half = self.entity.extents() / 2.0;
        local.x.abs() <= half.x && local.y.abs() <= half.y
    }
}
