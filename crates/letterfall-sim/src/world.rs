//! The physics world and its entity table.

use std::time::Duration;

use glam::Vec2;
use letterfall_core::STEP_RATE;
use rapier2d::prelude::*;

use crate::entity::{
    Appearance, BoundaryBody, BoundaryKind, Entity, EntityId, EntityView, GlyphEntity,
};

/// Engine gravity scale: gravity is expressed per ms² and scaled by this.
const GRAVITY_SCALE: f32 = 0.001;

/// Friction of static geometry.
const BOUNDARY_FRICTION: f32 = 0.1;

/// Convert a per-step velocity loss fraction into a per-second damping rate.
pub fn damping_per_second(air_friction: f32) -> f32 {
    -(1.0 - air_friction.clamp(0.0, 0.999)).ln() * STEP_RATE
}

/// Convert engine gravity (per ms², scaled) into units/s².
pub fn gravity_per_second(gravity: f32) -> f32 {
    gravity * GRAVITY_SCALE * 1_000_000.0
}

#[derive(Debug)]
struct Tracked {
    handle: RigidBodyHandle,
    entity: Entity,
    appearance: Appearance,
}

/// Owns every body in the world, glyph and boundary alike.
///
/// Entities are kept in insertion order so draw order is stable.
pub struct Simulation {
    gravity: Vector<Real>,
    integration: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    entities: Vec<Tracked>,
    steps: u64,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("gravity", &self.gravity.y)
            .field("entities", &self.entities.len())
            .field("steps", &self.steps)
            .finish()
    }
}

impl Simulation {
    /// Create an empty world. `gravity` is in engine units, pulling toward +y.
    pub fn new(gravity: f32) -> Self {
        let mut integration = IntegrationParameters::default();
        integration.dt = 1.0 / STEP_RATE;

        Self {
            gravity: vector![0.0, gravity_per_second(gravity)],
            integration,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            entities: Vec::new(),
            steps: 0,
        }
    }

    /// Add a dynamic glyph body. Velocities are per second.
    pub fn insert_glyph(
        &mut self,
        glyph: GlyphEntity,
        position: Vec2,
        velocity: Vec2,
        angular_velocity: f32,
    ) -> EntityId {
        let damping = damping_per_second(glyph.air_friction);
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .linvel(vector![velocity.x, velocity.y])
            .angvel(angular_velocity)
            .linear_damping(damping)
            .angular_damping(damping)
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(body);

        let half = glyph.size / 2.0;
        let radius = glyph.chamfer_radius.min(half * 0.5);
        let collider = ColliderBuilder::round_cuboid(half - radius, half - radius, radius)
            .restitution(glyph.restitution)
            .friction(glyph.friction)
            .density(glyph.density)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.track(handle, Entity::Glyph(glyph), Appearance::TRANSPARENT)
    }

    /// Add a static boundary body.
    pub fn insert_boundary(&mut self, boundary: BoundaryBody) -> EntityId {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![boundary.center.x, boundary.center.y])
            .build();
        let handle = self.bodies.insert(body);

        // Glyphs spawn on the ceiling's outer edge and must fall through it.
        let groups = match boundary.kind {
            BoundaryKind::Ceiling => InteractionGroups::new(Group::NONE, Group::NONE),
            _ => InteractionGroups::all(),
        };
        let collider = ColliderBuilder::cuboid(boundary.width / 2.0, boundary.height / 2.0)
            .friction(BOUNDARY_FRICTION)
            .collision_groups(groups)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.track(handle, Entity::Boundary(boundary), Appearance::HIDDEN)
    }

    fn track(&mut self, handle: RigidBodyHandle, entity: Entity, appearance: Appearance) -> EntityId {
        self.entities.push(Tracked {
            handle,
            entity,
            appearance,
        });
        EntityId(handle)
    }

    /// Remove a body and its collider. Returns false if it was already gone.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(index) = self.entities.iter().position(|t| t.handle == id.0) else {
            return false;
        };
        self.entities.remove(index);
        self.bodies.remove(
            id.0,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        true
    }

    /// Remove every entity matching `predicate`, returning how many went.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&EntityView<'_>) -> bool) -> usize {
        let doomed: Vec<EntityId> = self
            .entities()
            .filter(|view| predicate(view))
            .map(|view| view.id)
            .collect();
        let removed = doomed.into_iter().filter(|id| self.remove(*id)).count();
        log::trace!("removed {removed} entities, {} left", self.entities.len());
        removed
    }

    /// Remove every glyph, leaving boundaries in place.
    pub fn clear_glyphs(&mut self) -> usize {
        self.remove_where(|view| view.entity.glyph().is_some())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|t| t.handle == id.0)
    }

    /// All entities, static and dynamic, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        self.entities.iter().map(|tracked| self.view_of(tracked))
    }

    pub fn get(&self, id: EntityId) -> Option<EntityView<'_>> {
        self.entities
            .iter()
            .find(|t| t.handle == id.0)
            .map(|tracked| self.view_of(tracked))
    }

    fn view_of<'a>(&'a self, tracked: &'a Tracked) -> EntityView<'a> {
        let body = &self.bodies[tracked.handle];
        let translation = body.translation();
        let linvel = body.linvel();
        EntityView {
            id: EntityId(tracked.handle),
            entity: &tracked.entity,
            appearance: tracked.appearance,
            position: Vec2::new(translation.x, translation.y),
            angle: body.rotation().angle(),
            linvel: Vec2::new(linvel.x, linvel.y),
            angvel: body.angvel(),
        }
    }

    /// Number of live, dynamic, glyph-bearing entities.
    pub fn glyph_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|t| !t.entity.is_static() && t.entity.glyph().is_some())
            .count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn set_appearance(&mut self, id: EntityId, appearance: Appearance) {
        if let Some(tracked) = self.entities.iter_mut().find(|t| t.handle == id.0) {
            tracked.appearance = appearance;
        }
    }

    /// Set the linear velocity (per second) of a dynamic body.
    pub fn set_velocity(&mut self, id: EntityId, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(id.0)
            && body.is_dynamic()
        {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    /// Teleport a body, keeping its velocity.
    pub fn set_position(&mut self, id: EntityId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    /// The topmost entity whose box contains `point`.
    pub fn entity_at(&self, point: Vec2) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .map(|tracked| self.view_of(tracked))
            .find(|view| view.contains(point))
            .map(|view| view.id)
    }

    /// Advance the world by one fixed step.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Steps taken since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.steps * 1_000_000 / STEP_RATE as u64)
    }
}
