//! Periodic population control.

use std::time::{Duration, Instant};

use letterfall_core::{PresetParams, Viewport};
use letterfall_sim::{EntityId, Simulation};
use rand::Rng;

use crate::factory::BodyFactory;

/// What one spawn tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub spawned: Option<EntityId>,
    pub evicted: usize,
}

/// Spawns at most one glyph per tick while below the cap and evicts glyphs
/// that have fallen far below the viewport.
#[derive(Debug, Clone)]
pub struct SpawnController {
    factory: BodyFactory,
    cap: usize,
    eviction_margin: f32,
    period: Duration,
    last_tick: Option<Instant>,
}

impl SpawnController {
    pub fn new(params: &'static PresetParams) -> Self {
        Self {
            factory: BodyFactory::new(params),
            cap: params.spawn_cap,
            eviction_margin: params.eviction_margin,
            period: params.spawn_period,
            last_tick: None,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Run one tick: count, maybe spawn, then evict escaped glyphs.
    pub fn tick(
        &mut self,
        sim: &mut Simulation,
        rng: &mut impl Rng,
        viewport: Viewport,
    ) -> TickOutcome {
        let live: Vec<EntityId> = sim
            .entities()
            .filter(|view| !view.entity.is_static() && view.entity.glyph().is_some())
            .map(|view| view.id)
            .collect();

        let spawned = if live.len() < self.cap {
            Some(self.factory.spawn_glyph(sim, rng, viewport.width))
        } else {
            None
        };

        let limit = viewport.height + self.eviction_margin;
        let escaped: Vec<EntityId> = live
            .into_iter()
            .filter(|id| sim.get(*id).is_some_and(|view| view.position.y > limit))
            .collect();
        let evicted = escaped.into_iter().filter(|id| sim.remove(*id)).count();
        if evicted > 0 {
            log::debug!("evicted {evicted} glyphs below y={limit:.0}");
        }

        TickOutcome { spawned, evicted }
    }

    /// Tick if a full period has passed since the last tick.
    ///
    /// The first call only starts the timer.
    pub fn poll(
        &mut self,
        now: Instant,
        sim: &mut Simulation,
        rng: &mut impl Rng,
        viewport: Viewport,
    ) -> Option<TickOutcome> {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return None;
        };
        if now.duration_since(last) < self.period {
            return None;
        }
        self.last_tick = Some(now);
        Some(self.tick(sim, rng, viewport))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use letterfall_core::Preset;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::bounds::BoundsManager;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 600.0);

    #[test]
    fn test_population_never_exceeds_cap() {
        let params = Preset::Diagnostic.params();
        let mut sim = Simulation::new(params.gravity);
        let mut rng = StdRng::seed_from_u64(5);
        let mut spawner = SpawnController::new(params);

        for _ in 0..(params.spawn_cap + 20) {
            spawner.tick(&mut sim, &mut rng, VIEWPORT);
            assert!(sim.glyph_count() <= params.spawn_cap);
        }
        assert_eq!(sim.glyph_count(), params.spawn_cap);

        let outcome = spawner.tick(&mut sim, &mut rng, VIEWPORT);
        assert_eq!(outcome.spawned, None);
    }

    #[test]
    fn test_eviction_threshold() {
        let params = Preset::Playground.params();
        let mut sim = Simulation::new(params.gravity);
        let mut rng = StdRng::seed_from_u64(9);
        let mut spawner = SpawnController::new(params);
        let limit = VIEWPORT.height + params.eviction_margin;

        let below = spawner.tick(&mut sim, &mut rng, VIEWPORT).spawned.unwrap();
        let above = spawner.tick(&mut sim, &mut rng, VIEWPORT).spawned.unwrap();
        sim.set_position(below, Vec2::new(500.0, limit + 1.0));
        sim.set_position(above, Vec2::new(200.0, limit - 1.0));

        let outcome = spawner.tick(&mut sim, &mut rng, VIEWPORT);
        assert_eq!(outcome.evicted, 1);
        assert!(!sim.contains(below));
        assert!(sim.contains(above));
    }

    #[test]
    fn test_boundaries_are_never_evicted() {
        let params = Preset::Playground.params();
        let mut sim = Simulation::new(params.gravity);
        let mut rng = StdRng::seed_from_u64(2);
        let mut bounds = BoundsManager::new(params);
        bounds.rebuild_edge_walls(&mut sim, VIEWPORT);
        let mut spawner = SpawnController::new(params);

        // Every wall sits below this eviction limit, but static bodies are
        // not part of the population.
        let outcome = spawner.tick(&mut sim, &mut rng, Viewport::new(1000.0, -1000.0));
        assert_eq!(outcome.evicted, 0);
        assert!(bounds.walls().iter().all(|id| sim.contains(*id)));
    }

    #[test]
    fn test_poll_respects_period() {
        let params = Preset::Playground.params();
        let mut sim = Simulation::new(params.gravity);
        let mut rng = StdRng::seed_from_u64(4);
        let mut spawner = SpawnController::new(params);
        let start = Instant::now();

        assert!(spawner.poll(start, &mut sim, &mut rng, VIEWPORT).is_none());
        let early = start + Duration::from_millis(379);
        assert!(spawner.poll(early, &mut sim, &mut rng, VIEWPORT).is_none());
        let due = start + Duration::from_millis(380);
        assert!(spawner.poll(due, &mut sim, &mut rng, VIEWPORT).is_some());
        assert_eq!(sim.glyph_count(), 1);
        let again = due + Duration::from_millis(100);
        assert!(spawner.poll(again, &mut sim, &mut rng, VIEWPORT).is_none());
    }
}
