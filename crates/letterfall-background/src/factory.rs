//! Glyph body creation.

use glam::Vec2;
use letterfall_core::{Band, PresetParams, STEP_RATE};
use letterfall_sim::{EntityId, GlyphEntity, Simulation};
use rand::Rng;

/// Sample a band uniformly.
pub(crate) fn uniform(rng: &mut impl Rng, band: Band) -> f32 {
    band.lerp(rng.random::<f32>())
}

/// A glyph with its randomised initial state, before insertion.
///
/// Velocities are in per-step engine units.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSpawn {
    pub glyph: GlyphEntity,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

/// Builds falling glyphs with randomised look and physics.
#[derive(Debug, Clone)]
pub struct BodyFactory {
    params: &'static PresetParams,
}

impl BodyFactory {
    pub fn new(params: &'static PresetParams) -> Self {
        Self { params }
    }

    /// Draw every random parameter of a new glyph.
    pub fn build(&self, rng: &mut impl Rng, viewport_width: f32) -> GlyphSpawn {
        let p = self.params;

        let glyph = p.alphabet[rng.random_range(0..p.alphabet.len())];
        let font_size = uniform(rng, p.font_size);
        let size = font_size * uniform(rng, p.box_scale);
        let x = uniform(
            rng,
            Band::new(p.spawn_margin_x, viewport_width - p.spawn_margin_x),
        );
        let restitution = uniform(rng, p.restitution);
        let ink = if rng.random::<f32>() < p.ink_primary_chance {
            p.ink_primary
        } else {
            p.ink_secondary
        };
        let velocity = Vec2::new(uniform(rng, p.velocity_x), uniform(rng, p.velocity_y));
        let angular_velocity = uniform(rng, p.angular_velocity);

        GlyphSpawn {
            glyph: GlyphEntity {
                glyph,
                font_size,
                size,
                ink,
                restitution,
                friction: p.friction,
                air_friction: p.air_friction,
                density: p.density,
                chamfer_radius: p.chamfer_radius,
            },
            position: Vec2::new(x, p.spawn_y),
            velocity,
            angular_velocity,
        }
    }

    /// Create a glyph above the viewport and add it to the simulation.
    pub fn spawn_glyph(
        &self,
        sim: &mut Simulation,
        rng: &mut impl Rng,
        viewport_width: f32,
    ) -> EntityId {
        let spawn = self.build(rng, viewport_width);
        log::debug!(
            "spawn {:?} at x={:.0} font={:.0}",
            spawn.glyph.glyph,
            spawn.position.x,
            spawn.glyph.font_size
        );
        sim.insert_glyph(
            spawn.glyph,
            spawn.position,
            spawn.velocity * STEP_RATE,
            spawn.angular_velocity * STEP_RATE,
        )
    }
}

#[cfg(test)]
mod tests {
    use letterfall_core::Preset;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_spawn_within_viewport_1000() {
        let mut rng = StdRng::seed_from_u64(7);
        for preset in [Preset::Playground, Preset::Diagnostic] {
            let params = preset.params();
            let factory = BodyFactory::new(params);
            for _ in 0..500 {
                let spawn = factory.build(&mut rng, 1000.0);
                assert!((40.0..=960.0).contains(&spawn.position.x));
                assert_eq!(spawn.position.y, -80.0);
                assert!((26.0..=64.0).contains(&spawn.glyph.font_size));
                assert!(params.font_size.contains(spawn.glyph.font_size));
            }
        }
    }

    #[test]
    fn test_physical_parameters_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let params = Preset::Playground.params();
        let factory = BodyFactory::new(params);
        for _ in 0..500 {
            let spawn = factory.build(&mut rng, 1280.0);
            let g = &spawn.glyph;
            let scale = g.size / g.font_size;
            assert!(
                scale >= params.box_scale.lo - 1e-4 && scale <= params.box_scale.hi + 1e-4,
                "scale {scale}"
            );
            assert!(params.restitution.contains(g.restitution));
            assert_eq!(g.friction, 0.25);
            assert_eq!(g.air_friction, 0.015);
            assert_eq!(g.density, 0.0025);
            assert!(g.ink == params.ink_primary || g.ink == params.ink_secondary);
            assert!(params.velocity_x.contains(spawn.velocity.x));
            assert!(params.velocity_y.contains(spawn.velocity.y));
            assert!(params.angular_velocity.contains(spawn.angular_velocity));
        }
    }

    #[test]
    fn test_glyphs_come_from_alphabet() {
        let mut rng = StdRng::seed_from_u64(3);
        for preset in [Preset::Playground, Preset::Diagnostic] {
            let params = preset.params();
            let factory = BodyFactory::new(params);
            for _ in 0..300 {
                let spawn = factory.build(&mut rng, 800.0);
                assert!(params.alphabet.contains(&spawn.glyph.glyph));
            }
        }
    }

    #[test]
    fn test_both_inks_appear() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = Preset::Playground.params();
        let factory = BodyFactory::new(params);
        let primary = (0..1000)
            .filter(|_| factory.build(&mut rng, 800.0).glyph.ink == params.ink_primary)
            .count();
        assert!(primary > 750 && primary < 950, "primary = {primary}");
    }

    #[test]
    fn test_spawn_glyph_inserts_into_simulation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = Simulation::new(1.05);
        let factory = BodyFactory::new(Preset::Diagnostic.params());
        let id = factory.spawn_glyph(&mut sim, &mut rng, 600.0);

        let view = sim.get(id).expect("glyph inserted");
        assert!(view.entity.glyph().is_some());
        assert_eq!(view.position.y, -80.0);
        assert_eq!(sim.glyph_count(), 1);
    }
}
