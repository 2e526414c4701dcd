//! Paints each glyph at its body's transform.

use glam::Vec2;
use letterfall_core::PresetParams;
use letterfall_sim::{Canvas, Font, FrameInfo, RenderHook, Shadow, Simulation};

/// After-render hook that draws glyph characters over the (invisible) bodies.
#[derive(Debug, Clone)]
pub struct RenderOverlay {
    params: &'static PresetParams,
}

impl RenderOverlay {
    pub fn new(params: &'static PresetParams) -> Self {
        Self { params }
    }
}

impl RenderHook for RenderOverlay {
    fn after_render(&mut self, sim: &Simulation, canvas: &mut dyn Canvas, _frame: &FrameInfo) {
        let p = self.params;
        let shadow = Shadow {
            color: p.shadow_color,
            blur: p.shadow_blur,
            offset: Vec2::new(p.shadow_offset.0, p.shadow_offset.1),
        };
        let mut utf8 = [0u8; 4];

        for view in sim.entities() {
            let Some(glyph) = view.entity.glyph() else {
                continue;
            };

            canvas.save();
            canvas.translate(view.position);
            canvas.rotate(view.angle);
            canvas.set_fill(glyph.ink);
            canvas.set_font(Font {
                size: glyph.font_size,
                bold: true,
            });
            canvas.set_shadow(Some(shadow));
            canvas.fill_text(
                glyph.glyph.encode_utf8(&mut utf8),
                Vec2::new(0.0, p.text_offset_y),
            );
            canvas.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use glam::Affine2;
    use letterfall_core::{Preset, Viewport};
    use letterfall_sim::{BoundaryBody, BoundaryKind, DrawCommand, RecordingCanvas, Renderer};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::factory::BodyFactory;

    fn frame() -> FrameInfo {
        FrameInfo {
            now: Instant::now(),
            viewport: Viewport::new(1000.0, 600.0),
        }
    }

    #[test]
    fn test_draws_only_glyphs_from_alphabet() {
        let params = Preset::Diagnostic.params();
        let mut sim = Simulation::new(params.gravity);
        let mut rng = StdRng::seed_from_u64(21);
        sim.insert_boundary(BoundaryBody::new(
            BoundaryKind::Floor,
            Vec2::new(500.0, 640.0),
            1160.0,
            80.0,
        ));
        let factory = BodyFactory::new(params);
        for _ in 0..25 {
            factory.spawn_glyph(&mut sim, &mut rng, 1000.0);
        }

        let mut canvas = RecordingCanvas::default();
        RenderOverlay::new(params).after_render(&sim, &mut canvas, &frame());

        let texts = canvas.texts();
        assert_eq!(texts.len(), 25);
        for text in texts {
            let mut chars = text.chars();
            let ch = chars.next().unwrap();
            assert!(chars.next().is_none());
            assert!(params.alphabet.contains(&ch));
        }
    }

    #[test]
    fn test_transforms_do_not_compound() {
        let params = Preset::Playground.params();
        let mut sim = Simulation::new(params.gravity);
        let mut rng = StdRng::seed_from_u64(8);
        let factory = BodyFactory::new(params);
        let first = factory.spawn_glyph(&mut sim, &mut rng, 800.0);
        let second = factory.spawn_glyph(&mut sim, &mut rng, 800.0);
        sim.set_position(first, Vec2::new(100.0, 200.0));
        sim.set_position(second, Vec2::new(300.0, 400.0));

        // A device pixel ratio of 2.
        let base = Affine2::from_scale(Vec2::splat(2.0));
        let mut canvas = RecordingCanvas::new(base);
        let mut renderer = Renderer::new();
        renderer.on_after_render(RenderOverlay::new(params));
        renderer.render(&sim, &mut canvas, &frame());

        let anchors: Vec<Vec2> = canvas
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { device, .. } => Some(*device),
                DrawCommand::Rect { .. } => None,
            })
            .collect();
        assert_eq!(anchors.len(), 2);
        // Unrotated bodies: anchor is (x, y + 2) scaled by the ratio.
        assert!((anchors[0] - Vec2::new(200.0, 404.0)).length() < 1e-3);
        assert!((anchors[1] - Vec2::new(600.0, 804.0)).length() < 1e-3);
        assert_eq!(canvas.transform(), base);
        assert_eq!(canvas.state().depth(), 0);
    }

    #[test]
    fn test_style_comes_from_glyph() {
        let params = Preset::Playground.params();
        let mut sim = Simulation::new(params.gravity);
        let mut rng = StdRng::seed_from_u64(13);
        let id = BodyFactory::new(params).spawn_glyph(&mut sim, &mut rng, 800.0);
        let glyph = sim.get(id).unwrap().entity.glyph().unwrap().clone();

        let mut canvas = RecordingCanvas::default();
        RenderOverlay::new(params).after_render(&sim, &mut canvas, &frame());

        let DrawCommand::Text { state, .. } = &canvas.commands[0] else {
            panic!("expected text");
        };
        assert_eq!(state.fill, glyph.ink);
        assert_eq!(state.font.size, glyph.font_size);
        let shadow = state.shadow.expect("shadow set");
        assert_eq!(shadow.blur, 10.0);
        assert_eq!(shadow.offset, Vec2::new(0.0, 6.0));
    }
}
