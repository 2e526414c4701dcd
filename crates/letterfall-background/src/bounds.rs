//! Static collision geometry: viewport edge walls and content blockers.

use std::time::Instant;

use glam::Vec2;
use letterfall_core::{PresetParams, Region, Rgba, Viewport};
use letterfall_sim::{Appearance, BoundaryBody, BoundaryKind, EntityId, Simulation};

/// Fill used for boundaries when they are shown for debugging.
const DEBUG_FILL: Rgba = Rgba::new(200, 60, 40, 0.12);

/// Floor, ceiling, left and right walls whose inner edges sit exactly on the
/// viewport boundary. Thickness extends outward only.
pub fn edge_walls(viewport: Viewport, thickness: f32) -> [BoundaryBody; 4] {
    let Viewport {
        width: w,
        height: h,
    } = viewport;
    let t = thickness;
    [
        BoundaryBody::new(
            BoundaryKind::Floor,
            Vec2::new(w / 2.0, h + t / 2.0),
            w + t * 2.0,
            t,
        ),
        BoundaryBody::new(
            BoundaryKind::Ceiling,
            Vec2::new(w / 2.0, -t / 2.0),
            w + t * 2.0,
            t,
        ),
        BoundaryBody::new(
            BoundaryKind::LeftWall,
            Vec2::new(-t / 2.0, h / 2.0),
            t,
            h + t * 2.0,
        ),
        BoundaryBody::new(
            BoundaryKind::RightWall,
            Vec2::new(w + t / 2.0, h / 2.0),
            t,
            h + t * 2.0,
        ),
    ]
}

/// One blocker per region, inflated by `padding` on every side.
pub fn content_blockers(regions: &[Region], padding: f32) -> Vec<BoundaryBody> {
    regions
        .iter()
        .map(|region| {
            let padded = region.inflate(padding);
            BoundaryBody::new(
                BoundaryKind::Blocker,
                padded.center(),
                padded.width,
                padded.height,
            )
        })
        .collect()
}

/// Tracks the wall and blocker sets and replaces them wholesale.
#[derive(Debug, Clone)]
pub struct BoundsManager {
    params: &'static PresetParams,
    walls: Vec<EntityId>,
    blockers: Vec<EntityId>,
    /// Regions the current blockers were built from.
    built_regions: Vec<Region>,
    /// When a deferred blocker rebuild is due.
    pending: Option<Instant>,
    show: bool,
}

impl BoundsManager {
    pub fn new(params: &'static PresetParams) -> Self {
        Self {
            params,
            walls: Vec::new(),
            blockers: Vec::new(),
            built_regions: Vec::new(),
            pending: None,
            show: false,
        }
    }

    /// Make boundaries visible with a faint fill.
    pub fn with_visible_bounds(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn walls(&self) -> &[EntityId] {
        &self.walls
    }

    pub fn blockers(&self) -> &[EntityId] {
        &self.blockers
    }

    pub fn built_regions(&self) -> &[Region] {
        &self.built_regions
    }

    /// Remove the previous walls and insert a fresh set for `viewport`.
    pub fn rebuild_edge_walls(&mut self, sim: &mut Simulation, viewport: Viewport) {
        let walls = edge_walls(viewport, self.params.wall_thickness);
        let old = std::mem::take(&mut self.walls);
        self.walls = self.replace(sim, old, walls);
        log::debug!(
            "rebuilt edge walls for {:.0}x{:.0}",
            viewport.width,
            viewport.height
        );
    }

    /// Remove the previous blockers and insert one per region.
    pub fn rebuild_content_blockers(&mut self, sim: &mut Simulation, regions: &[Region]) {
        let blockers = content_blockers(regions, self.params.blocker_padding);
        let old = std::mem::take(&mut self.blockers);
        self.blockers = self.replace(sim, old, blockers);
        self.built_regions = regions.to_vec();
        self.pending = None;
        log::debug!("rebuilt {} content blockers", self.blockers.len());
    }

    fn replace(
        &self,
        sim: &mut Simulation,
        old: Vec<EntityId>,
        fresh: impl IntoIterator<Item = BoundaryBody>,
    ) -> Vec<EntityId> {
        for id in old {
            sim.remove(id);
        }
        fresh
            .into_iter()
            .map(|body| {
                let id = sim.insert_boundary(body);
                if self.show {
                    sim.set_appearance(
                        id,
                        Appearance {
                            fill: DEBUG_FILL,
                            visible: true,
                        },
                    );
                }
                id
            })
            .collect()
    }

    /// Request a blocker rebuild at `at`. An earlier pending request wins.
    pub fn schedule_blockers(&mut self, at: Instant) {
        self.pending = Some(match self.pending {
            Some(existing) if existing <= at => existing,
            _ => at,
        });
    }

    pub fn has_pending_blockers(&self) -> bool {
        self.pending.is_some()
    }

    /// Rebuild blockers if a scheduled rebuild is due. Returns true if it ran.
    pub fn poll(&mut self, now: Instant, sim: &mut Simulation, regions: &[Region]) -> bool {
        match self.pending {
            Some(due) if now >= due => {
                self.rebuild_content_blockers(sim, regions);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use letterfall_core::Preset;

    use super::*;

    fn geometry(sim: &Simulation, ids: &[EntityId]) -> Vec<BoundaryBody> {
        ids.iter()
            .map(|id| match sim.get(*id).unwrap().entity {
                letterfall_sim::Entity::Boundary(b) => b.clone(),
                other => panic!("not a boundary: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_floor_for_800_by_600() {
        let t = 80.0;
        let [floor, ceiling, left, right] = edge_walls(Viewport::new(800.0, 600.0), t);
        assert_eq!(floor.center, Vec2::new(400.0, 600.0 + t / 2.0));
        assert_eq!(floor.width, 800.0 + 2.0 * t);
        assert_eq!(floor.height, t);
        assert_eq!(ceiling.center, Vec2::new(400.0, -t / 2.0));
        assert_eq!(left.center, Vec2::new(-t / 2.0, 300.0));
        assert_eq!(right.center, Vec2::new(800.0 + t / 2.0, 300.0));
    }

    #[test]
    fn test_wall_inner_edges_enclose_viewport() {
        let (w, h, t) = (1234.0, 567.0, 80.0);
        let [floor, ceiling, left, right] = edge_walls(Viewport::new(w, h), t);
        assert_eq!(floor.center.y - floor.height / 2.0, h);
        assert_eq!(ceiling.center.y + ceiling.height / 2.0, 0.0);
        assert_eq!(left.center.x + left.width / 2.0, 0.0);
        assert_eq!(right.center.x - right.width / 2.0, w);
    }

    #[test]
    fn test_blockers_are_padded() {
        let blockers = content_blockers(&[Region::new(100.0, 200.0, 300.0, 40.0)], 10.0);
        assert_eq!(blockers.len(), 1);
        assert_eq!(blockers[0].center, Vec2::new(250.0, 220.0));
        assert_eq!(blockers[0].width, 320.0);
        assert_eq!(blockers[0].height, 60.0);
        assert_eq!(blockers[0].kind, BoundaryKind::Blocker);
    }

    #[test]
    fn test_wall_rebuild_replaces_previous_set() {
        let mut sim = Simulation::new(1.05);
        let mut bounds = BoundsManager::new(Preset::Playground.params());
        bounds.rebuild_edge_walls(&mut sim, Viewport::new(800.0, 600.0));
        let first = bounds.walls().to_vec();
        bounds.rebuild_edge_walls(&mut sim, Viewport::new(1024.0, 768.0));

        assert_eq!(sim.len(), 4);
        assert!(first.iter().all(|id| !sim.contains(*id)));
        let floor = &geometry(&sim, bounds.walls())[0];
        assert_eq!(floor.center, Vec2::new(512.0, 808.0));
    }

    #[test]
    fn test_blocker_rebuild_is_idempotent() {
        let mut sim = Simulation::new(1.05);
        let mut bounds = BoundsManager::new(Preset::Playground.params());
        let regions = [
            Region::new(100.0, 100.0, 400.0, 120.0),
            Region::new(100.0, 300.0, 400.0, 60.0),
        ];
        bounds.rebuild_content_blockers(&mut sim, &regions);
        let first_ids = bounds.blockers().to_vec();
        let first = geometry(&sim, &first_ids);

        bounds.rebuild_content_blockers(&mut sim, &regions);
        let second = geometry(&sim, bounds.blockers());

        assert_eq!(first, second);
        assert_eq!(sim.len(), 2);
        assert!(first_ids.iter().all(|id| !sim.contains(*id)));
    }

    #[test]
    fn test_deferred_rebuild() {
        let mut sim = Simulation::new(1.05);
        let mut bounds = BoundsManager::new(Preset::Playground.params());
        let start = Instant::now();
        let regions = [Region::new(0.0, 0.0, 10.0, 10.0)];

        bounds.schedule_blockers(start + Duration::from_millis(100));
        bounds.schedule_blockers(start + Duration::from_millis(50));
        bounds.schedule_blockers(start + Duration::from_millis(200));

        assert!(!bounds.poll(start + Duration::from_millis(49), &mut sim, &regions));
        assert!(bounds.blockers().is_empty());
        assert!(bounds.poll(start + Duration::from_millis(50), &mut sim, &regions));
        assert_eq!(bounds.blockers().len(), 1);
        assert!(!bounds.has_pending_blockers());
        assert!(!bounds.poll(start + Duration::from_millis(500), &mut sim, &regions));
    }

    #[test]
    fn test_visible_bounds_get_debug_fill() {
        let mut sim = Simulation::new(1.05);
        let mut bounds =
            BoundsManager::new(Preset::Playground.params()).with_visible_bounds(true);
        bounds.rebuild_edge_walls(&mut sim, Viewport::new(100.0, 100.0));
        assert!(sim.entities().all(|view| view.appearance.visible));
    }
}
