use lemonsters_core::actor::ActorId;
use lemonsters_core::geometry::{Rect, Vec2};
use lemonsters_core::visual::SpawnableVisual;

/// A fixed platform. Coordinates are the rect's top-left corner.
#[derive(Debug, Clone)]
pub struct Platform {
    pub id: ActorId,
    pub rect: Rect,
}

impl Platform {
    pub fn new(id: ActorId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// A platform traversing its waypoint path as a closed loop at constant
/// speed. The last waypoint connects back to the first.
///
/// Advancement is distance-based with remainder carry across waypoints,
/// so speed stays uniform no matter how segment lengths differ and no
/// distance is lost on the tick that crosses a corner.
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    pub id: ActorId,
    pub size: Vec2,
    path: Vec<Vec2>,
    speed: f32,
    segment: usize,
    traveled: f32,
    position: Vec2,
}

impl MovingPlatform {
    /// `path` must hold at least two waypoints; the factory rejects
    /// shorter paths before construction.
    pub fn new(id: ActorId, size: Vec2, path: Vec<Vec2>, speed: f32) -> Self {
        let position = path.first().copied().unwrap_or(Vec2::ZERO);
        Self {
            id,
            size,
            path,
            speed,
            segment: 0,
            traveled: 0.0,
            position,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current footprint for ground queries.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    fn segment_endpoints(&self, segment: usize) -> (Vec2, Vec2) {
        let start = self.path[segment % self.path.len()];
        let end = self.path[(segment + 1) % self.path.len()];
        (start, end)
    }

    /// Advance along the loop and mirror the new position to the renderer.
    pub fn tick<V: SpawnableVisual>(&mut self, delta_ms: f32, visual: &mut V) {
        if self.path.len() < 2 || self.speed <= 0.0 {
            return;
        }

        let mut advance = self.speed * delta_ms / 1000.0;
        // Cross as many waypoints as the advance covers, carrying the
        // remainder into each next segment. Zero-length segments are
        // skipped; the guard caps pathological loops.
        let mut guard = self.path.len() * 2 + 2;
        loop {
            let (start, end) = self.segment_endpoints(self.segment);
            let segment_length = start.distance_to(end);
            let remaining = segment_length - self.traveled;
            if advance < remaining {
                self.traveled += advance;
                break;
            }
            advance -= remaining.max(0.0);
            self.segment = (self.segment + 1) % self.path.len();
            self.traveled = 0.0;
            guard -= 1;
            if guard == 0 {
                break;
            }
        }

        let (start, end) = self.segment_endpoints(self.segment);
        let segment_length = start.distance_to(end);
        let t = if segment_length > 0.0 {
            self.traveled / segment_length
        } else {
            0.0
        };
        self.position = Vec2::new(
            start.x + (end.x - start.x) * t,
            start.y + (end.y - start.y) * t,
        );
        visual.set_position(&self.id, self.position);
    }
}

/// Whether any platform surface sits under the probe point.
///
/// A hit is a rect whose horizontal span contains `probe.x` and whose
/// top edge lies at or above `probe.y`, within `tolerance` below the
/// rect bottom. Used by the frog's pit check before committing a jump.
pub fn ground_at(rects: &[Rect], probe: Vec2, tolerance: f32) -> bool {
    rects.iter().any(|r| {
        probe.x >= r.left()
            && probe.x <= r.right()
            && probe.y >= r.top()
            && probe.y <= r.bottom() + tolerance
    })
}

/// Find the surface a falling point crosses this tick: a platform top
/// between the previous and new foot positions at column `x`. Returns
/// the highest such top (smallest y).
pub fn landing_surface(rects: &[Rect], x: f32, prev_bottom: f32, new_bottom: f32) -> Option<f32> {
    rects
        .iter()
        .filter(|r| x >= r.left() && x <= r.right())
        .map(|r| r.top())
        .filter(|&top| prev_bottom <= top && new_bottom >= top)
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemonsters_core::test_helpers::RecordingVisual;

    fn platform_2pt() -> MovingPlatform {
        MovingPlatform::new(
            ActorId::from("moving-platform-0"),
            Vec2::new(128.0, 32.0),
            vec![Vec2::new(400.0, 700.0), Vec2::new(700.0, 700.0)],
            50.0,
        )
    }

    #[test]
    fn advances_at_constant_speed() {
        let mut visual = RecordingVisual::default();
        let mut p = platform_2pt();
        // 60 ticks of 16.667ms = 1 second = 50px
        for _ in 0..60 {
            p.tick(1000.0 / 60.0, &mut visual);
        }
        assert!((p.position().x - 450.0).abs() < 0.01, "x = {}", p.position().x);
        assert_eq!(p.position().y, 700.0);
        assert_eq!(visual.positions[&p.id], p.position());
    }

    #[test]
    fn two_point_path_loops_back_through_the_start() {
        let mut visual = RecordingVisual::default();
        let mut p = platform_2pt();
        // Loop is 400->700->400 = 600px; at 50px/s a full cycle takes 12s.
        // After 7s it has covered 350px: reached the far end (300px) and
        // come 50px back.
        p.tick(7000.0, &mut visual);
        assert!((p.position().x - 650.0).abs() < 0.01, "x = {}", p.position().x);
        // After 12s total it is back at the start.
        p.tick(5000.0, &mut visual);
        assert!((p.position().x - 400.0).abs() < 0.01, "x = {}", p.position().x);
    }

    #[test]
    fn speed_is_uniform_across_unequal_segments() {
        let mut visual = RecordingVisual::default();
        let mut p = MovingPlatform::new(
            ActorId::from("moving-platform-1"),
            Vec2::new(100.0, 20.0),
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 50.0),
            ],
            100.0,
        );
        // 1s at 100px/s lands exactly on the second waypoint.
        p.tick(1000.0, &mut visual);
        assert!((p.position().x - 100.0).abs() < 0.01);
        assert!(p.position().y.abs() < 0.01);
        // 0.25s more = 25px down the 50px second segment.
        p.tick(250.0, &mut visual);
        assert!((p.position().y - 25.0).abs() < 0.01, "y = {}", p.position().y);
    }

    #[test]
    fn one_big_tick_carries_across_multiple_waypoints() {
        let mut visual = RecordingVisual::default();
        let mut p = platform_2pt();
        let mut q = platform_2pt();
        // Same total advance, one lump vs many small ticks.
        p.tick(9000.0, &mut visual);
        for _ in 0..90 {
            q.tick(100.0, &mut visual);
        }
        assert!(
            (p.position().x - q.position().x).abs() < 0.01,
            "lump {} vs stepped {}",
            p.position().x,
            q.position().x
        );
    }

    #[test]
    fn ground_probe_matches_span_and_depth() {
        let rects = [Rect::new(0.0, 1000.0, 500.0, 80.0)];
        assert!(ground_at(&rects, Vec2::new(250.0, 1000.0), 50.0), "on top");
        assert!(
            ground_at(&rects, Vec2::new(250.0, 1120.0), 50.0),
            "within tolerance below the bottom"
        );
        assert!(
            !ground_at(&rects, Vec2::new(250.0, 1131.0), 50.0),
            "past tolerance"
        );
        assert!(
            !ground_at(&rects, Vec2::new(600.0, 1010.0), 50.0),
            "outside horizontal span"
        );
        assert!(
            !ground_at(&rects, Vec2::new(250.0, 900.0), 50.0),
            "probe above the surface is a pit"
        );
    }

    #[test]
    fn landing_picks_the_highest_crossed_surface() {
        let rects = [
            Rect::new(0.0, 1000.0, 500.0, 80.0),
            Rect::new(0.0, 960.0, 500.0, 10.0),
        ];
        let landed = landing_surface(&rects, 250.0, 950.0, 1010.0);
        assert_eq!(landed, Some(960.0));
        assert_eq!(
            landing_surface(&rects, 250.0, 965.0, 980.0),
            None,
            "no top crossed in this step"
        );
    }
}
