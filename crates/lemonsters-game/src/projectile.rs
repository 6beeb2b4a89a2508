use lemonsters_core::actor::{ActorId, Facing};
use lemonsters_core::geometry::Vec2;
use lemonsters_core::visual::SpawnableVisual;

use crate::config::CombatConfig;

/// Who fired the projectile; decides collision routing and expiry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Player,
    Enemy,
    Boss,
}

/// Player shots are budgeted by travel distance, everything else by
/// flight time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Expiry {
    Distance { traveled: f32, max: f32 },
    Lifetime { elapsed_ms: f32, max_ms: f32 },
}

/// A projectile in flight. Integrates its own straight-line motion;
/// `destroy` is idempotent so a collision and an expiry on the same
/// tick release the visual exactly once.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ActorId,
    pub kind: ProjectileKind,
    position: Vec2,
    direction: Vec2,
    speed: f32,
    expiry: Expiry,
    active: bool,
}

impl Projectile {
    /// A horizontal shot from the player's wand.
    pub fn player_shot(id: ActorId, position: Vec2, facing: Facing, combat: &CombatConfig) -> Self {
        Self {
            id,
            kind: ProjectileKind::Player,
            position,
            direction: Vec2::new(facing.sign(), 0.0),
            speed: combat.projectile_speed,
            expiry: Expiry::Distance {
                traveled: 0.0,
                max: combat.projectile_max_distance,
            },
            active: true,
        }
    }

    /// A bird dropping falling straight down.
    pub fn bird_drop(id: ActorId, position: Vec2, drop_speed: f32, combat: &CombatConfig) -> Self {
        Self {
            id,
            kind: ProjectileKind::Enemy,
            position,
            direction: Vec2::new(0.0, 1.0),
            speed: drop_speed,
            expiry: Expiry::Lifetime {
                elapsed_ms: 0.0,
                max_ms: combat.enemy_projectile_lifetime_ms,
            },
            active: true,
        }
    }

    /// A boss shot aimed at where the target is right now. A target on
    /// top of the muzzle yields a zero direction; the shot then just
    /// waits out its lifetime in place.
    pub fn boss_shot(
        id: ActorId,
        position: Vec2,
        target: Vec2,
        speed: f32,
        combat: &CombatConfig,
    ) -> Self {
        let aim = Vec2::new(target.x - position.x, target.y - position.y).normalized();
        Self {
            id,
            kind: ProjectileKind::Boss,
            position,
            direction: aim,
            speed,
            expiry: Expiry::Lifetime {
                elapsed_ms: 0.0,
                max_ms: combat.boss_projectile_lifetime_ms,
            },
            active: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance flight and expiry. Returns whether the projectile is
    /// still live afterwards.
    pub fn tick<V: SpawnableVisual>(
        &mut self,
        delta_ms: f32,
        level_width: f32,
        level_height: f32,
        margin: f32,
        visual: &mut V,
    ) -> bool {
        if !self.active {
            return false;
        }

        let step = self.speed * delta_ms / 1000.0;
        self.position.x += self.direction.x * step;
        self.position.y += self.direction.y * step;
        visual.set_position(&self.id, self.position);

        let expired = match &mut self.expiry {
            Expiry::Distance { traveled, max } => {
                *traveled += step;
                *traveled >= *max
            },
            Expiry::Lifetime { elapsed_ms, max_ms } => {
                *elapsed_ms += delta_ms;
                *elapsed_ms >= *max_ms
            },
        };

        let out_of_bounds = self.position.x < -margin
            || self.position.x > level_width + margin
            || self.position.y < -margin
            || self.position.y > level_height + margin;

        if expired || out_of_bounds {
            self.destroy(visual);
        }
        self.active
    }

    /// Remove the projectile. Safe to call more than once.
    pub fn destroy<V: SpawnableVisual>(&mut self, visual: &mut V) {
        if !self.active {
            return;
        }
        self.active = false;
        visual.despawn(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemonsters_core::actor::ActorKind;
    use lemonsters_core::test_helpers::RecordingVisual;

    const LEVEL_W: f32 = 3000.0;
    const LEVEL_H: f32 = 1080.0;

    fn combat() -> CombatConfig {
        CombatConfig::default()
    }

    fn spawn_visual(p: &Projectile, visual: &mut RecordingVisual) {
        visual.spawn(&p.id, ActorKind::Projectile, p.position());
    }

    #[test]
    fn player_shot_expires_on_travel_budget() {
        let mut visual = RecordingVisual::default();
        let mut p = Projectile::player_shot(
            ActorId::from("projectile-player-0"),
            Vec2::new(100.0, 500.0),
            Facing::Right,
            &combat(),
        );
        spawn_visual(&p, &mut visual);

        // 400px/s against an 800px budget: alive through 1900ms
        for _ in 0..19 {
            assert!(p.tick(100.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
        }
        assert!((p.position().x - 860.0).abs() < 0.01);

        assert!(!p.tick(100.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
        assert!(!visual.is_live(&p.id));
    }

    #[test]
    fn player_shot_moves_along_facing() {
        let mut visual = RecordingVisual::default();
        let mut p = Projectile::player_shot(
            ActorId::from("projectile-player-1"),
            Vec2::new(500.0, 500.0),
            Facing::Left,
            &combat(),
        );
        spawn_visual(&p, &mut visual);
        p.tick(1000.0, LEVEL_W, LEVEL_H, 100.0, &mut visual);
        assert_eq!(p.position(), Vec2::new(100.0, 500.0));
    }

    #[test]
    fn bird_drop_falls_and_times_out() {
        let mut visual = RecordingVisual::default();
        let mut p = Projectile::bird_drop(
            ActorId::from("projectile-enemy-0"),
            Vec2::new(600.0, 320.0),
            200.0,
            &combat(),
        );
        spawn_visual(&p, &mut visual);

        assert!(p.tick(1000.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
        assert_eq!(p.position(), Vec2::new(600.0, 520.0), "falls straight down");

        // Lifetime is 5000ms total
        for _ in 0..3 {
            assert!(p.tick(1000.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
        }
        assert!(!p.tick(1000.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
    }

    #[test]
    fn boss_shot_aims_at_target_snapshot() {
        let mut visual = RecordingVisual::default();
        let mut p = Projectile::boss_shot(
            ActorId::from("projectile-boss-0"),
            Vec2::new(0.0, 0.0),
            Vec2::new(300.0, 400.0),
            300.0,
            &combat(),
        );
        spawn_visual(&p, &mut visual);
        p.tick(1000.0, LEVEL_W, LEVEL_H, 100.0, &mut visual);
        assert!((p.position().x - 180.0).abs() < 0.01, "x = {}", p.position().x);
        assert!((p.position().y - 240.0).abs() < 0.01, "y = {}", p.position().y);
    }

    #[test]
    fn boss_shot_at_own_position_holds_still_until_timeout() {
        let mut visual = RecordingVisual::default();
        let muzzle = Vec2::new(2800.0, 700.0);
        let mut p = Projectile::boss_shot(
            ActorId::from("projectile-boss-1"),
            muzzle,
            muzzle,
            300.0,
            &combat(),
        );
        spawn_visual(&p, &mut visual);
        assert!(p.tick(9999.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
        assert_eq!(p.position(), muzzle);
        assert!(!p.tick(1.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
    }

    #[test]
    fn out_of_bounds_culls_before_expiry() {
        let mut visual = RecordingVisual::default();
        let mut p = Projectile::player_shot(
            ActorId::from("projectile-player-2"),
            Vec2::new(2950.0, 500.0),
            Facing::Right,
            &combat(),
        );
        spawn_visual(&p, &mut visual);
        // 500ms moves 200px to x=3150, past width+margin=3100
        assert!(!p.tick(500.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
        assert!(!visual.is_live(&p.id));
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut visual = RecordingVisual::default();
        let mut p = Projectile::player_shot(
            ActorId::from("projectile-player-3"),
            Vec2::new(100.0, 500.0),
            Facing::Right,
            &combat(),
        );
        spawn_visual(&p, &mut visual);
        p.destroy(&mut visual);
        p.destroy(&mut visual);
        assert_eq!(
            visual.despawned.len(),
            1,
            "double destroy must release the visual once"
        );
        assert!(!p.tick(16.0, LEVEL_W, LEVEL_H, 100.0, &mut visual));
    }
}
