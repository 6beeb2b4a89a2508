use rand::Rng;

use lemonsters_core::actor::{ActorId, ActorKind, Facing};
use lemonsters_core::geometry::{Rect, Vec2};
use lemonsters_core::visual::{SpawnableVisual, VisualEffect};

use crate::config::{
    BIRD_DROP_OFFSET_Y, ENEMY_DYING_MS, EnemyConfig, PhysicsConfig, SHARK_DYING_MS,
};
use crate::platform::{ground_at, landing_surface};

/// Two-phase enemy life cycle, advanced by the regular tick.
///
/// Death plays out as a timed `Dying` fade, then either a respawn
/// countdown (bird, shark) or permanent removal (frog, boss). No state
/// change happens outside `tick`, so tests never wait on a clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeState {
    Alive,
    Dying { remaining_ms: f32 },
    WaitingRespawn { remaining_ms: f32 },
    Removed,
}

impl LifeState {
    pub fn is_alive(&self) -> bool {
        matches!(self, LifeState::Alive)
    }
}

/// What an enemy's tick produced, for the world to turn into spawns
/// and events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnemyTick {
    /// Bird released a dropping at this position.
    pub drop_at: Option<Vec2>,
    /// Finished a respawn countdown and is back at its spawn point.
    pub respawned: bool,
    /// Finished dying permanently; the actor can be dropped.
    pub removed: bool,
}

/// Horizontal flyer that reverses at the level edges and releases
/// droppings on a randomized cooldown.
///
/// Defeats are temporary: after the death fade the bird waits out a
/// respawn delay, then returns to its spawn point with its former
/// heading. The drop cooldown freezes while dead rather than resetting.
#[derive(Debug)]
pub struct Bird {
    pub id: ActorId,
    spawn: Vec2,
    position: Vec2,
    direction: Facing,
    drop_timer_ms: f32,
    life: LifeState,
    level_width: f32,
}

impl Bird {
    pub fn new<R: Rng>(
        id: ActorId,
        position: Vec2,
        direction: Facing,
        level_width: f32,
        rng: &mut R,
        enemies: &EnemyConfig,
    ) -> Self {
        Self {
            id,
            spawn: position,
            position,
            direction,
            drop_timer_ms: rng
                .random_range(enemies.bird_drop_cooldown_min_ms..=enemies.bird_drop_cooldown_max_ms),
            life: LifeState::Alive,
            level_width,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_alive()
    }

    /// Unconditional kill. Returns false when the bird is already dead.
    pub fn take_damage<V: SpawnableVisual>(&mut self, visual: &mut V) -> bool {
        if !self.life.is_alive() {
            return false;
        }
        self.life = LifeState::Dying {
            remaining_ms: ENEMY_DYING_MS,
        };
        visual.play_effect(
            &self.id,
            VisualEffect::DeathFade {
                duration_ms: ENEMY_DYING_MS,
            },
        );
        true
    }

    pub fn tick<V: SpawnableVisual, R: Rng>(
        &mut self,
        delta_ms: f32,
        rng: &mut R,
        enemies: &EnemyConfig,
        visual: &mut V,
    ) -> EnemyTick {
        let mut result = EnemyTick::default();
        match self.life {
            LifeState::Alive => {
                // Boundary check precedes movement, so a bird parked on
                // the edge turns before flying further out.
                let at_edge = match self.direction {
                    Facing::Right => self.position.x >= self.level_width,
                    Facing::Left => self.position.x <= 0.0,
                };
                if at_edge {
                    self.direction = self.direction.flipped();
                    visual.set_facing(&self.id, self.direction);
                }

                self.drop_timer_ms -= delta_ms;
                if self.drop_timer_ms <= 0.0 {
                    self.drop_timer_ms = rng.random_range(
                        enemies.bird_drop_cooldown_min_ms..=enemies.bird_drop_cooldown_max_ms,
                    );
                    result.drop_at =
                        Some(Vec2::new(self.position.x, self.position.y + BIRD_DROP_OFFSET_Y));
                }

                self.position.x +=
                    enemies.bird_fly_speed * self.direction.sign() * delta_ms / 1000.0;
                visual.set_position(&self.id, self.position);
            },
            LifeState::Dying { remaining_ms } => {
                let left = remaining_ms - delta_ms;
                if left <= 0.0 {
                    visual.play_effect(&self.id, VisualEffect::Hide);
                    self.life = LifeState::WaitingRespawn {
                        remaining_ms: enemies.respawn_delay_ms,
                    };
                } else {
                    self.life = LifeState::Dying { remaining_ms: left };
                }
            },
            LifeState::WaitingRespawn { remaining_ms } => {
                let left = remaining_ms - delta_ms;
                if left <= 0.0 {
                    self.position = self.spawn;
                    self.life = LifeState::Alive;
                    visual.set_position(&self.id, self.position);
                    visual.set_facing(&self.id, self.direction);
                    visual.play_effect(&self.id, VisualEffect::Show);
                    result.respawned = true;
                } else {
                    self.life = LifeState::WaitingRespawn { remaining_ms: left };
                }
            },
            LifeState::Removed => {},
        }
        result
    }
}

/// Water patroller sweeping between two x bounds.
///
/// Like the bird it comes back after a defeat, but a respawned shark
/// always restarts heading right.
#[derive(Debug)]
pub struct Shark {
    pub id: ActorId,
    spawn: Vec2,
    position: Vec2,
    patrol_start: f32,
    patrol_end: f32,
    direction: Facing,
    life: LifeState,
}

impl Shark {
    pub fn new(id: ActorId, position: Vec2, patrol_start: f32, patrol_end: f32) -> Self {
        Self {
            id,
            spawn: position,
            position,
            patrol_start,
            patrol_end,
            direction: Facing::Right,
            life: LifeState::Alive,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_alive()
    }

    /// Unconditional kill. Returns false when already dead.
    pub fn take_damage<V: SpawnableVisual>(&mut self, visual: &mut V) -> bool {
        if !self.life.is_alive() {
            return false;
        }
        self.life = LifeState::Dying {
            remaining_ms: SHARK_DYING_MS,
        };
        visual.play_effect(
            &self.id,
            VisualEffect::DeathFade {
                duration_ms: SHARK_DYING_MS,
            },
        );
        true
    }

    pub fn tick<V: SpawnableVisual>(
        &mut self,
        delta_ms: f32,
        enemies: &EnemyConfig,
        visual: &mut V,
    ) -> EnemyTick {
        let mut result = EnemyTick::default();
        match self.life {
            LifeState::Alive => {
                let at_boundary = match self.direction {
                    Facing::Right => self.position.x >= self.patrol_end,
                    Facing::Left => self.position.x <= self.patrol_start,
                };
                if at_boundary {
                    self.direction = self.direction.flipped();
                    visual.set_facing(&self.id, self.direction);
                }
                self.position.x +=
                    enemies.shark_patrol_speed * self.direction.sign() * delta_ms / 1000.0;
                visual.set_position(&self.id, self.position);
            },
            LifeState::Dying { remaining_ms } => {
                let left = remaining_ms - delta_ms;
                if left <= 0.0 {
                    visual.play_effect(&self.id, VisualEffect::Hide);
                    self.life = LifeState::WaitingRespawn {
                        remaining_ms: enemies.respawn_delay_ms,
                    };
                } else {
                    self.life = LifeState::Dying { remaining_ms: left };
                }
            },
            LifeState::WaitingRespawn { remaining_ms } => {
                let left = remaining_ms - delta_ms;
                if left <= 0.0 {
                    self.position = self.spawn;
                    self.direction = Facing::Right;
                    self.life = LifeState::Alive;
                    visual.set_position(&self.id, self.position);
                    visual.set_facing(&self.id, self.direction);
                    visual.play_effect(&self.id, VisualEffect::Show);
                    result.respawned = true;
                } else {
                    self.life = LifeState::WaitingRespawn { remaining_ms: left };
                }
            },
            LifeState::Removed => {},
        }
        result
    }
}

/// Ground hopper that lunges toward the player on a fixed cadence,
/// refusing jumps that would carry it over a pit.
///
/// The frog's position is its feet; it integrates its own gravity and
/// lands on whatever platform top its fall crosses. Defeats are
/// permanent for the life of the session (until a respawn sweep
/// restores cleared content).
#[derive(Debug)]
pub struct Frog {
    pub id: ActorId,
    spawn: Vec2,
    position: Vec2,
    velocity: Vec2,
    grounded: bool,
    jump_timer_ms: f32,
    facing: Facing,
    life: LifeState,
}

impl Frog {
    pub fn new(id: ActorId, position: Vec2) -> Self {
        Self {
            id,
            spawn: position,
            position,
            velocity: Vec2::ZERO,
            grounded: true,
            jump_timer_ms: 0.0,
            facing: Facing::Right,
            life: LifeState::Alive,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_alive()
    }

    pub fn is_removed(&self) -> bool {
        self.life == LifeState::Removed
    }

    /// Unconditional kill. Returns false when already dead.
    pub fn take_damage<V: SpawnableVisual>(&mut self, visual: &mut V) -> bool {
        if !self.life.is_alive() {
            return false;
        }
        self.life = LifeState::Dying {
            remaining_ms: ENEMY_DYING_MS,
        };
        visual.play_effect(
            &self.id,
            VisualEffect::DeathFade {
                duration_ms: ENEMY_DYING_MS,
            },
        );
        true
    }

    /// Whether a jump toward `direction` would land over a pit.
    fn pit_ahead(&self, platform_rects: &[Rect], direction: Facing, enemies: &EnemyConfig) -> bool {
        let probe = Vec2::new(
            self.position.x + enemies.frog_pit_probe_distance * direction.sign(),
            self.position.y + enemies.frog_pit_probe_depth,
        );
        !ground_at(platform_rects, probe, enemies.frog_pit_probe_tolerance)
    }

    pub fn tick<V: SpawnableVisual>(
        &mut self,
        delta_ms: f32,
        player_x: f32,
        platform_rects: &[Rect],
        enemies: &EnemyConfig,
        physics: &PhysicsConfig,
        visual: &mut V,
    ) -> EnemyTick {
        let mut result = EnemyTick::default();
        match self.life {
            LifeState::Alive => {
                self.jump_timer_ms += delta_ms;
                if self.jump_timer_ms >= enemies.frog_jump_interval_ms && self.grounded {
                    let direction = if player_x > self.position.x {
                        Facing::Right
                    } else {
                        Facing::Left
                    };
                    // The cadence resets even when the jump is refused,
                    // so a frog at a pit edge keeps re-evaluating at the
                    // same rhythm instead of firing every frame.
                    self.jump_timer_ms = 0.0;
                    if !self.pit_ahead(platform_rects, direction, enemies) {
                        self.velocity =
                            Vec2::new(enemies.frog_jump_speed * direction.sign(), enemies.frog_jump_velocity);
                        self.grounded = false;
                        self.facing = direction;
                        visual.set_facing(&self.id, direction);
                    }
                }

                if !self.grounded {
                    let prev_feet = self.position.y;
                    self.velocity.y += physics.gravity * delta_ms / 1000.0;
                    self.position.x += self.velocity.x * delta_ms / 1000.0;
                    self.position.y += self.velocity.y * delta_ms / 1000.0;
                    if self.velocity.y > 0.0
                        && let Some(top) = landing_surface(
                            platform_rects,
                            self.position.x,
                            prev_feet,
                            self.position.y,
                        )
                    {
                        self.position.y = top;
                        self.velocity = Vec2::ZERO;
                        self.grounded = true;
                    }
                    visual.set_position(&self.id, self.position);
                }
            },
            LifeState::Dying { remaining_ms } => {
                let left = remaining_ms - delta_ms;
                if left <= 0.0 {
                    self.life = LifeState::Removed;
                    visual.despawn(&self.id);
                    result.removed = true;
                } else {
                    self.life = LifeState::Dying { remaining_ms: left };
                }
            },
            LifeState::WaitingRespawn { .. } | LifeState::Removed => {},
        }
        result
    }

    /// Put the frog back at its spawn point, alive and settled. Used by
    /// the respawn sweep that restores cleared content.
    pub fn restore<V: SpawnableVisual>(&mut self, visual: &mut V) {
        let was_removed = self.life == LifeState::Removed;
        self.life = LifeState::Alive;
        self.position = self.spawn;
        self.velocity = Vec2::ZERO;
        self.grounded = true;
        self.jump_timer_ms = 0.0;
        if was_removed {
            visual.spawn(&self.id, ActorKind::Frog, self.position);
        } else {
            visual.set_position(&self.id, self.position);
            visual.play_effect(&self.id, VisualEffect::Show);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemonsters_core::test_helpers::{RecordingVisual, run_ticks};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const LEVEL_WIDTH: f32 = 3000.0;

    fn enemies() -> EnemyConfig {
        EnemyConfig::default()
    }

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn bird(rng: &mut StdRng) -> Bird {
        Bird::new(
            ActorId::from("bird-0"),
            Vec2::new(600.0, 300.0),
            Facing::Right,
            LEVEL_WIDTH,
            rng,
            &enemies(),
        )
    }

    #[test]
    fn bird_flies_and_reverses_at_level_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut visual = RecordingVisual::default();
        let mut b = Bird::new(
            ActorId::from("bird-0"),
            Vec2::new(2990.0, 300.0),
            Facing::Right,
            LEVEL_WIDTH,
            &mut rng,
            &enemies(),
        );

        // 100px/s: reaches x=3000 after 100ms, then the next tick flips
        b.tick(100.0, &mut rng, &enemies(), &mut visual);
        assert_eq!(b.direction(), Facing::Right);
        assert!((b.position().x - 3000.0).abs() < 0.01);

        b.tick(100.0, &mut rng, &enemies(), &mut visual);
        assert_eq!(b.direction(), Facing::Left, "reversed at the right edge");
        assert!(b.position().x < 3000.0);
    }

    #[test]
    fn bird_drop_cadence_resamples_within_the_configured_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut visual = RecordingVisual::default();
        let mut b = bird(&mut rng);
        let cfg = enemies();

        let mut drops = 0;
        run_ticks(60_000.0, 16.0, |delta| {
            let out = b.tick(delta, &mut rng, &cfg, &mut visual);
            if let Some(at) = out.drop_at {
                drops += 1;
                assert!(
                    (at.y - (b.position().y + BIRD_DROP_OFFSET_Y)).abs() < 0.01,
                    "dropping released just below the bird"
                );
            }
        });
        // Cooldowns are uniform in [2000, 5000]; a minute of flight
        // must produce somewhere between 12 and 30 drops.
        assert!((12..=30).contains(&drops), "drops = {drops}");
    }

    #[test]
    fn bird_respawns_with_heading_and_cooldown_intact() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut visual = RecordingVisual::default();
        let cfg = enemies();
        let mut b = bird(&mut rng);

        // Fly left for a while so the preserved heading is observable.
        b.tick(100.0, &mut rng, &cfg, &mut visual);
        let heading = b.direction();

        assert!(b.take_damage(&mut visual));
        assert!(!b.take_damage(&mut visual), "second hit while dying ignored");
        assert!(!b.is_alive());

        // 500ms dying, then 3000ms respawn wait
        b.tick(500.0, &mut rng, &cfg, &mut visual);
        assert!(!b.is_alive());
        let out = b.tick(3000.0, &mut rng, &cfg, &mut visual);
        assert!(out.respawned);
        assert!(b.is_alive());
        assert_eq!(b.position(), Vec2::new(600.0, 300.0), "back at spawn");
        assert_eq!(b.direction(), heading, "heading survives the respawn");
    }

    #[test]
    fn bird_drop_timer_freezes_while_dead() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut visual = RecordingVisual::default();
        let cfg = enemies();
        let mut b = bird(&mut rng);

        // Run the cooldown down to just short of a drop.
        let mut remaining_before_death = None;
        for _ in 0..100 {
            let out = b.tick(16.0, &mut rng, &cfg, &mut visual);
            if out.drop_at.is_some() {
                remaining_before_death = Some(());
                break;
            }
        }
        // Whether or not a drop fired, kill and run the full dead window.
        let _ = remaining_before_death;
        b.take_damage(&mut visual);
        for _ in 0..220 {
            b.tick(16.0, &mut rng, &cfg, &mut visual);
        }
        assert!(b.is_alive(), "3520ms covers dying + respawn wait");
        // A freshly respawned bird must not instantly dump a backlog of
        // drops: the first post-respawn tick yields at most one.
        let out = b.tick(16.0, &mut rng, &cfg, &mut visual);
        let immediate = out.drop_at.is_some() as u32;
        assert!(immediate <= 1);
    }

    #[test]
    fn shark_patrols_between_bounds() {
        let mut visual = RecordingVisual::default();
        let cfg = enemies();
        let mut s = Shark::new(ActorId::from("shark-0"), Vec2::new(900.0, 960.0), 800.0, 1100.0);

        // 80px/s heading right: 2.5s to reach x=1100
        s.tick(2500.0, &cfg, &mut visual);
        assert!((s.position().x - 1100.0).abs() < 0.01);
        assert_eq!(s.direction(), Facing::Right, "flip happens next tick");

        s.tick(1000.0, &cfg, &mut visual);
        assert_eq!(s.direction(), Facing::Left);
        assert!((s.position().x - 1020.0).abs() < 0.01);
    }

    #[test]
    fn shark_respawn_resets_heading_right() {
        let mut visual = RecordingVisual::default();
        let cfg = enemies();
        let mut s = Shark::new(ActorId::from("shark-0"), Vec2::new(900.0, 960.0), 800.0, 1100.0);

        // Reach the right bound and flip to Left.
        s.tick(2500.0, &cfg, &mut visual);
        s.tick(1000.0, &cfg, &mut visual);
        assert_eq!(s.direction(), Facing::Left);

        s.take_damage(&mut visual);
        s.tick(800.0, &cfg, &mut visual);
        let out = s.tick(3000.0, &cfg, &mut visual);
        assert!(out.respawned);
        assert_eq!(s.position(), Vec2::new(900.0, 960.0));
        assert_eq!(s.direction(), Facing::Right, "respawn restarts rightward");
    }

    #[test]
    fn frog_jumps_toward_player_on_cadence() {
        let mut visual = RecordingVisual::default();
        let cfg = enemies();
        let phys = physics();
        let ground = [Rect::new(0.0, 1000.0, 3000.0, 80.0)];
        let mut f = Frog::new(ActorId::from("frog-0"), Vec2::new(1200.0, 1000.0));

        // Not yet at the 2000ms cadence: stays put.
        f.tick(1999.0, 300.0, &ground, &cfg, &phys, &mut visual);
        assert_eq!(f.position(), Vec2::new(1200.0, 1000.0));

        // Cadence reached; player is to the left.
        f.tick(1.0, 300.0, &ground, &cfg, &phys, &mut visual);
        assert!(f.position().x < 1200.0, "launched toward the player");
        assert_eq!(visual.facings[&f.id], Facing::Left);

        // Let it land again: it must settle back on the ground top.
        run_ticks(1920.0, 16.0, |delta| {
            f.tick(delta, 300.0, &ground, &cfg, &phys, &mut visual);
        });
        assert_eq!(f.position().y, 1000.0, "feet settle on the surface");
    }

    #[test]
    fn frog_refuses_to_jump_into_a_pit() {
        let mut visual = RecordingVisual::default();
        let cfg = enemies();
        let phys = physics();
        // Platform ends at x=1250; a rightward jump probes x+64 = 1264: pit.
        let ground = [Rect::new(1000.0, 1000.0, 250.0, 80.0)];
        let mut f = Frog::new(ActorId::from("frog-0"), Vec2::new(1200.0, 1000.0));

        f.tick(2000.0, 2500.0, &ground, &cfg, &phys, &mut visual);
        assert_eq!(
            f.position(),
            Vec2::new(1200.0, 1000.0),
            "jump refused at the pit edge"
        );

        // The player moves to the safe side; next cadence the frog goes.
        f.tick(2000.0, 100.0, &ground, &cfg, &phys, &mut visual);
        assert!(f.position().x < 1200.0, "leftward jump is safe");
    }

    #[test]
    fn frog_defeat_is_permanent_until_restored() {
        let mut visual = RecordingVisual::default();
        let cfg = enemies();
        let phys = physics();
        let ground = [Rect::new(0.0, 1000.0, 3000.0, 80.0)];
        let mut f = Frog::new(ActorId::from("frog-0"), Vec2::new(1200.0, 1000.0));
        visual.spawn(&f.id, ActorKind::Frog, f.position());

        assert!(f.take_damage(&mut visual));
        let out = f.tick(500.0, 300.0, &ground, &cfg, &phys, &mut visual);
        assert!(out.removed);
        assert!(f.is_removed());
        assert!(!visual.is_live(&f.id));

        // A long wait changes nothing: no respawn cycle for frogs.
        let out = f.tick(10_000.0, 300.0, &ground, &cfg, &phys, &mut visual);
        assert!(!out.respawned && !out.removed);
        assert!(f.is_removed());

        f.restore(&mut visual);
        assert!(f.is_alive());
        assert!(visual.is_live(&f.id), "restore respawns the visual");
        assert_eq!(f.position(), Vec2::new(1200.0, 1000.0));
    }
}
