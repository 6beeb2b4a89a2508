use lemonsters_core::actor::{ActorId, Facing};
use lemonsters_core::geometry::Vec2;
use lemonsters_core::visual::{SpawnableVisual, VisualEffect};

use crate::config::CombatConfig;

/// Player life cycle. `Dead` is a timed window during which the world
/// skips the player's update and ignores player-facing collisions;
/// `GameOver` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerLife {
    Alive,
    Dead { remaining_ms: f32 },
    GameOver,
}

/// Per-frame player data the host's physics engine owns: where the
/// body ended up and how it is moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerFrame {
    pub position: Vec2,
    pub velocity_y: f32,
    pub facing: Facing,
}

/// The player's gameplay-side state: life window, invincibility,
/// shoot cooldown, and wizard-hat possession.
///
/// Movement itself is host-integrated; each tick the host hands over
/// the body's frame data and this struct layers the combat state on
/// top. The lives counter lives in the session, never here.
#[derive(Debug)]
pub struct Player {
    pub id: ActorId,
    position: Vec2,
    velocity_y: f32,
    facing: Facing,
    has_hat: bool,
    shoot_cooldown_ms: f32,
    invincibility_ms: f32,
    life: PlayerLife,
}

impl Player {
    pub fn new(id: ActorId, start: Vec2) -> Self {
        Self {
            id,
            position: start,
            velocity_y: 0.0,
            facing: Facing::Right,
            has_hat: false,
            shoot_cooldown_ms: 0.0,
            invincibility_ms: 0.0,
            life: PlayerLife::Alive,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn life(&self) -> PlayerLife {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == PlayerLife::Alive
    }

    /// Alive and outside the invincibility window.
    pub fn is_vulnerable(&self) -> bool {
        self.is_alive() && self.invincibility_ms <= 0.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_ms > 0.0
    }

    pub fn has_hat(&self) -> bool {
        self.has_hat
    }

    pub fn give_hat(&mut self) {
        self.has_hat = true;
    }

    /// Adopt the host-integrated frame data. Ignored while dead; the
    /// body is frozen on the death spot until the respawn teleport.
    pub fn sync_frame(&mut self, frame: &PlayerFrame) {
        if !self.is_alive() {
            return;
        }
        self.position = frame.position;
        self.velocity_y = frame.velocity_y;
        self.facing = frame.facing;
    }

    /// Advance the countdown windows. Returns true on the tick the
    /// dead window expires, exactly once; the world then respawns.
    pub fn tick(&mut self, delta_ms: f32) -> bool {
        if self.invincibility_ms > 0.0 {
            self.invincibility_ms = (self.invincibility_ms - delta_ms).max(0.0);
        }
        if self.shoot_cooldown_ms > 0.0 {
            self.shoot_cooldown_ms = (self.shoot_cooldown_ms - delta_ms).max(0.0);
        }
        if let PlayerLife::Dead { remaining_ms } = self.life {
            let left = remaining_ms - delta_ms;
            if left <= 0.0 {
                return true;
            }
            self.life = PlayerLife::Dead { remaining_ms: left };
        }
        false
    }

    /// Enter the dead window. The caller has already taken the life
    /// from the session and confirmed lives remain.
    pub fn kill<V: SpawnableVisual>(&mut self, respawn_delay_ms: f32, visual: &mut V) {
        self.life = PlayerLife::Dead {
            remaining_ms: respawn_delay_ms,
        };
        visual.play_effect(&self.id, VisualEffect::DamageFlash);
        visual.play_effect(&self.id, VisualEffect::Hide);
        tracing::debug!(player = %self.id, "Player died");
    }

    /// Terminal transition; no respawn follows.
    pub fn set_game_over<V: SpawnableVisual>(&mut self, visual: &mut V) {
        self.life = PlayerLife::GameOver;
        visual.play_effect(&self.id, VisualEffect::DamageFlash);
        visual.play_effect(&self.id, VisualEffect::Hide);
    }

    /// Teleport back into play: hat stripped, invincibility granted.
    pub fn respawn<V: SpawnableVisual>(
        &mut self,
        position: Vec2,
        invincibility_ms: f32,
        visual: &mut V,
    ) {
        self.life = PlayerLife::Alive;
        self.position = position;
        self.velocity_y = 0.0;
        self.has_hat = false;
        self.invincibility_ms = invincibility_ms;
        visual.set_position(&self.id, position);
        visual.play_effect(&self.id, VisualEffect::Show);
        visual.play_effect(
            &self.id,
            VisualEffect::InvincibilityFlash {
                duration_ms: invincibility_ms,
            },
        );
        tracing::debug!(player = %self.id, x = position.x, y = position.y, "Player respawned");
    }

    /// Attempt to fire: needs the hat, a cold cooldown, and a live
    /// player. On success the cooldown restarts and the caller spawns
    /// the projectile.
    pub fn try_shoot(&mut self, combat: &CombatConfig) -> bool {
        if !self.is_alive() || !self.has_hat || self.shoot_cooldown_ms > 0.0 {
            return false;
        }
        self.shoot_cooldown_ms = combat.shoot_cooldown_ms;
        true
    }

    /// Whether contact with an enemy at `enemy_y` counts as a stomp:
    /// the player is falling and its center is above the enemy's.
    pub fn is_stomping(&self, enemy_y: f32) -> bool {
        self.velocity_y > 0.0 && self.position.y < enemy_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemonsters_core::test_helpers::RecordingVisual;

    fn player() -> Player {
        Player::new(ActorId::from("player"), Vec2::new(100.0, 900.0))
    }

    fn frame(x: f32, y: f32, velocity_y: f32) -> PlayerFrame {
        PlayerFrame {
            position: Vec2::new(x, y),
            velocity_y,
            facing: Facing::Right,
        }
    }

    #[test]
    fn dead_window_expires_exactly_once() {
        let mut visual = RecordingVisual::default();
        let mut p = player();
        p.kill(2000.0, &mut visual);
        assert!(!p.is_alive());

        assert!(!p.tick(1999.0));
        assert!(p.tick(1.0), "window expires at exactly 2000ms");
        // Still dead until the world performs the respawn.
        assert!(!p.is_alive());
    }

    #[test]
    fn respawn_strips_hat_and_grants_invincibility() {
        let mut visual = RecordingVisual::default();
        let mut p = player();
        p.give_hat();
        p.kill(2000.0, &mut visual);
        p.tick(2000.0);

        p.respawn(Vec2::new(1500.0, 950.0), 1000.0, &mut visual);
        assert!(p.is_alive());
        assert!(!p.has_hat(), "hat stripped on respawn");
        assert!(p.is_invincible());
        assert!(!p.is_vulnerable());
        assert_eq!(p.position(), Vec2::new(1500.0, 950.0));
        assert_eq!(
            visual.effect_count(
                &p.id,
                VisualEffect::InvincibilityFlash {
                    duration_ms: 1000.0
                }
            ),
            1
        );

        p.tick(999.0);
        assert!(!p.is_vulnerable());
        p.tick(1.0);
        assert!(p.is_vulnerable(), "window closes at exactly 1000ms");
    }

    #[test]
    fn frame_sync_is_frozen_while_dead() {
        let mut visual = RecordingVisual::default();
        let mut p = player();
        p.sync_frame(&frame(250.0, 800.0, 0.0));
        assert_eq!(p.position(), Vec2::new(250.0, 800.0));

        p.kill(2000.0, &mut visual);
        p.sync_frame(&frame(999.0, 999.0, 0.0));
        assert_eq!(p.position(), Vec2::new(250.0, 800.0), "dead body stays put");
    }

    #[test]
    fn shooting_needs_hat_and_cooldown() {
        let combat = CombatConfig::default();
        let mut p = player();
        assert!(!p.try_shoot(&combat), "no hat, no shot");

        p.give_hat();
        assert!(p.try_shoot(&combat));
        assert!(!p.try_shoot(&combat), "cooldown hot");

        p.tick(combat.shoot_cooldown_ms);
        assert!(p.try_shoot(&combat), "cooldown elapsed");
    }

    #[test]
    fn dead_player_cannot_shoot() {
        let mut visual = RecordingVisual::default();
        let combat = CombatConfig::default();
        let mut p = player();
        p.give_hat();
        p.kill(2000.0, &mut visual);
        assert!(!p.try_shoot(&combat));
    }

    #[test]
    fn stomp_requires_falling_from_above() {
        let mut p = player();
        p.sync_frame(&frame(600.0, 940.0, 120.0));
        assert!(p.is_stomping(960.0), "falling onto the enemy");

        p.sync_frame(&frame(600.0, 940.0, -120.0));
        assert!(!p.is_stomping(960.0), "rising is not a stomp");

        p.sync_frame(&frame(600.0, 980.0, 120.0));
        assert!(!p.is_stomping(960.0), "below the enemy is not a stomp");
    }

    #[test]
    fn game_over_is_absorbing() {
        let mut visual = RecordingVisual::default();
        let mut p = player();
        p.set_game_over(&mut visual);
        assert_eq!(p.life(), PlayerLife::GameOver);
        assert!(!p.tick(10_000.0), "no respawn ever fires");
        assert_eq!(p.life(), PlayerLife::GameOver);
    }
}
