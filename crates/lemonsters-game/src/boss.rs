use lemonsters_core::actor::ActorId;
use lemonsters_core::events::BossPhase;
use lemonsters_core::geometry::Vec2;
use lemonsters_core::visual::{SpawnableVisual, VisualEffect};

use crate::config::{BOSS_DYING_MS, BossConfig};

/// Boss life cycle. Defeat is one-way: the boss fades out over a timed
/// window and only despawns when that window elapses.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BossLife {
    Active,
    Dying { remaining_ms: f32 },
    Removed,
}

/// What a boss tick produced, for the world to turn into projectile
/// spawns and events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BossTick {
    /// Fire one shot aimed at this snapshot of the player's position.
    pub shot_target: Option<Vec2>,
    /// The attack phase flipped this tick.
    pub phase_changed: Option<BossPhase>,
    /// The death fade finished; the actor can be dropped.
    pub removed: bool,
}

/// Result of a successful hit on the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossHit {
    pub health: u32,
    pub defeated: bool,
}

/// The arena boss: a stationary turret alternating between a burst of
/// aimed shots and a vulnerable pause.
///
/// The cadence is a pure function of accumulated delta time. Each tick
/// decrements one cooldown; in `Burst` each expiry fires one shot until
/// the burst count is spent, then the boss pauses; the pause expiry
/// re-enters `Burst` with a zero cooldown so the first shot of a burst
/// fires on the same tick the phase flips.
#[derive(Debug)]
pub struct Boss {
    pub id: ActorId,
    position: Vec2,
    health: u32,
    phase: BossPhase,
    burst_shots_fired: u32,
    phase_cooldown_ms: f32,
    vulnerable: bool,
    life: BossLife,
}

impl Boss {
    pub fn new(id: ActorId, position: Vec2, boss: &BossConfig) -> Self {
        Self {
            id,
            position,
            health: boss.max_health,
            phase: BossPhase::Pause,
            burst_shots_fired: 0,
            phase_cooldown_ms: boss.pause_duration_ms,
            vulnerable: true,
            life: BossLife::Active,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.life == BossLife::Active
    }

    pub fn is_removed(&self) -> bool {
        self.life == BossLife::Removed
    }

    /// Advance the attack cadence or the death fade.
    pub fn tick<V: SpawnableVisual>(
        &mut self,
        delta_ms: f32,
        player_position: Vec2,
        boss: &BossConfig,
        visual: &mut V,
    ) -> BossTick {
        let mut result = BossTick::default();
        match self.life {
            BossLife::Active => {
                self.phase_cooldown_ms -= delta_ms;

                if self.phase == BossPhase::Pause && self.phase_cooldown_ms <= 0.0 {
                    self.phase = BossPhase::Burst;
                    self.burst_shots_fired = 0;
                    self.phase_cooldown_ms = 0.0;
                    result.phase_changed = Some(BossPhase::Burst);
                    tracing::debug!(boss = %self.id, "Boss entering burst phase");
                }

                if self.phase == BossPhase::Burst && self.phase_cooldown_ms <= 0.0 {
                    if self.burst_shots_fired < boss.burst_shot_count {
                        result.shot_target = Some(player_position);
                        self.burst_shots_fired += 1;
                        self.phase_cooldown_ms = boss.burst_shot_interval_ms;
                    } else {
                        self.phase = BossPhase::Pause;
                        self.phase_cooldown_ms = boss.pause_duration_ms;
                        result.phase_changed = Some(BossPhase::Pause);
                        tracing::debug!(boss = %self.id, "Boss entering pause phase");
                    }
                }
            },
            BossLife::Dying { remaining_ms } => {
                let left = remaining_ms - delta_ms;
                if left <= 0.0 {
                    self.life = BossLife::Removed;
                    visual.despawn(&self.id);
                    result.removed = true;
                } else {
                    self.life = BossLife::Dying { remaining_ms: left };
                }
            },
            BossLife::Removed => {},
        }
        result
    }

    /// Apply damage. Returns `None` when the boss is dead or shielded;
    /// the health clamp and the defeat transition are one-way.
    pub fn take_damage<V: SpawnableVisual>(
        &mut self,
        amount: u32,
        visual: &mut V,
    ) -> Option<BossHit> {
        if self.life != BossLife::Active || !self.vulnerable {
            return None;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.vulnerable = false;
            self.life = BossLife::Dying {
                remaining_ms: BOSS_DYING_MS,
            };
            visual.play_effect(
                &self.id,
                VisualEffect::DeathFade {
                    duration_ms: BOSS_DYING_MS,
                },
            );
            tracing::debug!(boss = %self.id, "Boss defeated");
            Some(BossHit {
                health: 0,
                defeated: true,
            })
        } else {
            visual.play_effect(&self.id, VisualEffect::DamageFlash);
            Some(BossHit {
                health: self.health,
                defeated: false,
            })
        }
    }
}
