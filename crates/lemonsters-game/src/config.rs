use serde::{Deserialize, Serialize};

/// Max horizontal run speed (px/s).
pub const PLAYER_SPEED: f32 = 200.0;
/// Jump impulse (px/s, negative = upward).
pub const PLAYER_JUMP_VELOCITY: f32 = -500.0;
/// Horizontal acceleration/deceleration rate (px/s^2).
pub const PLAYER_ACCELERATION: f32 = 600.0;
/// Lives at session start.
pub const PLAYER_MAX_LIVES: u32 = 3;
/// Post-respawn invincibility window (ms).
pub const PLAYER_INVINCIBILITY_MS: f32 = 1000.0;
/// Delay between death and respawn (ms).
pub const PLAYER_RESPAWN_DELAY_MS: f32 = 2000.0;
/// Upward velocity granted when stomping an enemy (px/s).
pub const STOMP_BOUNCE_VELOCITY: f32 = -300.0;

/// Minimum gap between player shots (ms).
pub const SHOOT_COOLDOWN_MS: f32 = 1000.0;
/// Player projectile speed (px/s).
pub const PROJECTILE_SPEED: f32 = 400.0;
/// Player projectile travel budget before auto-destroy (px).
pub const PROJECTILE_MAX_DISTANCE: f32 = 800.0;
/// Enemy projectile lifetime (ms).
pub const ENEMY_PROJECTILE_LIFETIME_MS: f32 = 5000.0;
/// Boss projectile lifetime (ms).
pub const BOSS_PROJECTILE_LIFETIME_MS: f32 = 10_000.0;
/// Distance past the level edge at which projectiles are culled (px).
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 100.0;

/// Bird horizontal fly speed (px/s).
pub const BIRD_FLY_SPEED: f32 = 100.0;
/// Bird dropping cooldown lower bound (ms).
pub const BIRD_DROP_COOLDOWN_MIN_MS: f32 = 2000.0;
/// Bird dropping cooldown upper bound (ms).
pub const BIRD_DROP_COOLDOWN_MAX_MS: f32 = 5000.0;
/// Bird dropping fall speed (px/s).
pub const BIRD_DROP_SPEED: f32 = 200.0;
/// Dropping spawn offset below the bird (px).
pub const BIRD_DROP_OFFSET_Y: f32 = 20.0;
/// Shark horizontal patrol speed (px/s).
pub const SHARK_PATROL_SPEED: f32 = 80.0;
/// Half-width of a shark's default patrol range when the level omits one (px).
pub const SHARK_DEFAULT_PATROL_HALF_RANGE: f32 = 100.0;
/// Gap between frog jump attempts (ms).
pub const FROG_JUMP_INTERVAL_MS: f32 = 2000.0;
/// Frog horizontal jump speed (px/s).
pub const FROG_JUMP_SPEED: f32 = 150.0;
/// Frog jump impulse (px/s, negative = upward).
pub const FROG_JUMP_VELOCITY: f32 = -350.0;
/// How far ahead a frog probes for ground before jumping (px).
pub const FROG_PIT_PROBE_DISTANCE: f32 = 64.0;
/// How far below its feet the frog's ground probe reaches (px).
pub const FROG_PIT_PROBE_DEPTH: f32 = 40.0;
/// Vertical tolerance under a platform top that still counts as ground (px).
pub const FROG_PIT_PROBE_TOLERANCE: f32 = 50.0;
/// Delay before a defeated bird or shark respawns (ms).
pub const ENEMY_RESPAWN_DELAY_MS: f32 = 3000.0;

/// Boss starting health.
pub const BOSS_MAX_HEALTH: u32 = 10;
/// Shots per burst.
pub const BOSS_BURST_SHOT_COUNT: u32 = 5;
/// Gap between shots within a burst (ms).
pub const BOSS_BURST_SHOT_INTERVAL_MS: f32 = 300.0;
/// Vulnerable pause between burst cycles (ms).
pub const BOSS_PAUSE_DURATION_MS: f32 = 2000.0;
/// Boss projectile speed (px/s).
pub const BOSS_PROJECTILE_SPEED: f32 = 300.0;

/// Moving platform traversal speed (px/s).
pub const MOVING_PLATFORM_SPEED: f32 = 50.0;

/// Downward acceleration (px/s^2).
pub const GRAVITY: f32 = 800.0;

/// Frames of jump input buffering at the target frame rate.
pub const JUMP_BUFFER_FRAMES: u32 = 5;
/// Jump allowance after walking off a ledge (ms).
pub const COYOTE_TIME_MS: f32 = 100.0;
/// Frame rate the buffer window is derived from.
pub const TARGET_FPS: f32 = 60.0;

/// Death fade window for birds and frogs (ms).
pub const ENEMY_DYING_MS: f32 = 500.0;
/// Death fade window for sharks (ms).
pub const SHARK_DYING_MS: f32 = 800.0;
/// Death fade window for the boss (ms).
pub const BOSS_DYING_MS: f32 = 2000.0;
/// Collection fade window for coins (ms).
pub const COIN_FADE_MS: f32 = 200.0;

/// Player movement and lives parameters, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub jump_velocity: f32,
    pub acceleration: f32,
    pub max_lives: u32,
    pub invincibility_ms: f32,
    pub respawn_delay_ms: f32,
    pub stomp_bounce_velocity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            jump_velocity: PLAYER_JUMP_VELOCITY,
            acceleration: PLAYER_ACCELERATION,
            max_lives: PLAYER_MAX_LIVES,
            invincibility_ms: PLAYER_INVINCIBILITY_MS,
            respawn_delay_ms: PLAYER_RESPAWN_DELAY_MS,
            stomp_bounce_velocity: STOMP_BOUNCE_VELOCITY,
        }
    }
}

/// Shooting and projectile parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub shoot_cooldown_ms: f32,
    pub projectile_speed: f32,
    pub projectile_max_distance: f32,
    pub enemy_projectile_lifetime_ms: f32,
    pub boss_projectile_lifetime_ms: f32,
    pub bounds_margin: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            shoot_cooldown_ms: SHOOT_COOLDOWN_MS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_max_distance: PROJECTILE_MAX_DISTANCE,
            enemy_projectile_lifetime_ms: ENEMY_PROJECTILE_LIFETIME_MS,
            boss_projectile_lifetime_ms: BOSS_PROJECTILE_LIFETIME_MS,
            bounds_margin: PROJECTILE_BOUNDS_MARGIN,
        }
    }
}

/// Enemy behavior parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub bird_fly_speed: f32,
    pub bird_drop_cooldown_min_ms: f32,
    pub bird_drop_cooldown_max_ms: f32,
    pub bird_drop_speed: f32,
    pub shark_patrol_speed: f32,
    pub frog_jump_interval_ms: f32,
    pub frog_jump_speed: f32,
    pub frog_jump_velocity: f32,
    pub frog_pit_probe_distance: f32,
    pub frog_pit_probe_depth: f32,
    pub frog_pit_probe_tolerance: f32,
    pub respawn_delay_ms: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            bird_fly_speed: BIRD_FLY_SPEED,
            bird_drop_cooldown_min_ms: BIRD_DROP_COOLDOWN_MIN_MS,
            bird_drop_cooldown_max_ms: BIRD_DROP_COOLDOWN_MAX_MS,
            bird_drop_speed: BIRD_DROP_SPEED,
            shark_patrol_speed: SHARK_PATROL_SPEED,
            frog_jump_interval_ms: FROG_JUMP_INTERVAL_MS,
            frog_jump_speed: FROG_JUMP_SPEED,
            frog_jump_velocity: FROG_JUMP_VELOCITY,
            frog_pit_probe_distance: FROG_PIT_PROBE_DISTANCE,
            frog_pit_probe_depth: FROG_PIT_PROBE_DEPTH,
            frog_pit_probe_tolerance: FROG_PIT_PROBE_TOLERANCE,
            respawn_delay_ms: ENEMY_RESPAWN_DELAY_MS,
        }
    }
}

/// World dynamics parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub moving_platform_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            moving_platform_speed: MOVING_PLATFORM_SPEED,
        }
    }
}

/// Boss fight parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_health: u32,
    pub burst_shot_count: u32,
    pub burst_shot_interval_ms: f32,
    pub pause_duration_ms: f32,
    pub projectile_speed: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: BOSS_MAX_HEALTH,
            burst_shot_count: BOSS_BURST_SHOT_COUNT,
            burst_shot_interval_ms: BOSS_BURST_SHOT_INTERVAL_MS,
            pause_duration_ms: BOSS_PAUSE_DURATION_MS,
            projectile_speed: BOSS_PROJECTILE_SPEED,
        }
    }
}

/// Jump input feel parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub jump_buffer_frames: u32,
    pub coyote_time_ms: f32,
    pub target_fps: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            jump_buffer_frames: JUMP_BUFFER_FRAMES,
            coyote_time_ms: COYOTE_TIME_MS,
            target_fps: TARGET_FPS,
        }
    }
}

/// Top-level gameplay configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameplayConfig {
    pub player: PlayerConfig,
    pub combat: CombatConfig,
    pub enemies: EnemyConfig,
    pub boss: BossConfig,
    pub physics: PhysicsConfig,
    pub input: InputConfig,
}

impl GameplayConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("LEMONSTERS_GAMEPLAY_CONFIG")
            .unwrap_or_else(|_| "config/gameplay.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<GameplayConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    GameplayConfig::default()
                },
            },
            Err(_) => GameplayConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let cfg = GameplayConfig::default();
        assert_eq!(cfg.player.speed, PLAYER_SPEED);
        assert_eq!(cfg.player.max_lives, PLAYER_MAX_LIVES);
        assert_eq!(cfg.combat.projectile_max_distance, PROJECTILE_MAX_DISTANCE);
        assert_eq!(cfg.boss.burst_shot_count, BOSS_BURST_SHOT_COUNT);
        assert_eq!(cfg.enemies.respawn_delay_ms, ENEMY_RESPAWN_DELAY_MS);
        assert_eq!(cfg.physics.gravity, GRAVITY);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: GameplayConfig = toml::from_str(
            r#"
            [boss]
            max_health = 20

            [enemies]
            shark_patrol_speed = 120.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.boss.max_health, 20);
        assert_eq!(cfg.enemies.shark_patrol_speed, 120.0);
        assert_eq!(cfg.boss.pause_duration_ms, BOSS_PAUSE_DURATION_MS);
        assert_eq!(cfg.player.speed, PLAYER_SPEED);
    }
}
