use rand::Rng;

use lemonsters_core::actor::{ActorId, ActorKind, Facing};
use lemonsters_core::geometry::{Rect, Vec2};
use lemonsters_core::level::{EnemyKind, LevelData, PlatformKind, PowerUpKind};
use lemonsters_core::visual::SpawnableVisual;

use crate::boss::Boss;
use crate::config::GameplayConfig;
use crate::enemy::{Bird, Frog, Shark};
use crate::pickups::{Checkpoint, Coin, WizardHat};
use crate::platform::{MovingPlatform, Platform};
use crate::player::Player;
use crate::projectile::Projectile;

/// Errors raised when level data names a placement the factory cannot
/// build. These are hard errors: a level that trips one is broken, not
/// a runtime condition to degrade around.
#[derive(Debug, PartialEq, Eq)]
pub enum SpawnError {
    /// A moving platform needs a path of at least two waypoints.
    MovingPlatformPath { index: usize },
    /// A shark's patrol start must lie left of its end.
    InvertedPatrolBounds { index: usize },
    /// A bird's fly direction must be a nonzero sign.
    ZeroFlyDirection { index: usize },
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MovingPlatformPath { index } => {
                write!(f, "moving platform {index} needs a path of at least two waypoints")
            },
            Self::InvertedPatrolBounds { index } => {
                write!(f, "enemy {index} has an inverted patrol range")
            },
            Self::ZeroFlyDirection { index } => {
                write!(f, "enemy {index} has a zero fly direction")
            },
        }
    }
}

impl std::error::Error for SpawnError {}

/// Everything the factory built from one level document.
#[derive(Debug)]
pub struct LevelActors {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub birds: Vec<Bird>,
    pub sharks: Vec<Shark>,
    pub frogs: Vec<Frog>,
    pub coins: Vec<Coin>,
    pub checkpoints: Vec<Checkpoint>,
    pub hats: Vec<WizardHat>,
    pub boss: Option<Boss>,
}

/// Builds actors from level data and mints runtime projectiles.
///
/// Level actors get deterministic ids in placement order ("bird-0",
/// "coin-3"), so the same document always yields the same ids and the
/// suppression sets survive a rebuild. Projectile counters live here
/// and keep increasing for the life of the world.
#[derive(Debug, Default)]
pub struct EntityFactory {
    player_shots: u32,
    enemy_shots: u32,
    boss_shots: u32,
}

impl EntityFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct every placement in the level, announcing each actor
    /// through the spawn seam. Platform visuals are host-rendered from
    /// the level document itself; moving platforms still mirror their
    /// position through the seam under their deterministic ids.
    pub fn build_level<V: SpawnableVisual, R: Rng>(
        &mut self,
        level: &LevelData,
        config: &GameplayConfig,
        rng: &mut R,
        visual: &mut V,
    ) -> Result<LevelActors, SpawnError> {
        let player_id = ActorId::from("player");
        visual.spawn(&player_id, ActorKind::Player, level.player_start);
        let player = Player::new(player_id, level.player_start);

        let mut platforms = Vec::new();
        let mut moving_platforms = Vec::new();
        for (i, data) in level.platforms.iter().enumerate() {
            match data.kind {
                PlatformKind::Static => {
                    platforms.push(Platform::new(
                        ActorId::new(format!("platform-{}", platforms.len())),
                        Rect::new(data.x, data.y, data.width, data.height),
                    ));
                },
                PlatformKind::Moving => {
                    let path = data
                        .path
                        .as_ref()
                        .filter(|p| p.len() >= 2)
                        .ok_or(SpawnError::MovingPlatformPath { index: i })?;
                    moving_platforms.push(MovingPlatform::new(
                        ActorId::new(format!("moving-platform-{}", moving_platforms.len())),
                        Vec2::new(data.width, data.height),
                        path.clone(),
                        data.speed.unwrap_or(config.physics.moving_platform_speed),
                    ));
                },
            }
        }

        let mut birds = Vec::new();
        let mut sharks = Vec::new();
        let mut frogs = Vec::new();
        for (i, data) in level.enemies.iter().enumerate() {
            let position = Vec2::new(data.x, data.y);
            match data.kind {
                EnemyKind::Bird => {
                    let sign = data.fly_direction.unwrap_or(1.0);
                    if sign == 0.0 {
                        return Err(SpawnError::ZeroFlyDirection { index: i });
                    }
                    let id = ActorId::new(format!("bird-{}", birds.len()));
                    visual.spawn(&id, ActorKind::Bird, position);
                    birds.push(Bird::new(
                        id,
                        position,
                        Facing::from_sign(sign),
                        level.metadata.width,
                        rng,
                        &config.enemies,
                    ));
                },
                EnemyKind::Shark => {
                    let half = crate::config::SHARK_DEFAULT_PATROL_HALF_RANGE;
                    let start = data.patrol_start.unwrap_or(data.x - half);
                    let end = data.patrol_end.unwrap_or(data.x + half);
                    if start >= end {
                        return Err(SpawnError::InvertedPatrolBounds { index: i });
                    }
                    let id = ActorId::new(format!("shark-{}", sharks.len()));
                    visual.spawn(&id, ActorKind::Shark, position);
                    sharks.push(Shark::new(id, position, start, end));
                },
                EnemyKind::Frog => {
                    let id = ActorId::new(format!("frog-{}", frogs.len()));
                    visual.spawn(&id, ActorKind::Frog, position);
                    frogs.push(Frog::new(id, position));
                },
            }
        }

        let coins = level
            .coins
            .iter()
            .enumerate()
            .map(|(i, data)| {
                let id = ActorId::new(format!("coin-{i}"));
                let position = Vec2::new(data.x, data.y);
                visual.spawn(&id, ActorKind::Coin, position);
                Coin::new(id, position)
            })
            .collect();

        let checkpoints = level
            .checkpoints
            .iter()
            .enumerate()
            .map(|(i, data)| {
                let id = ActorId::new(format!("checkpoint-{i}"));
                let position = Vec2::new(data.x, data.y);
                visual.spawn(&id, ActorKind::Checkpoint, position);
                Checkpoint::new(id, position)
            })
            .collect();

        let hats = level
            .power_ups
            .iter()
            .enumerate()
            .map(|(i, data)| {
                let PowerUpKind::WizardHat = data.kind;
                let id = ActorId::new(format!("powerup-{i}"));
                let position = Vec2::new(data.x, data.y);
                visual.spawn(&id, ActorKind::PowerUp, position);
                WizardHat::new(id, position)
            })
            .collect();

        let boss = level.boss_arena.as_ref().map(|arena| {
            let id = ActorId::from("boss");
            visual.spawn(&id, ActorKind::Boss, arena.boss_position);
            Boss::new(id, arena.boss_position, &config.boss)
        });

        tracing::debug!(
            level = %level.metadata.id,
            enemies = level.enemies.len(),
            coins = level.coins.len(),
            boss = boss.is_some(),
            "Level actors built"
        );

        Ok(LevelActors {
            player,
            platforms,
            moving_platforms,
            birds,
            sharks,
            frogs,
            coins,
            checkpoints,
            hats,
            boss,
        })
    }

    /// Mint a player shot at the wand position, flying along `facing`.
    pub fn player_shot<V: SpawnableVisual>(
        &mut self,
        position: Vec2,
        facing: Facing,
        config: &GameplayConfig,
        visual: &mut V,
    ) -> Projectile {
        let id = ActorId::new(format!("projectile-player-{}", self.player_shots));
        self.player_shots += 1;
        visual.spawn(&id, ActorKind::Projectile, position);
        Projectile::player_shot(id, position, facing, &config.combat)
    }

    /// Mint a bird dropping falling from `position`.
    pub fn bird_drop<V: SpawnableVisual>(
        &mut self,
        position: Vec2,
        config: &GameplayConfig,
        visual: &mut V,
    ) -> Projectile {
        let id = ActorId::new(format!("projectile-enemy-{}", self.enemy_shots));
        self.enemy_shots += 1;
        visual.spawn(&id, ActorKind::Projectile, position);
        Projectile::bird_drop(id, position, config.enemies.bird_drop_speed, &config.combat)
    }

    /// Mint a boss shot aimed at `target`.
    pub fn boss_shot<V: SpawnableVisual>(
        &mut self,
        position: Vec2,
        target: Vec2,
        config: &GameplayConfig,
        visual: &mut V,
    ) -> Projectile {
        let id = ActorId::new(format!("projectile-boss-{}", self.boss_shots));
        self.boss_shots += 1;
        visual.spawn(&id, ActorKind::Projectile, position);
        Projectile::boss_shot(id, position, target, config.boss.projectile_speed, &config.combat)
    }
}
