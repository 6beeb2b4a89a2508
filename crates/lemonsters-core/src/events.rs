use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, ActorKind};
use crate::geometry::Vec2;

/// Boss attack phase. The boss alternates between firing a burst of
/// aimed shots and pausing vulnerable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    Burst,
    Pause,
}

/// Events emitted by the world during a tick, in emission order.
///
/// The host drains these each frame to drive audio, UI, and the two
/// physics impulses the gameplay layer cannot apply itself
/// (`PlayerBounced` on stomp, teleport via `PlayerRespawned`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { id: ActorId, session_total: u32 },
    CheckpointActivated { id: ActorId, position: Vec2 },
    PowerUpCollected { id: ActorId },
    ProjectileFired { id: ActorId, owner: ActorKind },
    PlayerDied { lives_left: u32 },
    PlayerRespawned { position: Vec2 },
    /// Stomp rebound; the host applies this vertical velocity to the player body.
    PlayerBounced { velocity_y: f32 },
    EnemyDefeated { id: ActorId, kind: ActorKind },
    EnemyRespawned { id: ActorId },
    BossPhaseChanged { phase: BossPhase },
    BossDamaged { health: u32 },
    BossDefeated,
    GameOver { final_time_ms: f32, coins_collected: u32 },
    Victory { final_time_ms: f32, coins_collected: u32 },
}
