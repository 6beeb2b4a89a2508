use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use lemonsters_core::actor::ActorId;
use lemonsters_core::geometry::Vec2;
use lemonsters_core::time::format_clock;

/// Live state of one run: lives, coins, checkpoint, clock, boss flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub lives: u32,
    pub coins_collected: u32,
    pub current_checkpoint: Option<Vec2>,
    pub elapsed_ms: f32,
    pub boss_defeated: bool,
}

/// Snapshot handed to the victory and game-over screens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub final_time_ms: f32,
    pub coins_collected: u32,
}

/// Owns the current session plus the respawn-suppression sets.
///
/// Every mutator is a silent no-op until `start_session` is called;
/// querying an absent session yields zeros and `None`s. The suppression
/// sets outlive individual deaths: they are cleared on player respawn
/// (so cleared content comes back) and on session start.
#[derive(Debug, Default)]
pub struct SessionManager {
    session: Option<GameSession>,
    defeated_enemies: HashSet<ActorId>,
    collected_items: HashSet<ActorId>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh run with the given life count.
    pub fn start_session(&mut self, lives: u32) {
        self.session = Some(GameSession {
            lives,
            coins_collected: 0,
            current_checkpoint: None,
            elapsed_ms: 0.0,
            boss_defeated: false,
        });
        self.defeated_enemies.clear();
        self.collected_items.clear();
        tracing::debug!(lives, "Session started");
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Advance the session clock.
    pub fn update_timer(&mut self, delta_ms: f32) {
        if let Some(session) = &mut self.session {
            session.elapsed_ms += delta_ms;
        }
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.session.as_ref().map_or(0.0, |s| s.elapsed_ms)
    }

    /// Session clock as MM:SS.
    pub fn formatted_time(&self) -> String {
        format_clock(self.elapsed_ms())
    }

    /// Increment the coin count, returning the new total.
    pub fn collect_coin(&mut self) -> u32 {
        match &mut self.session {
            Some(session) => {
                session.coins_collected += 1;
                session.coins_collected
            },
            None => 0,
        }
    }

    pub fn coin_count(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.coins_collected)
    }

    /// Remove one life, returning the count that remains. Floors at zero.
    pub fn lose_life(&mut self) -> u32 {
        match &mut self.session {
            Some(session) => {
                session.lives = session.lives.saturating_sub(1);
                session.lives
            },
            None => 0,
        }
    }

    pub fn lives(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.lives)
    }

    /// Record the most recently touched checkpoint. Later checkpoints
    /// overwrite earlier ones unconditionally.
    pub fn set_checkpoint(&mut self, position: Vec2) {
        if let Some(session) = &mut self.session {
            session.current_checkpoint = Some(position);
        }
    }

    pub fn checkpoint(&self) -> Option<Vec2> {
        self.session.as_ref().and_then(|s| s.current_checkpoint)
    }

    pub fn defeat_boss(&mut self) {
        if let Some(session) = &mut self.session {
            session.boss_defeated = true;
        }
    }

    pub fn is_boss_defeated(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.boss_defeated)
    }

    /// Snapshot the run for the end screens. The session itself is left
    /// in place so the HUD can keep reading it during the transition.
    pub fn end_session(&self) -> SessionSummary {
        SessionSummary {
            final_time_ms: self.elapsed_ms(),
            coins_collected: self.coin_count(),
        }
    }

    /// Record a permanent enemy defeat so respawn sweeps skip it.
    pub fn mark_enemy_defeated(&mut self, id: &ActorId) {
        self.defeated_enemies.insert(id.clone());
    }

    pub fn is_enemy_defeated(&self, id: &ActorId) -> bool {
        self.defeated_enemies.contains(id)
    }

    /// Forget permanent defeats; cleared enemies come back on respawn.
    pub fn clear_defeated_enemies(&mut self) {
        self.defeated_enemies.clear();
    }

    /// Record a collected item so respawn sweeps skip it.
    pub fn mark_item_collected(&mut self, id: &ActorId) {
        self.collected_items.insert(id.clone());
    }

    pub fn is_item_collected(&self, id: &ActorId) -> bool {
        self.collected_items.contains(id)
    }

    /// Forget collections; cleared items come back on respawn.
    pub fn clear_collected_items(&mut self) {
        self.collected_items.clear();
    }
}
