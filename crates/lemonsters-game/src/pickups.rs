use lemonsters_core::actor::{ActorId, ActorKind};
use lemonsters_core::geometry::Vec2;
use lemonsters_core::visual::{SpawnableVisual, VisualEffect};

use crate::config::COIN_FADE_MS;

/// Coin lifecycle. Collection starts a short fade; the visual handle
/// is only released when the fade finishes, so the state machine owns
/// the full animation window.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CoinState {
    Idle,
    Fading { remaining_ms: f32 },
    Gone,
}

#[derive(Debug)]
pub struct Coin {
    pub id: ActorId,
    pub position: Vec2,
    state: CoinState,
}

impl Coin {
    pub fn new(id: ActorId, position: Vec2) -> Self {
        Self {
            id,
            position,
            state: CoinState::Idle,
        }
    }

    pub fn is_collectable(&self) -> bool {
        self.state == CoinState::Idle
    }

    /// Begin collection. Returns false when already collected, so a
    /// second overlap in the fade window cannot double-count.
    pub fn collect<V: SpawnableVisual>(&mut self, visual: &mut V) -> bool {
        if self.state != CoinState::Idle {
            return false;
        }
        self.state = CoinState::Fading {
            remaining_ms: COIN_FADE_MS,
        };
        visual.play_effect(
            &self.id,
            VisualEffect::DeathFade {
                duration_ms: COIN_FADE_MS,
            },
        );
        true
    }

    pub fn tick<V: SpawnableVisual>(&mut self, delta_ms: f32, visual: &mut V) {
        if let CoinState::Fading { remaining_ms } = &mut self.state {
            *remaining_ms -= delta_ms;
            if *remaining_ms <= 0.0 {
                self.state = CoinState::Gone;
                visual.despawn(&self.id);
            }
        }
    }

    /// Bring a collected coin back at its spawn point.
    pub fn restore<V: SpawnableVisual>(&mut self, visual: &mut V) {
        match self.state {
            CoinState::Idle => {},
            CoinState::Fading { .. } => {
                self.state = CoinState::Idle;
                visual.play_effect(&self.id, VisualEffect::Show);
            },
            CoinState::Gone => {
                self.state = CoinState::Idle;
                visual.spawn(&self.id, ActorKind::Coin, self.position);
            },
        }
    }
}

/// A respawn checkpoint. Activation is one-way for the life of the
/// session; the raised flag never lowers.
#[derive(Debug)]
pub struct Checkpoint {
    pub id: ActorId,
    pub position: Vec2,
    activated: bool,
}

impl Checkpoint {
    pub fn new(id: ActorId, position: Vec2) -> Self {
        Self {
            id,
            position,
            activated: false,
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Raise the flag. Returns false when already active.
    pub fn activate<V: SpawnableVisual>(&mut self, visual: &mut V) -> bool {
        if self.activated {
            return false;
        }
        self.activated = true;
        visual.play_effect(&self.id, VisualEffect::CheckpointRaised);
        true
    }
}

/// The wizard hat power-up. Collection hides it rather than despawning
/// so a respawn sweep can bring it straight back.
#[derive(Debug)]
pub struct WizardHat {
    pub id: ActorId,
    pub position: Vec2,
    collected: bool,
}

impl WizardHat {
    pub fn new(id: ActorId, position: Vec2) -> Self {
        Self {
            id,
            position,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Returns false when already collected.
    pub fn collect<V: SpawnableVisual>(&mut self, visual: &mut V) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        visual.play_effect(&self.id, VisualEffect::CollectBurst);
        visual.play_effect(&self.id, VisualEffect::Hide);
        true
    }

    /// Put the hat back at its spawn point.
    pub fn restore<V: SpawnableVisual>(&mut self, visual: &mut V) {
        if !self.collected {
            return;
        }
        self.collected = false;
        visual.set_position(&self.id, self.position);
        visual.play_effect(&self.id, VisualEffect::Show);
    }
}
