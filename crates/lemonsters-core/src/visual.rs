use crate::actor::{ActorId, ActorKind, Facing};
use crate::geometry::Vec2;

/// Named one-shot effects the gameplay layer requests from the renderer.
///
/// Durations are carried along so the renderer never has to know
/// gameplay timing; the gameplay state machines advance on their own
/// clocks and the effect is presentation only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualEffect {
    /// Brief red tint after taking a hit.
    DamageFlash,
    /// Fade out over the given window, used for deaths and collected coins.
    DeathFade { duration_ms: f32 },
    /// Alpha blink for the post-respawn invincibility window.
    InvincibilityFlash { duration_ms: f32 },
    /// Flag-up animation when a checkpoint activates.
    CheckpointRaised,
    /// Sparkle burst on pickup collection.
    CollectBurst,
    Hide,
    Show,
}

/// Capability seam between the gameplay layer and the rendering engine.
///
/// Every actor the world creates is announced through `spawn` with a
/// stable [`ActorId`]; later calls reference that id. All methods
/// default to no-ops so a headless backend is `impl SpawnableVisual
/// for T {}`.
pub trait SpawnableVisual {
    /// A new actor exists at `position`; create its visual handle.
    fn spawn(&mut self, id: &ActorId, kind: ActorKind, position: Vec2) {
        let _ = (id, kind, position);
    }

    /// Move an actor's visual to `position`.
    fn set_position(&mut self, id: &ActorId, position: Vec2) {
        let _ = (id, position);
    }

    /// Flip an actor's visual to face `facing`.
    fn set_facing(&mut self, id: &ActorId, facing: Facing) {
        let _ = (id, facing);
    }

    /// Play a one-shot effect on an actor's visual.
    fn play_effect(&mut self, id: &ActorId, effect: VisualEffect) {
        let _ = (id, effect);
    }

    /// The actor is gone; release its visual handle.
    fn despawn(&mut self, id: &ActorId) {
        let _ = id;
    }
}

/// Headless backend for tests and tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisual;

impl SpawnableVisual for NoopVisual {}
