pub mod boss;
pub mod config;
pub mod enemy;
pub mod factory;
pub mod input;
pub mod pickups;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod session;

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use lemonsters_core::actor::{ActorId, ActorKind};
use lemonsters_core::events::GameEvent;
use lemonsters_core::geometry::{Rect, Vec2};
use lemonsters_core::level::LevelData;
use lemonsters_core::visual::SpawnableVisual;

use boss::Boss;
use config::GameplayConfig;
use enemy::{Bird, Frog, Shark};
use factory::{EntityFactory, SpawnError};
use pickups::{Checkpoint, Coin, WizardHat};
use platform::{MovingPlatform, Platform};
use player::{Player, PlayerFrame};
use projectile::{Projectile, ProjectileKind};
use session::SessionManager;

/// Coarse game flow. `Paused` suspends the tick and turns every
/// handler into a no-op; `GameOver` and `Victory` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// The whole gameplay layer behind one entry point.
///
/// Owns the session, the player state, the typed actor registry, the
/// factory counters, and the RNG. The host calls `tick` once per frame
/// with the player's engine-integrated frame data, dispatches its
/// overlap detections into the `handle_*` methods, and drains the
/// returned event stream into audio/HUD/physics reactions. Handlers
/// append to the same stream; their events surface on the next drain.
pub struct World {
    config: GameplayConfig,
    level_width: f32,
    level_height: f32,
    player_start: Vec2,
    session: SessionManager,
    factory: EntityFactory,
    rng: StdRng,
    phase: GamePhase,
    player: Player,
    platforms: Vec<Platform>,
    moving_platforms: Vec<MovingPlatform>,
    birds: Vec<Bird>,
    sharks: Vec<Shark>,
    frogs: Vec<Frog>,
    coins: Vec<Coin>,
    checkpoints: Vec<Checkpoint>,
    hats: Vec<WizardHat>,
    boss: Option<Boss>,
    projectiles: Vec<Projectile>,
    /// Collision dispatch index: the id the host hands back resolves
    /// to the kind whose typed collection holds the actor.
    kinds: HashMap<ActorId, ActorKind>,
    events: Vec<GameEvent>,
}

impl World {
    /// Build a world from a validated level document and start the
    /// session. `seed` fixes the bird drop cadence for reproducibility.
    pub fn new<V: SpawnableVisual>(
        level: &LevelData,
        config: GameplayConfig,
        seed: u64,
        visual: &mut V,
    ) -> Result<Self, SpawnError> {
        let mut factory = EntityFactory::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let actors = factory.build_level(level, &config, &mut rng, visual)?;

        let mut kinds = HashMap::new();
        kinds.insert(actors.player.id.clone(), ActorKind::Player);
        for bird in &actors.birds {
            kinds.insert(bird.id.clone(), ActorKind::Bird);
        }
        for shark in &actors.sharks {
            kinds.insert(shark.id.clone(), ActorKind::Shark);
        }
        for frog in &actors.frogs {
            kinds.insert(frog.id.clone(), ActorKind::Frog);
        }
        for coin in &actors.coins {
            kinds.insert(coin.id.clone(), ActorKind::Coin);
        }
        for checkpoint in &actors.checkpoints {
            kinds.insert(checkpoint.id.clone(), ActorKind::Checkpoint);
        }
        for hat in &actors.hats {
            kinds.insert(hat.id.clone(), ActorKind::PowerUp);
        }
        if let Some(boss) = &actors.boss {
            kinds.insert(boss.id.clone(), ActorKind::Boss);
        }

        let mut session = SessionManager::new();
        session.start_session(config.player.max_lives);

        Ok(Self {
            level_width: level.metadata.width,
            level_height: level.metadata.height,
            player_start: level.player_start,
            config,
            session,
            factory,
            rng,
            phase: GamePhase::Playing,
            player: actors.player,
            platforms: actors.platforms,
            moving_platforms: actors.moving_platforms,
            birds: actors.birds,
            sharks: actors.sharks,
            frogs: actors.frogs,
            coins: actors.coins,
            checkpoints: actors.checkpoints,
            hats: actors.hats,
            boss: actors.boss,
            projectiles: Vec::new(),
            kinds,
            events: Vec::new(),
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// All solid surfaces at this instant, for ground queries.
    fn platform_rects(&self) -> Vec<Rect> {
        self.platforms
            .iter()
            .map(|p| p.rect)
            .chain(self.moving_platforms.iter().map(|m| m.rect()))
            .collect()
    }

    /// Advance one frame. Order within the tick: session clock, player
    /// windows and pit check, platforms, enemies, boss, projectiles.
    /// Returns the accumulated event stream, drained.
    pub fn tick<V: SpawnableVisual>(
        &mut self,
        delta_ms: f32,
        frame: &PlayerFrame,
        visual: &mut V,
    ) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            return std::mem::take(&mut self.events);
        }

        self.session.update_timer(delta_ms);

        self.player.sync_frame(frame);
        if self.player.tick(delta_ms) {
            self.respawn_player(visual);
        } else if self.player.is_alive() && self.player.position().y > self.level_height {
            // The single pit-death mechanism: fell below the level.
            self.kill_player(visual);
        }

        for platform in &mut self.moving_platforms {
            platform.tick(delta_ms, visual);
        }

        let rects = self.platform_rects();
        let player_position = self.player.position();

        let mut drops = Vec::new();
        for bird in &mut self.birds {
            let out = bird.tick(delta_ms, &mut self.rng, &self.config.enemies, visual);
            if let Some(at) = out.drop_at {
                drops.push(at);
            }
            if out.respawned {
                self.events.push(GameEvent::EnemyRespawned {
                    id: bird.id.clone(),
                });
            }
        }
        for at in drops {
            let projectile = self.factory.bird_drop(at, &self.config, visual);
            self.events.push(GameEvent::ProjectileFired {
                id: projectile.id.clone(),
                owner: ActorKind::Bird,
            });
            self.kinds
                .insert(projectile.id.clone(), ActorKind::Projectile);
            self.projectiles.push(projectile);
        }

        for shark in &mut self.sharks {
            let out = shark.tick(delta_ms, &self.config.enemies, visual);
            if out.respawned {
                self.events.push(GameEvent::EnemyRespawned {
                    id: shark.id.clone(),
                });
            }
        }

        for frog in &mut self.frogs {
            frog.tick(
                delta_ms,
                player_position.x,
                &rects,
                &self.config.enemies,
                &self.config.physics,
                visual,
            );
        }

        if let Some(boss) = &mut self.boss {
            let out = boss.tick(delta_ms, player_position, &self.config.boss, visual);
            if let Some(phase) = out.phase_changed {
                self.events.push(GameEvent::BossPhaseChanged { phase });
            }
            if let Some(target) = out.shot_target {
                let projectile =
                    self.factory
                        .boss_shot(boss.position(), target, &self.config, visual);
                self.events.push(GameEvent::ProjectileFired {
                    id: projectile.id.clone(),
                    owner: ActorKind::Boss,
                });
                self.kinds
                    .insert(projectile.id.clone(), ActorKind::Projectile);
                self.projectiles.push(projectile);
            }
            if out.removed {
                self.phase = GamePhase::Victory;
                let summary = self.session.end_session();
                self.events.push(GameEvent::Victory {
                    final_time_ms: summary.final_time_ms,
                    coins_collected: summary.coins_collected,
                });
            }
        }

        for projectile in &mut self.projectiles {
            projectile.tick(
                delta_ms,
                self.level_width,
                self.level_height,
                self.config.combat.bounds_margin,
                visual,
            );
        }
        self.projectiles.retain(|p| {
            if !p.is_active() {
                self.kinds.remove(&p.id);
            }
            p.is_active()
        });

        for coin in &mut self.coins {
            coin.tick(delta_ms, visual);
        }

        std::mem::take(&mut self.events)
    }

    /// The host detected the player overlapping the actor behind `id`.
    /// Unknown ids and already-settled actors are guard no-ops.
    pub fn handle_player_overlap<V: SpawnableVisual>(&mut self, id: &ActorId, visual: &mut V) {
        if self.phase != GamePhase::Playing || !self.player.is_alive() {
            return;
        }
        let Some(kind) = self.kinds.get(id).copied() else {
            return;
        };
        match kind {
            ActorKind::Coin => self.touch_coin(id, visual),
            ActorKind::Checkpoint => self.touch_checkpoint(id, visual),
            ActorKind::PowerUp => self.touch_hat(id, visual),
            ActorKind::Bird | ActorKind::Shark | ActorKind::Frog => {
                self.touch_enemy(id, kind, visual);
            },
            ActorKind::Boss => {
                if self.boss.as_ref().is_some_and(|b| b.is_alive()) {
                    self.kill_player(visual);
                }
            },
            ActorKind::Projectile => {
                let Some(projectile) = self.projectiles.iter_mut().find(|p| &p.id == id) else {
                    return;
                };
                if projectile.kind == ProjectileKind::Player || !projectile.is_active() {
                    return;
                }
                projectile.destroy(visual);
                self.kinds.remove(id);
                self.kill_player(visual);
            },
            ActorKind::Player => {},
        }
    }

    /// The host detected a projectile overlapping `target_id`. Only
    /// live player shots resolve; enemy fire against the player goes
    /// through `handle_player_overlap`.
    pub fn handle_projectile_hit<V: SpawnableVisual>(
        &mut self,
        projectile_id: &ActorId,
        target_id: &ActorId,
        visual: &mut V,
    ) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(projectile) = self
            .projectiles
            .iter_mut()
            .find(|p| &p.id == projectile_id)
        else {
            return;
        };
        if projectile.kind != ProjectileKind::Player || !projectile.is_active() {
            return;
        }
        projectile.destroy(visual);
        self.kinds.remove(projectile_id);

        let Some(kind) = self.kinds.get(target_id).copied() else {
            return;
        };
        match kind {
            ActorKind::Bird | ActorKind::Shark | ActorKind::Frog => {
                if self.defeat_enemy(target_id, kind, visual) {
                    self.events.push(GameEvent::EnemyDefeated {
                        id: target_id.clone(),
                        kind,
                    });
                }
            },
            ActorKind::Boss => {
                if let Some(boss) = &mut self.boss
                    && &boss.id == target_id
                    && let Some(hit) = boss.take_damage(1, visual)
                {
                    self.events.push(GameEvent::BossDamaged { health: hit.health });
                    if hit.defeated {
                        self.session.defeat_boss();
                        self.events.push(GameEvent::BossDefeated);
                    }
                }
            },
            _ => {},
        }
    }

    /// Fire the player's wand if the hat and cooldown allow it.
    /// Returns the new projectile's id when a shot went out.
    pub fn player_shoot<V: SpawnableVisual>(&mut self, visual: &mut V) -> Option<ActorId> {
        if self.phase != GamePhase::Playing || !self.player.try_shoot(&self.config.combat) {
            return None;
        }
        let projectile = self.factory.player_shot(
            self.player.position(),
            self.player.facing(),
            &self.config,
            visual,
        );
        let id = projectile.id.clone();
        self.events.push(GameEvent::ProjectileFired {
            id: id.clone(),
            owner: ActorKind::Player,
        });
        self.kinds.insert(id.clone(), ActorKind::Projectile);
        self.projectiles.push(projectile);
        Some(id)
    }

    fn touch_coin<V: SpawnableVisual>(&mut self, id: &ActorId, visual: &mut V) {
        let Some(coin) = self.coins.iter_mut().find(|c| &c.id == id) else {
            return;
        };
        if !coin.collect(visual) {
            return;
        }
        let total = self.session.collect_coin();
        self.session.mark_item_collected(id);
        self.events.push(GameEvent::CoinCollected {
            id: id.clone(),
            session_total: total,
        });
    }

    fn touch_checkpoint<V: SpawnableVisual>(&mut self, id: &ActorId, visual: &mut V) {
        let Some(checkpoint) = self.checkpoints.iter_mut().find(|c| &c.id == id) else {
            return;
        };
        if !checkpoint.activate(visual) {
            return;
        }
        let position = checkpoint.position;
        self.session.set_checkpoint(position);
        self.events.push(GameEvent::CheckpointActivated {
            id: id.clone(),
            position,
        });
    }

    fn touch_hat<V: SpawnableVisual>(&mut self, id: &ActorId, visual: &mut V) {
        let Some(hat) = self.hats.iter_mut().find(|h| &h.id == id) else {
            return;
        };
        if !hat.collect(visual) {
            return;
        }
        self.session.mark_item_collected(id);
        self.player.give_hat();
        self.events.push(GameEvent::PowerUpCollected { id: id.clone() });
    }

    /// Body contact with an enemy: a falling player stomps it and
    /// bounces; otherwise both go down together. Contact during the
    /// invincibility window does nothing at all.
    fn touch_enemy<V: SpawnableVisual>(&mut self, id: &ActorId, kind: ActorKind, visual: &mut V) {
        let enemy_y = match kind {
            ActorKind::Bird => self
                .birds
                .iter()
                .find(|b| &b.id == id)
                .filter(|b| b.is_alive())
                .map(|b| b.position().y),
            ActorKind::Shark => self
                .sharks
                .iter()
                .find(|s| &s.id == id)
                .filter(|s| s.is_alive())
                .map(|s| s.position().y),
            ActorKind::Frog => self
                .frogs
                .iter()
                .find(|f| &f.id == id)
                .filter(|f| f.is_alive())
                .map(|f| f.position().y),
            _ => None,
        };
        let Some(enemy_y) = enemy_y else {
            return;
        };

        let stomp = self.player.is_stomping(enemy_y);
        if !stomp && !self.player.is_vulnerable() {
            return;
        }
        if !self.defeat_enemy(id, kind, visual) {
            return;
        }
        self.events.push(GameEvent::EnemyDefeated {
            id: id.clone(),
            kind,
        });
        if stomp {
            self.events.push(GameEvent::PlayerBounced {
                velocity_y: self.config.player.stomp_bounce_velocity,
            });
        } else {
            self.kill_player(visual);
        }
    }

    /// Kill one enemy by id. Frog defeats are permanent and enter the
    /// suppression set; bird and shark run their own respawn cycle.
    fn defeat_enemy<V: SpawnableVisual>(
        &mut self,
        id: &ActorId,
        kind: ActorKind,
        visual: &mut V,
    ) -> bool {
        match kind {
            ActorKind::Bird => self
                .birds
                .iter_mut()
                .find(|b| &b.id == id)
                .is_some_and(|b| b.take_damage(visual)),
            ActorKind::Shark => self
                .sharks
                .iter_mut()
                .find(|s| &s.id == id)
                .is_some_and(|s| s.take_damage(visual)),
            ActorKind::Frog => {
                let killed = self
                    .frogs
                    .iter_mut()
                    .find(|f| &f.id == id)
                    .is_some_and(|f| f.take_damage(visual));
                if killed {
                    self.session.mark_enemy_defeated(id);
                }
                killed
            },
            _ => false,
        }
    }

    /// Take a life. With lives left the player enters the dead window;
    /// at zero the session snapshot goes out and the run ends.
    fn kill_player<V: SpawnableVisual>(&mut self, visual: &mut V) {
        if self.phase != GamePhase::Playing || !self.player.is_vulnerable() {
            return;
        }
        let lives_left = self.session.lose_life();
        self.events.push(GameEvent::PlayerDied { lives_left });
        if lives_left > 0 {
            self.player.kill(self.config.player.respawn_delay_ms, visual);
        } else {
            self.player.set_game_over(visual);
            self.phase = GamePhase::GameOver;
            let summary = self.session.end_session();
            self.events.push(GameEvent::GameOver {
                final_time_ms: summary.final_time_ms,
                coins_collected: summary.coins_collected,
            });
        }
    }

    /// Dead window elapsed: teleport to the checkpoint (or the level
    /// start), restore the suppressed content, and clear both sets so
    /// cleared enemies and items are back in play.
    fn respawn_player<V: SpawnableVisual>(&mut self, visual: &mut V) {
        let position = self.session.checkpoint().unwrap_or(self.player_start);
        for frog in &mut self.frogs {
            if self.session.is_enemy_defeated(&frog.id) {
                frog.restore(visual);
            }
        }
        for coin in &mut self.coins {
            if self.session.is_item_collected(&coin.id) {
                coin.restore(visual);
            }
        }
        for hat in &mut self.hats {
            if self.session.is_item_collected(&hat.id) {
                hat.restore(visual);
            }
        }
        self.session.clear_defeated_enemies();
        self.session.clear_collected_items();
        self.player
            .respawn(position, self.config.player.invincibility_ms, visual);
        self.events.push(GameEvent::PlayerRespawned { position });
    }
}
