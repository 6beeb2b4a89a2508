pub mod actor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod level;
pub mod settings;
pub mod time;
pub mod visual;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::HashMap;

    use crate::actor::{ActorId, ActorKind, Facing};
    use crate::geometry::Vec2;
    use crate::level::{
        BossArenaData, CheckpointData, CoinData, EnemyData, EnemyKind, LevelData, LevelMetadata,
        PlatformData, PlatformKind, PowerUpData, PowerUpKind,
    };
    use crate::visual::{SpawnableVisual, VisualEffect};

    /// Visual backend that records every call for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingVisual {
        pub spawned: Vec<(ActorId, ActorKind, Vec2)>,
        pub despawned: Vec<ActorId>,
        pub effects: Vec<(ActorId, VisualEffect)>,
        pub positions: HashMap<ActorId, Vec2>,
        pub facings: HashMap<ActorId, Facing>,
    }

    impl RecordingVisual {
        /// Whether `id` was spawned and has not been despawned since.
        pub fn is_live(&self, id: &ActorId) -> bool {
            let spawns = self.spawned.iter().filter(|(sid, _, _)| sid == id).count();
            let despawns = self.despawned.iter().filter(|did| *did == id).count();
            spawns > despawns
        }

        /// How many times `effect` was played on `id`.
        pub fn effect_count(&self, id: &ActorId, effect: VisualEffect) -> usize {
            self.effects
                .iter()
                .filter(|(eid, e)| eid == id && *e == effect)
                .count()
        }

        pub fn spawned_kinds(&self) -> Vec<ActorKind> {
            self.spawned.iter().map(|(_, kind, _)| *kind).collect()
        }
    }

    impl SpawnableVisual for RecordingVisual {
        fn spawn(&mut self, id: &ActorId, kind: ActorKind, position: Vec2) {
            self.spawned.push((id.clone(), kind, position));
            self.positions.insert(id.clone(), position);
        }

        fn set_position(&mut self, id: &ActorId, position: Vec2) {
            self.positions.insert(id.clone(), position);
        }

        fn set_facing(&mut self, id: &ActorId, facing: Facing) {
            self.facings.insert(id.clone(), facing);
        }

        fn play_effect(&mut self, id: &ActorId, effect: VisualEffect) {
            self.effects.push((id.clone(), effect));
        }

        fn despawn(&mut self, id: &ActorId) {
            self.despawned.push(id.clone());
            self.positions.remove(id);
        }
    }

    /// A level exercising every placement kind: ground, one moving
    /// platform, a checkpoint, all three enemy kinds, coins, a wizard
    /// hat, and a boss arena.
    pub fn test_level() -> LevelData {
        LevelData {
            metadata: LevelMetadata {
                id: "test-level".to_string(),
                name: "Test Level".to_string(),
                width: 3000.0,
                height: 1080.0,
                background: "sky".to_string(),
            },
            player_start: Vec2::new(100.0, 900.0),
            platforms: vec![
                PlatformData {
                    x: 0.0,
                    y: 1000.0,
                    width: 3000.0,
                    height: 80.0,
                    kind: PlatformKind::Static,
                    path: None,
                    speed: None,
                },
                PlatformData {
                    x: 400.0,
                    y: 700.0,
                    width: 128.0,
                    height: 32.0,
                    kind: PlatformKind::Moving,
                    path: Some(vec![Vec2::new(400.0, 700.0), Vec2::new(700.0, 700.0)]),
                    speed: Some(50.0),
                },
            ],
            checkpoints: vec![CheckpointData {
                x: 1500.0,
                y: 950.0,
            }],
            enemies: vec![
                EnemyData {
                    kind: EnemyKind::Bird,
                    x: 600.0,
                    y: 300.0,
                    fly_direction: Some(1.0),
                    patrol_start: None,
                    patrol_end: None,
                },
                EnemyData {
                    kind: EnemyKind::Shark,
                    x: 900.0,
                    y: 960.0,
                    fly_direction: None,
                    patrol_start: Some(800.0),
                    patrol_end: Some(1100.0),
                },
                EnemyData {
                    kind: EnemyKind::Frog,
                    x: 1200.0,
                    y: 960.0,
                    fly_direction: None,
                    patrol_start: None,
                    patrol_end: None,
                },
            ],
            coins: vec![
                CoinData { x: 300.0, y: 900.0 },
                CoinData { x: 350.0, y: 900.0 },
            ],
            power_ups: vec![PowerUpData {
                kind: PowerUpKind::WizardHat,
                x: 500.0,
                y: 900.0,
            }],
            boss_arena: Some(BossArenaData {
                x: 2500.0,
                y: 600.0,
                width: 500.0,
                height: 400.0,
                boss_position: Vec2::new(2800.0, 700.0),
            }),
        }
    }

    /// `test_level` without the boss arena, for runs that should never
    /// reach a victory condition.
    pub fn test_level_no_boss() -> LevelData {
        LevelData {
            boss_arena: None,
            ..test_level()
        }
    }

    /// Drive a tick function with fixed-size steps until `total_ms`
    /// has elapsed. A trailing partial step is not issued; pick a step
    /// that divides the total when exactness matters.
    pub fn run_ticks(total_ms: f32, step_ms: f32, mut tick: impl FnMut(f32)) {
        let mut elapsed = 0.0;
        while elapsed + step_ms <= total_ms {
            tick(step_ms);
            elapsed += step_ms;
        }
    }

}
