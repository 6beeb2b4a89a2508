use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::geometry::Vec2;

/// A complete level description, parsed from the JSON documents the
/// level editor exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub metadata: LevelMetadata,
    pub player_start: Vec2,
    pub platforms: Vec<PlatformData>,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointData>,
    #[serde(default)]
    pub enemies: Vec<EnemyData>,
    #[serde(default)]
    pub coins: Vec<CoinData>,
    #[serde(default)]
    pub power_ups: Vec<PowerUpData>,
    #[serde(default)]
    pub boss_arena: Option<BossArenaData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub id: String,
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "type")]
    pub kind: PlatformKind,
    #[serde(default)]
    pub path: Option<Vec<Vec2>>,
    #[serde(default)]
    pub speed: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Static,
    Moving,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckpointData {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyData {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    /// Bird only: initial horizontal direction, -1 or 1.
    #[serde(default)]
    pub fly_direction: Option<f32>,
    /// Shark only: left patrol bound. Defaults to x - 100 when omitted.
    #[serde(default)]
    pub patrol_start: Option<f32>,
    /// Shark only: right patrol bound. Defaults to x + 100 when omitted.
    #[serde(default)]
    pub patrol_end: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Bird,
    Shark,
    Frog,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoinData {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpData {
    #[serde(rename = "type")]
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    #[serde(rename = "wizard-hat")]
    WizardHat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossArenaData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub boss_position: Vec2,
}

impl LevelData {
    /// Parse and validate a level document.
    pub fn from_json(json: &str) -> Result<LevelData, LevelError> {
        let level: LevelData =
            serde_json::from_str(json).map_err(|e| LevelError::ParseError(e.to_string()))?;
        level.validate()?;
        Ok(level)
    }

    /// Structural checks that parsing alone cannot express.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.metadata.width <= 0.0 || self.metadata.height <= 0.0 {
            return Err(LevelError::InvalidDimensions {
                width: self.metadata.width,
                height: self.metadata.height,
            });
        }
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        for (i, platform) in self.platforms.iter().enumerate() {
            if platform.width <= 0.0 || platform.height <= 0.0 {
                return Err(LevelError::DegeneratePlatform(i));
            }
        }
        Ok(())
    }
}
