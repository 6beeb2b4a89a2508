use serde::{Deserialize, Serialize};

use crate::time::format_clock;

/// Storage key the host uses for standalone audio settings.
pub const AUDIO_SETTINGS_KEY: &str = "le-monsters-audio";
/// Storage key the host uses for the save-data blob.
pub const SAVE_DATA_KEY: &str = "le-monsters-save";

/// Music and sound-effect preferences, persisted between sessions.
///
/// Field names match the JSON payloads already in players' storage, so
/// existing saves keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioSettings {
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub music_muted: bool,
    pub sfx_muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.7,
            sfx_volume: 0.8,
            music_muted: false,
            sfx_muted: false,
        }
    }
}

impl AudioSettings {
    /// Parse a stored payload, falling back to defaults when absent or corrupt.
    pub fn load_or_default(raw: Option<&str>) -> AudioSettings {
        let Some(raw) = raw else {
            return AudioSettings::default();
        };
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse audio settings: {e}, using defaults");
                AudioSettings::default()
            },
        }
    }

    pub fn to_json(&self) -> String {
        // Plain structs of primitives cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Returns the new muted state.
    pub fn toggle_music_mute(&mut self) -> bool {
        self.music_muted = !self.music_muted;
        self.music_muted
    }

    /// Returns the new muted state.
    pub fn toggle_sfx_mute(&mut self) -> bool {
        self.sfx_muted = !self.sfx_muted;
        self.sfx_muted
    }

    /// Volume the mixer should actually use for music.
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_muted { 0.0 } else { self.music_volume }
    }

    /// Volume the mixer should actually use for sound effects.
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sfx_muted { 0.0 } else { self.sfx_volume }
    }
}

/// Persistent progress across runs: best completion time, lifetime coin
/// total, and the player's audio preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub best_time: Option<f32>,
    pub total_coins_collected: u32,
    pub audio_settings: AudioSettings,
}

impl SaveData {
    /// Parse a stored payload, falling back to defaults when absent or corrupt.
    pub fn load_or_default(raw: Option<&str>) -> SaveData {
        let Some(raw) = raw else {
            return SaveData::default();
        };
        match serde_json::from_str(raw) {
            Ok(save) => save,
            Err(e) => {
                tracing::warn!("Failed to parse save data: {e}, using defaults");
                SaveData::default()
            },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Merge a finished run into the save. Returns true when the run
    /// set a new best time.
    pub fn record_run(&mut self, completion_time_ms: f32, coins_collected: u32) -> bool {
        self.total_coins_collected += coins_collected;
        let improved = match self.best_time {
            Some(best) => completion_time_ms < best,
            None => true,
        };
        if improved {
            self.best_time = Some(completion_time_ms);
        }
        improved
    }

    /// Best time as an MM:SS string, or a placeholder when no run has
    /// finished yet.
    pub fn formatted_best_time(&self) -> String {
        match self.best_time {
            Some(ms) => format_clock(ms),
            None => "--:--".to_string(),
        }
    }
}
