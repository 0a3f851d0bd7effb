//! Rendering and pacing parameters.
//!
//! Defaults match the classic page: an 8x8 grid of 40px cells at 10 fps.
//! A JSON object under [`storage::SETTINGS_KEY`] may override any subset.

use serde::{Deserialize, Serialize};

use crate::storage;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cell_size: u32,
    pub world_width: u32,
    pub fps: u32,
    pub show_grid: bool,
    pub head_color: String,
    pub body_color: String,
    pub grid_color: String,
    pub reward_glyph: String,
    pub poop_glyph: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 40,
            world_width: 8,
            fps: 10,
            show_grid: true,
            head_color: "#7878db".to_string(),
            body_color: "#000000".to_string(),
            grid_color: "#000000".to_string(),
            reward_glyph: "🍎".to_string(),
            poop_glyph: "💩".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn fps(self) -> u32 {
        match self {
            Speed::Slow => 5,
            Speed::Normal => 10,
            Speed::Fast => 15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
        }
    }

    /// Nearest preset for an arbitrary fps.
    pub fn from_fps(fps: u32) -> Speed {
        Speed::ALL
            .into_iter()
            .min_by_key(|s| s.fps().abs_diff(fps))
            .unwrap_or(Speed::Normal)
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<GameConfig>(raw).map(GameConfig::clamped)
    }

    pub fn clamped(mut self) -> Self {
        self.world_width = self.world_width.clamp(2, 64);
        self.cell_size = self.cell_size.clamp(8, 128);
        self.fps = self.fps.clamp(1, 60);
        self
    }

    pub fn load() -> Self {
        let Some(raw) = storage::get_item(storage::SETTINGS_KEY) else {
            return GameConfig::default();
        };
        GameConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("ignoring stored settings: {}", e);
            GameConfig::default()
        })
    }

    pub fn save(&self) {
        storage::set_json(storage::SETTINGS_KEY, self);
    }
}
