//! Gameplay tuning and asset locations.
//!
//! Every field has a built-in default, `config.json` next to the page may
//! override any subset of them.

use crate::browser;
use serde::Deserialize;

const CONFIG_PATH: &str = "config.json";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub obstacle: ObstacleConfig,
    pub projectile: ProjectileConfig,
    pub rules: RulesConfig,
    pub assets: AssetConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: f64,
    /// max horizontal move per frame
    pub speed: f64,
    /// distance from the bottom of the canvas to the top of the player
    pub bottom_offset: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            size: 50.0,
            speed: 5.0,
            bottom_offset: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub size: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub spawn_interval_ms: i32,
    pub image_count: usize,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        ObstacleConfig {
            size: 60.0,
            min_speed: 2.0,
            max_speed: 5.0,
            spawn_interval_ms: 1000,
            image_count: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub size: f64,
    pub speed: f64,
    pub glyph: String,
    pub font_px: f64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        ProjectileConfig {
            size: 60.0,
            speed: 10.0,
            glyph: "💩".to_string(),
            font_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub shoot_unlock_score: u64,
    pub unlock_message_ms: i32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            shoot_unlock_score: 160,
            unlock_message_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub player_image: String,
    /// `{}` is replaced by the 1-based obstacle index
    pub obstacle_image: String,
    pub fallback_image: String,
    /// obstacles past this index load `fallback_image` when their own image fails
    pub fallback_after: usize,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            player_image: "pixels/dago.png".to_string(),
            obstacle_image: "pixels/obstacle{}.png".to_string(),
            fallback_image: "pixels/obstacle1.png".to_string(),
            fallback_after: 8,
        }
    }
}

impl AssetConfig {
    pub fn obstacle_path(&self, index: usize) -> String {
        self.obstacle_image.replace("{}", &index.to_string())
    }

    pub fn fallback_for(&self, index: usize) -> Option<&str> {
        (index > self.fallback_after).then_some(self.fallback_image.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music: String,
    pub start: String,
    pub shoot: String,
    pub destroy: String,
    pub game_over: String,
    pub unlock: String,
    pub music_volume: f64,
    pub init_delay_ms: i32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            music: "background.mp3".to_string(),
            start: "audio/start.mp3".to_string(),
            shoot: "audio/shoot.mp3".to_string(),
            destroy: "audio/boop.mp3".to_string(),
            game_over: "audio/over.mp3".to_string(),
            unlock: "audio/winkl.mp3".to_string(),
            music_volume: 0.3,
            init_delay_ms: 500,
        }
    }
}

/// Fetch `config.json`, any failure falls back to the defaults
pub async fn load_or_default() -> GameConfig {
    match browser::fetch_json::<GameConfig>(CONFIG_PATH).await {
        Ok(config) => {
            log::info!("Loaded {}", CONFIG_PATH);
            config
        }
        Err(err) => {
            log::warn!("Using default config, {} unavailable : {:#}", CONFIG_PATH, err);
            GameConfig::default()
        }
    }
}
