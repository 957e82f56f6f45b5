//! Game tuning configuration
//!
//! Every tunable the simulation reads lives here so tests can run a
//! session with a deterministic, explicit setup instead of reaching for
//! globals. Persisted as JSON next to the binary on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;

/// Rejected configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("matrix size must be odd and at least 3, got {0}")]
    InvalidMatrixSize(usize),
    #[error("tiger count must be at least 1, got {0}")]
    InvalidTigerCount(usize),
}

/// Game settings/tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tile edge length in pixels
    pub tile_size: f32,
    /// Matrix window edge in tiles (odd, >= 3)
    pub matrix_size: usize,
    /// World-scroll speed in pixels per tick
    pub move_speed: f32,
    /// Logical tick rate
    pub tick_hz: u32,
    /// How many tigers to request (placement caps at matrix_size^2 - 1)
    pub tiger_count: usize,

    // === Petting bands ===
    /// Multiplier on desired speed above which petting angers the tiger
    pub too_fast_mult: f32,
    /// Multiplier on desired speed below which petting bores the tiger
    pub too_slow_mult: f32,

    // === Petting session ===
    /// Session countdown in ticks
    pub petting_time_ticks: u32,
    /// Rolling speed-sample window length
    pub num_pet_samples: usize,
    /// Integrated boredom budget before the tiger wanders off
    pub yawn_max: f32,
    /// Integrated anger budget before the tiger swats you away
    pub grrr_max: f32,

    // === Screens ===
    /// Dismiss debounce after a message screen appears
    pub message_cooldown_ticks: u32,

    // === Roar warnings ===
    /// Distance at which a tiger starts warning the player
    pub roar_range: f32,
    /// Ticks between roars while the player stays in range
    pub roar_interval_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: consts::TILE_SIZE,
            matrix_size: consts::DEFAULT_MATRIX_SIZE,
            move_speed: consts::MOVE_SPEED,
            tick_hz: consts::TICK_HZ,
            tiger_count: consts::DEFAULT_TIGER_COUNT,

            too_fast_mult: consts::TOO_FAST_MULT,
            too_slow_mult: consts::TOO_SLOW_MULT,

            petting_time_ticks: consts::PETTING_TIME_TICKS,
            num_pet_samples: consts::NUM_PETS,
            yawn_max: consts::YAWN_MAX,
            grrr_max: consts::GRRR_MAX,

            message_cooldown_ticks: consts::MESSAGE_COOLDOWN_TICKS,

            roar_range: consts::ROAR_RANGE,
            roar_interval_ticks: consts::ROAR_INTERVAL_TICKS,
        }
    }
}

impl Config {
    /// Default config with a caller-chosen matrix size (the one startup
    /// knob the original exposes)
    pub fn with_matrix_size(matrix_size: usize) -> Result<Self, ConfigError> {
        let config = Self {
            matrix_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Precondition gate; every constructor taking a Config calls this
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matrix_size < 3 || self.matrix_size % 2 == 0 {
            return Err(ConfigError::InvalidMatrixSize(self.matrix_size));
        }
        if self.tiger_count == 0 {
            return Err(ConfigError::InvalidTigerCount(self.tiger_count));
        }
        Ok(())
    }

    /// Tiles the matrix can host tigers on (all but the center tile)
    pub fn tiger_capacity(&self) -> usize {
        self.matrix_size * self.matrix_size - 1
    }

    /// Config file name (JSON, next to the binary)
    const FILE_NAME: &'static str = "wild_tiger_config.json";

    /// Load config from disk, falling back to defaults
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str::<Self>(&json) {
                Ok(config) if config.validate().is_ok() => {
                    log::info!("Loaded config from {}", Self::FILE_NAME);
                    config
                }
                Ok(config) => {
                    log::warn!("Config on disk is invalid ({:?}), using defaults", config.validate());
                    Self::default()
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", Self::FILE_NAME, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save config to disk (best effort)
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            if let Err(e) = std::fs::write(Self::FILE_NAME, json) {
                log::warn!("Failed to save config: {}", e);
            } else {
                log::info!("Config saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_even_or_tiny_matrix_rejected() {
        assert_eq!(
            Config::with_matrix_size(4).unwrap_err(),
            ConfigError::InvalidMatrixSize(4)
        );
        assert_eq!(
            Config::with_matrix_size(1).unwrap_err(),
            ConfigError::InvalidMatrixSize(1)
        );
        assert!(Config::with_matrix_size(3).is_ok());
    }

    #[test]
    fn test_tiger_capacity_excludes_center() {
        let config = Config::with_matrix_size(5).unwrap();
        assert_eq!(config.tiger_capacity(), 24);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.matrix_size, config.matrix_size);
        assert_eq!(back.petting_time_ticks, config.petting_time_ticks);
    }
}
