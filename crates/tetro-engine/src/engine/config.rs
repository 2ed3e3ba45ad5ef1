use serde::{Deserialize, Serialize};

use crate::{Board, ConfigError, GameMode, GameSeed};

/// Smallest board height a session can start with.
pub const MIN_GRID_HEIGHT: usize = 4;
/// Largest board height a session can start with; Expanse growth stops here.
pub const MAX_GRID_HEIGHT: usize = 52;

/// Parameters of a new game.
///
/// Missing fields deserialize to their defaults, so `{}` is a valid
/// configuration for a standard 10 × 22 game.
///
/// # Example
///
/// ```
/// use tetro_engine::{GameConfig, GameMode};
///
/// let config: GameConfig = serde_json::from_str(r#"{"mode": "Expanse"}"#).unwrap();
/// assert_eq!(config.mode, GameMode::Expanse);
/// assert_eq!(config.grid_height, 22);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Seed of the session's random generator; `None` draws a fresh one.
    pub seed: Option<GameSeed>,
    pub mode: GameMode,
    /// When enabled, gravity keeps accelerating past level 17.
    pub kill_screen: bool,
    /// Best score recorded before this session, for the high score notification.
    pub best_score: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 22,
            seed: None,
            mode: GameMode::Normal,
            kill_screen: true,
            best_score: 0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Board::MIN_WIDTH..=Board::MAX_WIDTH).contains(&self.grid_width) {
            return Err(ConfigError::InvalidWidth {
                width: self.grid_width,
                min: Board::MIN_WIDTH,
                max: Board::MAX_WIDTH,
            });
        }
        if !(MIN_GRID_HEIGHT..=MAX_GRID_HEIGHT).contains(&self.grid_height) {
            return Err(ConfigError::InvalidHeight {
                height: self.grid_height,
                min: MIN_GRID_HEIGHT,
                max: MAX_GRID_HEIGHT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.kill_screen);
    }

    #[test]
    fn test_validate_rejects_out_of_range_sizes() {
        let config = GameConfig {
            grid_width: 4,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWidth { width: 4, min: 5, .. })
        ));

        let config = GameConfig {
            grid_width: 17,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            grid_height: 53,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeight { height: 53, .. }));
        assert_eq!(err.to_string(), "grid height 53 out of range 4..=52");
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig {
            seed: Some(GameSeed::from(1)),
            mode: GameMode::GarbageRemoval,
            ..GameConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"grid_width":10,"grid_height":22,"seed":"00000000000000000000000000000001","mode":"GarbageRemoval","kill_screen":true,"best_score":0}"#
        );
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }
}
