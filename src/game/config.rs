use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::maze::MazeKind;
use crate::error::GameError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square grid
    pub grid_size: usize,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Maze generator used for each new game
    pub maze: MazeKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tick_interval_ms: 150,
            initial_snake_length: 3,
            maze: MazeKind::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    pub fn with_maze(mut self, maze: MazeKind) -> Self {
        self.maze = maze;
        self
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check the parameters before a game is built from them
    pub fn validate(&self) -> Result<(), GameError> {
        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial snake length must be at least 1".to_string(),
            ));
        }
        if self.grid_size < self.initial_snake_length + 1 {
            return Err(GameError::InvalidConfig(format!(
                "grid size {} is too small for a snake of length {}",
                self.grid_size, self.initial_snake_length
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.tick_interval_ms, 150);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.maze, MazeKind::Division);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15).with_maze(MazeKind::Corridor);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.maze, MazeKind::Corridor);
    }

    #[test]
    fn test_validation() {
        assert!(GameConfig::new(4).validate().is_ok());
        assert!(matches!(
            GameConfig::new(3).validate(),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(GameConfig::new(0).validate().is_err());

        let config = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "grid_size": 30, "maze": "corridor" }"#).unwrap();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.maze, MazeKind::Corridor);
        assert_eq!(config.tick_interval_ms, 150);
        assert_eq!(config.initial_snake_length, 3);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("maze_snake_config_{}.json", std::process::id()));
        let config = GameConfig::new(12).with_maze(MazeKind::Scatter);
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);

        assert!(GameConfig::load(Path::new("/nonexistent/maze_snake.json")).is_err());
    }
}
