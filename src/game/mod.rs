//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A front end drives it by calling [`GameEngine::tick`] on a timer and reading
//! [`GameEngine::state`] to draw.

pub mod config;
pub mod direction;
pub mod engine;
pub mod events;
pub mod food;
pub mod maze;
pub mod queue;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use events::{ChannelObserver, GameEvent, GameObserver};
pub use maze::{CellWalls, CorridorGrid, Maze, MazeKind, MazeStrategy};
pub use queue::InputQueue;
pub use state::{GameOverReason, GamePhase, GameState, Position, Snake};
