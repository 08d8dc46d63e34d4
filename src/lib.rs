//! Maze Snake - a terminal Snake game with generated mazes
//!
//! This library provides:
//! - Core game logic and maze generators (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::{GameError, GameResult};
