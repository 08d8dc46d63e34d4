//! Notifications sent by the engine after each tick
//!
//! Within one tick observers always see `on_update` first, then `on_score`
//! if food was eaten, then `on_game_over` if the tick ended the game.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::state::{GameOverReason, GameState};

/// Receives engine notifications. All methods default to no-ops.
pub trait GameObserver {
    fn on_update(&mut self, _state: &GameState) {}

    fn on_score(&mut self, _score: u32) {}

    fn on_game_over(&mut self, _score: u32, _reason: GameOverReason) {}
}

/// Owned form of a notification, for sending across a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Updated { steps: u32, score: u32 },
    ScoreChanged { score: u32 },
    GameOver { score: u32, reason: GameOverReason },
}

/// Forwards notifications as [`GameEvent`]s
pub struct ChannelObserver {
    tx: UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    pub fn new(tx: UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: GameEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("Game event dropped (no receiver): {:?}", e.0);
        }
    }
}

impl GameObserver for ChannelObserver {
    fn on_update(&mut self, state: &GameState) {
        self.send(GameEvent::Updated {
            steps: state.steps,
            score: state.score,
        });
    }

    fn on_score(&mut self, score: u32) {
        self.send(GameEvent::ScoreChanged { score });
    }

    fn on_game_over(&mut self, score: u32, reason: GameOverReason) {
        self.send(GameEvent::GameOver { score, reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::maze::Maze;
    use crate::game::state::{Position, Snake};
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_channel_observer_forwards_events() {
        let (tx, mut rx) = unbounded_channel();
        let mut observer = ChannelObserver::new(tx);
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            None,
            Maze::Open,
            10,
        );
        state.steps = 4;
        state.score = 2;

        observer.on_update(&state);
        observer.on_score(2);
        observer.on_game_over(2, GameOverReason::Maze);

        assert_eq!(rx.try_recv(), Ok(GameEvent::Updated { steps: 4, score: 2 }));
        assert_eq!(rx.try_recv(), Ok(GameEvent::ScoreChanged { score: 2 }));
        assert_eq!(
            rx.try_recv(),
            Ok(GameEvent::GameOver {
                score: 2,
                reason: GameOverReason::Maze
            })
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tx, rx) = unbounded_channel();
        drop(rx);
        let mut observer = ChannelObserver::new(tx);
        observer.on_score(1);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::GameOver {
            score: 3,
            reason: GameOverReason::SelfCollision,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"game_over","score":3,"reason":"self"}"#);
    }
}
