use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::maze::Maze;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies on a square grid of `grid_size` cells per side
    pub fn in_bounds(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }

    pub fn chebyshev_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Keep the tail on the next move
    pub growing: bool,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            growing: false,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        Self {
            body,
            direction,
            growing: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Change direction unless it would reverse the snake.
    /// Returns whether the change was applied.
    pub fn set_direction(&mut self, next: Direction) -> bool {
        if Direction::is_valid_change(self.direction, next) {
            self.direction = next;
            true
        } else {
            false
        }
    }

    /// Make the next move keep the tail
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Advance one cell in the current direction and return the new head
    pub fn move_forward(&mut self) -> Position {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !self.growing {
            self.body.pop();
        }
        self.growing = false;

        new_head
    }

    /// True if the head overlaps any other segment
    pub fn self_collision(&self) -> bool {
        let head = self.head();
        self.body_segments().contains(&head)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    /// Snake left the grid
    Wall,
    /// Snake ran into a maze wall
    Maze,
    /// Snake hit itself
    #[serde(rename = "self")]
    SelfCollision,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "wall",
            GameOverReason::Maze => "maze",
            GameOverReason::SelfCollision => "self",
        }
    }
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid_size: usize,
    pub snake: Snake,
    /// `None` when the board has no free cell left
    pub food: Option<Position>,
    pub maze: Maze,
    pub score: u32,
    pub steps: u32,
    pub phase: GamePhase,
    /// Last direction taken from the input queue
    pub pending_direction: Option<Direction>,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, maze: Maze, grid_size: usize) -> Self {
        Self {
            grid_size,
            snake,
            food,
            maze,
            score: 0,
            steps: 0,
            phase: GamePhase::Running,
            pending_direction: None,
            game_over_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.grid_size)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_chebyshev_distance() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.chebyshev_distance(pos), 0);
        assert_eq!(pos.chebyshev_distance(Position::new(6, 6)), 1);
        assert_eq!(pos.chebyshev_distance(Position::new(2, 7)), 3);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert!(!snake.growing);
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let head = snake.move_forward();
        assert_eq!(head, Position::new(6, 5));
        assert_eq!(snake.len(), 3);

        snake.grow();
        snake.move_forward();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(!snake.growing);

        // Growth only lasts for one move
        snake.move_forward();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_set_direction_rejects_reversal() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.direction, Direction::Right);

        assert!(snake.set_direction(Direction::Up));
        assert_eq!(snake.direction, Direction::Up);

        assert!(snake.set_direction(Direction::Up));
    }

    #[test]
    fn test_self_collision_ignores_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 1);
        assert!(!snake.self_collision());

        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        assert!(!snake.self_collision());

        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
                Position::new(5, 5),
            ],
            Direction::Up,
        );
        assert!(snake.self_collision());
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Some(Position::new(10, 10)),
            Maze::Open,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
        assert!(state.is_running());
        assert!(state.is_occupied_by_snake(Position::new(4, 5)));
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(GameOverReason::Wall.to_string(), "wall");
        assert_eq!(GameOverReason::Maze.to_string(), "maze");
        assert_eq!(GameOverReason::SelfCollision.to_string(), "self");
    }
}
