use std::collections::HashSet;

use rand::RngCore;
use rand::rngs::ThreadRng;
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    events::GameObserver,
    food,
    maze::Maze,
    queue::InputQueue,
    state::{GameOverReason, GamePhase, GameState, Position, Snake},
};
use crate::error::GameResult;

/// What a single call to [`GameEngine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over, nothing moved
    Skipped,
    /// A queued restart replaced the game
    Restarted,
    /// The snake advanced one cell
    Moved { ate_food: bool },
    /// The snake crashed and the game is over
    Collided(GameOverReason),
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Collided(_))
    }
}

/// Owns one game and advances it one tick at a time
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    input: InputQueue,
    restart_requested: bool,
    observers: Vec<Box<dyn GameObserver>>,
    rng: ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;

        let mut rng = rand::thread_rng();
        let state = Self::build_state(&config, &mut rng);
        info!(
            "New game: grid {}x{}, maze {}",
            config.grid_size, config.grid_size, config.maze
        );

        Ok(Self {
            config,
            state,
            input: InputQueue::new(),
            restart_requested: false,
            observers: Vec::new(),
            rng,
        })
    }

    /// Start from a prepared state instead of a freshly generated one
    pub fn from_state(config: GameConfig, state: GameState) -> GameResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            state,
            input: InputQueue::new(),
            restart_requested: false,
            observers: Vec::new(),
            rng: rand::thread_rng(),
        })
    }

    /// Lay out snake, maze and food for a fresh game
    fn build_state(config: &GameConfig, rng: &mut dyn RngCore) -> GameState {
        let grid_size = config.grid_size;
        let length = config.initial_snake_length;
        let center = (grid_size / 2) as i32;

        // Shift right on tight grids so the tail stays on the board
        let head = Position::new(center.max(length as i32 - 1), center);
        let snake = Snake::new(head, Direction::Right, length);

        let mut maze = config.maze.strategy().generate(grid_size, rng);
        maze.clear_safe_zone(&snake);

        let occupied = occupied_cells(&snake, &maze);
        let food = food::spawn(grid_size, &occupied, &maze, rng);

        GameState::new(snake, food, maze, grid_size)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Register an observer for update, score and game-over notifications
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Buffer a direction for an upcoming tick
    pub fn enqueue_direction(&mut self, direction: Direction) -> bool {
        self.input.push(direction)
    }

    pub fn queued_inputs(&self) -> usize {
        self.input.len()
    }

    /// Restart on the next tick
    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    /// Replace the game with a fresh one right away
    pub fn restart(&mut self) {
        self.state = Self::build_state(&self.config, &mut self.rng);
        self.input.clear();
        self.restart_requested = false;
        info!("Game restarted");

        for observer in self.observers.iter_mut() {
            observer.on_update(&self.state);
        }
    }

    /// Flip between running and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.state.phase = match self.state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        self.state.phase
    }

    pub fn pause(&mut self) {
        if self.state.is_running() {
            self.state.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.is_paused() {
            self.state.phase = GamePhase::Running;
        }
    }

    /// Execute one step of the game
    pub fn tick(&mut self) -> TickOutcome {
        if self.restart_requested {
            self.restart();
            return TickOutcome::Restarted;
        }

        if !self.state.is_running() {
            return TickOutcome::Skipped;
        }

        // One queued input per tick; a rejected one stays pending
        if let Some(direction) = self.input.pop() {
            self.state.pending_direction = Some(direction);
        }
        if let Some(pending) = self.state.pending_direction {
            if !self.state.snake.set_direction(pending) {
                debug!("Ignored reversal to {:?}", pending);
            }
        }

        let previous_head = self.state.snake.head();
        let head = self.state.snake.move_forward();

        let collision = self.check_collision(previous_head, head);

        let mut ate_food = false;
        if collision.is_none() {
            if self.state.food == Some(head) {
                self.state.score += 1;
                self.state.snake.grow();
                ate_food = true;
                debug!("Food eaten at ({}, {}), score {}", head.x, head.y, self.state.score);
                self.respawn_food();
            } else if self.state.food.is_none() {
                self.respawn_food();
            }
        }

        self.state.steps += 1;

        if let Some(reason) = collision {
            self.state.phase = GamePhase::GameOver;
            self.state.game_over_reason = Some(reason);
            info!(
                "Game over ({}) after {} steps, score {}",
                reason, self.state.steps, self.state.score
            );
        }

        for observer in self.observers.iter_mut() {
            observer.on_update(&self.state);
        }
        if ate_food {
            for observer in self.observers.iter_mut() {
                observer.on_score(self.state.score);
            }
        }
        if let Some(reason) = collision {
            for observer in self.observers.iter_mut() {
                observer.on_game_over(self.state.score, reason);
            }
        }

        match collision {
            Some(reason) => TickOutcome::Collided(reason),
            None => TickOutcome::Moved { ate_food },
        }
    }

    /// Bounds first, then maze, then self
    fn check_collision(&self, previous_head: Position, head: Position) -> Option<GameOverReason> {
        if !self.state.is_in_bounds(head) {
            return Some(GameOverReason::Wall);
        }

        if self.state.maze.blocks_move(previous_head, head) {
            return Some(GameOverReason::Maze);
        }

        if self.state.snake.self_collision() {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    fn respawn_food(&mut self) {
        let had_food = self.state.food.is_some();
        let occupied = occupied_cells(&self.state.snake, &self.state.maze);

        self.state.food = match food::spawn_or_err(
            self.state.grid_size,
            &occupied,
            &self.state.maze,
            &mut self.rng,
        ) {
            Ok(pos) => Some(pos),
            Err(e) => {
                if had_food {
                    warn!("{}; continuing without food", e);
                }
                None
            }
        };
    }
}

/// Cells food may not use: every snake segment and every wall
fn occupied_cells(snake: &Snake, maze: &Maze) -> HashSet<Position> {
    snake
        .body
        .iter()
        .copied()
        .chain(maze.blocked_cells())
        .collect()
}
