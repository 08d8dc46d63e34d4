use std::time::{Duration, Instant};

use crate::game::{GameEvent, GameOverReason};

/// Per-session statistics shown in the header. Kept in memory only.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub last_reason: Option<GameOverReason>,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            last_reason: None,
            running: true,
        }
    }

    /// Refresh the clock. Frozen once the game is over.
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.last_reason = None;
        self.running = true;
    }

    pub fn on_score(&mut self, score: u32) {
        self.high_score = self.high_score.max(score);
    }

    pub fn on_game_over(&mut self, final_score: u32, reason: GameOverReason) {
        self.games_played += 1;
        self.last_reason = Some(reason);
        self.running = false;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Updated { .. } => {}
            GameEvent::ScoreChanged { score } => self.on_score(score),
            GameEvent::GameOver { score, reason } => self.on_game_over(score, reason),
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
