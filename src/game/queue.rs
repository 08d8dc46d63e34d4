use std::collections::VecDeque;

use super::direction::Direction;

/// Inputs beyond this many are dropped until the engine catches up
pub const MAX_QUEUED_INPUTS: usize = 8;

/// Direction intents buffered between ticks.
///
/// Repeated presses of the same key collapse into one entry. Reversals are
/// not filtered here; the engine checks them against the snake's direction
/// when it consumes an entry, one per tick.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a direction. Returns false if it repeated the last entry or the
    /// queue was full.
    pub fn push(&mut self, direction: Direction) -> bool {
        if self.pending.back() == Some(&direction) {
            return false;
        }
        if self.pending.len() >= MAX_QUEUED_INPUTS {
            return false;
        }
        self.pending.push_back(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
