use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Map a unit delta back onto a direction
    pub fn from_delta(dx: i32, dy: i32) -> Result<Self, GameError> {
        match (dx, dy) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            _ => Err(GameError::InvalidDirection { dx, dy }),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        let (ax, ay) = self.delta();
        let (bx, by) = other.delta();
        ax + bx == 0 && ay + by == 0
    }

    /// A change is valid unless it reverses the snake onto itself.
    /// Keeping the current direction is always valid.
    pub fn is_valid_change(current: Direction, next: Direction) -> bool {
        !current.is_opposite(next)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_valid_change_rules() {
        for d in Direction::ALL {
            assert!(!Direction::is_valid_change(d, d.opposite()));
            assert!(Direction::is_valid_change(d, d));
        }
        assert!(Direction::is_valid_change(Direction::Right, Direction::Up));
        assert!(Direction::is_valid_change(Direction::Down, Direction::Left));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_from_delta() {
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            assert_eq!(Direction::from_delta(dx, dy), Ok(d));
        }
        assert_eq!(
            Direction::from_delta(1, 1),
            Err(GameError::InvalidDirection { dx: 1, dy: 1 })
        );
        assert!(Direction::from_delta(0, 0).is_err());
    }
}
