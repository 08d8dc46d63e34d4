//! Maze layouts and the strategies that generate them
//!
//! A maze is stored in exactly one of two shapes: per-cell wall flags for
//! corridor mazes, where walls sit on the edges between cells, or a set of
//! blocked cells for chamber and obstacle mazes. `Maze::Open` is the empty
//! board.

use std::collections::HashSet;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::direction::Direction;
use super::state::{Position, Snake};
use crate::error::GameError;

/// Number of cells ahead of the head kept free of walls
pub const SAFE_ZONE_AHEAD: i32 = 3;
/// Chebyshev radius cleared around every snake segment
pub const SAFE_ZONE_RADIUS: i32 = 1;

/// Wall flags of a single corridor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWalls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl CellWalls {
    pub fn closed() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    fn open(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.top = false,
            Direction::Right => self.right = false,
            Direction::Down => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }

    /// Walled in on all four sides
    pub fn is_isolated(&self) -> bool {
        self.top && self.right && self.bottom && self.left
    }
}

/// Square grid of corridor cells, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorGrid {
    size: usize,
    cells: Vec<CellWalls>,
}

impl CorridorGrid {
    /// Grid with every wall standing
    pub fn closed(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellWalls::closed(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.in_bounds(self.size) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, pos: Position) -> Option<&CellWalls> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Cells outside the grid count as walled
    pub fn has_wall(&self, pos: Position, direction: Direction) -> bool {
        self.cell(pos).map_or(true, |c| c.has_wall(direction))
    }

    /// Remove the wall on `direction` side of `pos`, and the matching wall of
    /// the neighbour when it exists
    pub fn open_wall(&mut self, pos: Position, direction: Direction) {
        if let Some(i) = self.index(pos) {
            self.cells[i].open(direction);
        }
        if let Some(j) = self.index(pos.moved_in_direction(direction)) {
            self.cells[j].open(direction.opposite());
        }
    }

    /// True when moving between the two cells crosses a standing wall.
    /// Non-adjacent moves are always blocked.
    pub fn blocks_move(&self, from: Position, to: Position) -> bool {
        match Direction::from_delta(to.x - from.x, to.y - from.y) {
            Ok(direction) => self.has_wall(from, direction),
            Err(_) => true,
        }
    }

    pub fn is_isolated(&self, pos: Position) -> bool {
        self.cell(pos).map_or(false, CellWalls::is_isolated)
    }

    /// Number of open edges between in-grid neighbours
    pub fn open_edge_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                let pos = Position::new(x, y);
                if x + 1 < self.size as i32 && !self.has_wall(pos, Direction::Right) {
                    count += 1;
                }
                if y + 1 < self.size as i32 && !self.has_wall(pos, Direction::Down) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Randomized depth-first carve that visits every cell once
    pub fn carve_spanning_tree(&mut self, rng: &mut dyn RngCore) {
        if self.size == 0 {
            return;
        }

        let mut visited = vec![false; self.size * self.size];
        let start = random_cell(self.size, rng);
        if let Some(i) = self.index(start) {
            visited[i] = true;
        }
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let unvisited: Vec<(Direction, Position)> = Direction::ALL
                .iter()
                .map(|&d| (d, current.moved_in_direction(d)))
                .filter(|(_, next)| self.index(*next).map_or(false, |i| !visited[i]))
                .collect();

            match unvisited.choose(rng) {
                Some(&(direction, next)) => {
                    self.open_wall(current, direction);
                    if let Some(i) = self.index(next) {
                        visited[i] = true;
                    }
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Open an axis-aligned path: along x first, then along y
    pub fn carve_path(&mut self, start: Position, end: Position) {
        if !start.in_bounds(self.size) || !end.in_bounds(self.size) {
            return;
        }

        let mut current = start;
        while current != end {
            let direction = if current.x < end.x {
                Direction::Right
            } else if current.x > end.x {
                Direction::Left
            } else if current.y < end.y {
                Direction::Down
            } else {
                Direction::Up
            };
            self.open_wall(current, direction);
            current = current.moved_in_direction(direction);
        }
    }
}

/// Wall layout of a game
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Maze {
    #[default]
    Open,
    Corridor(CorridorGrid),
    Blocked(HashSet<Position>),
}

impl Maze {
    /// True for cells that can never be entered
    pub fn is_blocked(&self, pos: Position) -> bool {
        match self {
            Maze::Blocked(walls) => walls.contains(&pos),
            Maze::Open | Maze::Corridor(_) => false,
        }
    }

    /// True when a step from `from` to `to` runs into a wall
    pub fn blocks_move(&self, from: Position, to: Position) -> bool {
        match self {
            Maze::Open => false,
            Maze::Corridor(grid) => grid.blocks_move(from, to),
            Maze::Blocked(walls) => walls.contains(&to),
        }
    }

    /// Corridor cells closed on every side cannot be reached
    pub fn is_isolated(&self, pos: Position) -> bool {
        match self {
            Maze::Corridor(grid) => grid.is_isolated(pos),
            Maze::Open | Maze::Blocked(_) => false,
        }
    }

    /// Cells taken by walls, empty unless the maze is a blocked set
    pub fn blocked_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let walls = match self {
            Maze::Blocked(walls) => Some(walls.iter().copied()),
            Maze::Open | Maze::Corridor(_) => None,
        };
        walls.into_iter().flatten()
    }

    pub fn blocked_count(&self) -> usize {
        match self {
            Maze::Blocked(walls) => walls.len(),
            Maze::Open | Maze::Corridor(_) => 0,
        }
    }

    /// Clear walls around the snake and in front of its head
    pub fn clear_safe_zone(&mut self, snake: &Snake) {
        let head = snake.head();
        let (dx, dy) = snake.direction.delta();

        match self {
            Maze::Open => {}
            Maze::Blocked(walls) => {
                let ahead: Vec<Position> = (1..=SAFE_ZONE_AHEAD)
                    .map(|i| head.moved_by(dx * i, dy * i))
                    .collect();
                let before = walls.len();
                walls.retain(|wall| {
                    let near_body = snake
                        .body
                        .iter()
                        .any(|segment| segment.chebyshev_distance(*wall) <= SAFE_ZONE_RADIUS);
                    !near_body && !ahead.contains(wall)
                });
                debug!("Safe zone cleared {} walls", before - walls.len());
            }
            Maze::Corridor(grid) => {
                let mut current = head;
                for _ in 0..SAFE_ZONE_AHEAD {
                    let next = current.moved_in_direction(snake.direction);
                    if !next.in_bounds(grid.size()) {
                        break;
                    }
                    grid.open_wall(current, snake.direction);
                    current = next;
                }
            }
        }
    }
}

fn random_cell(size: usize, rng: &mut dyn RngCore) -> Position {
    Position::new(
        rng.gen_range(0..size) as i32,
        rng.gen_range(0..size) as i32,
    )
}

/// A way of laying out walls on a square grid
pub trait MazeStrategy {
    fn generate(&self, grid_size: usize, rng: &mut dyn RngCore) -> Maze;
}

/// Empty board
pub struct NoMaze;

impl MazeStrategy for NoMaze {
    fn generate(&self, _grid_size: usize, _rng: &mut dyn RngCore) -> Maze {
        Maze::Open
    }
}

/// Depth-first corridor maze with a carved path from the centre
pub struct CorridorStrategy;

impl MazeStrategy for CorridorStrategy {
    fn generate(&self, grid_size: usize, rng: &mut dyn RngCore) -> Maze {
        let mut grid = CorridorGrid::closed(grid_size);
        if grid_size == 0 {
            return Maze::Corridor(grid);
        }

        grid.carve_spanning_tree(rng);

        let center = Position::new((grid_size / 2) as i32, (grid_size / 2) as i32);
        let target = random_cell(grid_size, rng);
        grid.carve_path(center, target);
        debug!(
            "Corridor maze generated: {} open edges, path to ({}, {})",
            grid.open_edge_count(),
            target.x,
            target.y
        );

        Maze::Corridor(grid)
    }
}

/// Recursive division into chambers joined by single-cell passages
pub struct DivisionStrategy {
    pub max_depth: usize,
    pub min_chamber: i32,
}

impl Default for DivisionStrategy {
    fn default() -> Self {
        Self {
            max_depth: 5,
            min_chamber: 3,
        }
    }
}

impl DivisionStrategy {
    #[allow(clippy::too_many_arguments)]
    fn divide(
        &self,
        walls: &mut HashSet<Position>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        depth: usize,
        rng: &mut dyn RngCore,
    ) {
        if width < self.min_chamber || height < self.min_chamber || depth > self.max_depth {
            return;
        }

        // Cut across the longer side
        let horizontal = if width < height {
            true
        } else if height < width {
            false
        } else {
            rng.gen_bool(0.5)
        };

        if horizontal {
            let wall_y = rng.gen_range(0..height - 2) + y + 1;
            let passage_x = rng.gen_range(0..width) + x;
            walls.extend(
                (x..x + width)
                    .filter(|&wx| wx != passage_x)
                    .map(|wx| Position::new(wx, wall_y)),
            );

            self.divide(walls, x, y, width, wall_y - y, depth + 1, rng);
            self.divide(
                walls,
                x,
                wall_y + 1,
                width,
                height - (wall_y - y + 1),
                depth + 1,
                rng,
            );
        } else {
            let wall_x = rng.gen_range(0..width - 2) + x + 1;
            let passage_y = rng.gen_range(0..height) + y;
            walls.extend(
                (y..y + height)
                    .filter(|&wy| wy != passage_y)
                    .map(|wy| Position::new(wall_x, wy)),
            );

            self.divide(walls, x, y, wall_x - x, height, depth + 1, rng);
            self.divide(
                walls,
                wall_x + 1,
                y,
                width - (wall_x - x + 1),
                height,
                depth + 1,
                rng,
            );
        }
    }
}

impl MazeStrategy for DivisionStrategy {
    fn generate(&self, grid_size: usize, rng: &mut dyn RngCore) -> Maze {
        let mut walls = HashSet::new();
        let inner = grid_size as i32 - 2;
        self.divide(&mut walls, 1, 1, inner, inner, 0, rng);
        debug!("Division maze generated with {} walls", walls.len());
        Maze::Blocked(walls)
    }
}

/// Randomly scattered obstacles that keep the border and the centre clear
pub struct ScatterStrategy {
    pub density: f64,
}

impl Default for ScatterStrategy {
    fn default() -> Self {
        Self { density: 0.2 }
    }
}

impl MazeStrategy for ScatterStrategy {
    fn generate(&self, grid_size: usize, rng: &mut dyn RngCore) -> Maze {
        let mut walls = HashSet::new();
        if grid_size < 3 {
            return Maze::Blocked(walls);
        }

        let size = grid_size as i32;
        let center = size / 2;
        let buffer = size / 5;

        for y in 0..size {
            for x in 0..size {
                let in_center = (x - center).abs() <= buffer && (y - center).abs() <= buffer;
                let on_border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
                if !in_center && !on_border && rng.gen_bool(self.density) {
                    walls.insert(Position::new(x, y));
                }
            }
        }

        // Punch holes so fewer pockets are sealed off
        for _ in 0..grid_size * 2 {
            let x = rng.gen_range(0..size - 2) + 1;
            let y = rng.gen_range(0..size - 2) + 1;
            walls.remove(&Position::new(x, y));
        }

        debug!("Scatter maze generated with {} walls", walls.len());
        Maze::Blocked(walls)
    }
}

/// Maze strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeKind {
    None,
    Corridor,
    #[default]
    Division,
    Scatter,
}

impl MazeKind {
    pub fn strategy(&self) -> Box<dyn MazeStrategy> {
        match self {
            MazeKind::None => Box::new(NoMaze),
            MazeKind::Corridor => Box::new(CorridorStrategy),
            MazeKind::Division => Box::new(DivisionStrategy::default()),
            MazeKind::Scatter => Box::new(ScatterStrategy::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MazeKind::None => "none",
            MazeKind::Corridor => "corridor",
            MazeKind::Division => "division",
            MazeKind::Scatter => "scatter",
        }
    }
}

impl FromStr for MazeKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(MazeKind::None),
            "corridor" | "dfs" => Ok(MazeKind::Corridor),
            "division" | "recursive-division" => Ok(MazeKind::Division),
            "scatter" | "random" => Ok(MazeKind::Scatter),
            other => Err(GameError::InvalidConfig(format!(
                "unknown maze strategy '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for MazeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_border(pos: Position, size: usize) -> bool {
        let last = size as i32 - 1;
        pos.x == 0 || pos.y == 0 || pos.x == last || pos.y == last
    }

    #[test]
    fn test_open_wall_is_symmetric() {
        let mut grid = CorridorGrid::closed(3);
        grid.open_wall(Position::new(1, 1), Direction::Right);

        assert!(!grid.has_wall(Position::new(1, 1), Direction::Right));
        assert!(!grid.has_wall(Position::new(2, 1), Direction::Left));
        assert!(grid.has_wall(Position::new(1, 1), Direction::Up));
    }

    #[test]
    fn test_corridor_blocks_move() {
        let mut grid = CorridorGrid::closed(3);
        grid.open_wall(Position::new(0, 0), Direction::Down);

        assert!(!grid.blocks_move(Position::new(0, 0), Position::new(0, 1)));
        assert!(!grid.blocks_move(Position::new(0, 1), Position::new(0, 0)));
        assert!(grid.blocks_move(Position::new(0, 0), Position::new(1, 0)));
        assert!(grid.blocks_move(Position::new(0, 0), Position::new(1, 1)));
    }

    #[test]
    fn test_spanning_tree_visits_every_cell() {
        let mut rng = rand::thread_rng();
        for size in [1, 2, 5, 20] {
            let mut grid = CorridorGrid::closed(size);
            grid.carve_spanning_tree(&mut rng);

            // A spanning tree over n cells has n - 1 edges
            assert_eq!(grid.open_edge_count(), size * size - 1);
            if size > 1 {
                for y in 0..size as i32 {
                    for x in 0..size as i32 {
                        assert!(!grid.is_isolated(Position::new(x, y)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_carve_path_opens_route() {
        let mut grid = CorridorGrid::closed(5);
        let start = Position::new(2, 2);
        let end = Position::new(4, 0);
        grid.carve_path(start, end);

        assert!(!grid.has_wall(Position::new(2, 2), Direction::Right));
        assert!(!grid.has_wall(Position::new(3, 2), Direction::Right));
        assert!(!grid.has_wall(Position::new(4, 2), Direction::Up));
        assert!(!grid.has_wall(Position::new(4, 1), Direction::Up));
        assert_eq!(grid.open_edge_count(), 4);
    }

    #[test]
    fn test_corridor_strategy_shape() {
        let maze = CorridorStrategy.generate(20, &mut rand::thread_rng());
        match maze {
            Maze::Corridor(grid) => {
                assert_eq!(grid.size(), 20);
                assert!(grid.open_edge_count() >= 399);
            }
            other => panic!("expected corridor maze, got {:?}", other),
        }
    }

    #[test]
    fn test_division_keeps_border_clear() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let maze = DivisionStrategy::default().generate(20, &mut rng);
            let Maze::Blocked(walls) = &maze else {
                panic!("expected blocked maze");
            };
            assert!(!walls.is_empty());
            for wall in walls {
                assert!(wall.in_bounds(20));
                assert!(!on_border(*wall, 20));
            }
        }
    }

    #[test]
    fn test_division_small_grid_is_empty() {
        let mut rng = rand::thread_rng();
        for size in [0, 1, 2, 3, 4] {
            let maze = DivisionStrategy::default().generate(size, &mut rng);
            assert_eq!(maze.blocked_count(), 0);
        }
    }

    #[test]
    fn test_scatter_keeps_center_and_border_clear() {
        let mut rng = rand::thread_rng();
        let maze = ScatterStrategy { density: 1.0 }.generate(20, &mut rng);
        let Maze::Blocked(walls) = &maze else {
            panic!("expected blocked maze");
        };
        assert!(!walls.is_empty());
        for wall in walls {
            assert!(!on_border(*wall, 20));
            assert!(wall.chebyshev_distance(Position::new(10, 10)) > 4);
        }
    }

    #[test]
    fn test_safe_zone_blocked() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        let all: HashSet<Position> = (0..20)
            .flat_map(|y| (0..20).map(move |x| Position::new(x, y)))
            .collect();
        let mut maze = Maze::Blocked(all);

        maze.clear_safe_zone(&snake);

        for segment in &snake.body {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    assert!(!maze.is_blocked(segment.moved_by(dx, dy)));
                }
            }
        }
        for i in 1..=3 {
            assert!(!maze.is_blocked(Position::new(10 + i, 10)));
        }
        assert!(maze.is_blocked(Position::new(14, 10)));
        assert!(maze.is_blocked(Position::new(10, 12)));
    }

    #[test]
    fn test_safe_zone_corridor() {
        let snake = Snake::new(Position::new(2, 2), Direction::Right, 3);
        let mut maze = Maze::Corridor(CorridorGrid::closed(5));

        maze.clear_safe_zone(&snake);

        assert!(!maze.blocks_move(Position::new(2, 2), Position::new(3, 2)));
        assert!(!maze.blocks_move(Position::new(3, 2), Position::new(4, 2)));
        assert!(maze.blocks_move(Position::new(2, 2), Position::new(2, 1)));
    }

    #[test]
    fn test_maze_queries() {
        let walls: HashSet<Position> = [Position::new(3, 3)].into_iter().collect();
        let maze = Maze::Blocked(walls);
        assert!(maze.is_blocked(Position::new(3, 3)));
        assert!(maze.blocks_move(Position::new(2, 3), Position::new(3, 3)));
        assert!(!maze.blocks_move(Position::new(3, 3), Position::new(4, 3)));
        assert!(!maze.is_isolated(Position::new(3, 3)));

        assert!(!Maze::Open.blocks_move(Position::new(0, 0), Position::new(1, 0)));
        assert!(Maze::Corridor(CorridorGrid::closed(2)).is_isolated(Position::new(0, 0)));
        assert_eq!(maze.blocked_cells().collect::<Vec<_>>(), vec![Position::new(3, 3)]);
        assert_eq!(Maze::Open.blocked_cells().count(), 0);
    }

    #[test]
    fn test_maze_kind_parse() {
        assert_eq!("corridor".parse::<MazeKind>(), Ok(MazeKind::Corridor));
        assert_eq!("recursive-division".parse::<MazeKind>(), Ok(MazeKind::Division));
        assert_eq!("None".parse::<MazeKind>(), Ok(MazeKind::None));
        assert!("labyrinth".parse::<MazeKind>().is_err());
        assert_eq!(MazeKind::default(), MazeKind::Division);
        assert_eq!(MazeKind::None.strategy().generate(20, &mut rand::thread_rng()), Maze::Open);
    }
}
