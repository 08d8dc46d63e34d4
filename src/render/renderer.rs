use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CorridorGrid, Direction as Heading, GameOverReason, GameState, Maze, Position};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // Render game grid or game over screen
        if state.is_game_over() {
            let game_over = self.render_game_over(game_area, state, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn cell_span(&self, state: &GameState, pos: Position) -> Span<'static> {
        if pos == state.snake.head() {
            // Snake head - distinct color
            Span::styled(
                "■",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.snake.contains(pos) {
            Span::styled("□", Style::default().fg(Color::Green))
        } else if state.food == Some(pos) {
            Span::styled(
                "O",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else if state.maze.is_blocked(pos) {
            Span::styled("█", Style::default().fg(Color::Gray))
        } else {
            Span::styled(".", Style::default().fg(Color::DarkGray))
        }
    }

    /// One text line per row, two columns per cell
    fn cell_lines(&self, state: &GameState) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for y in 0..state.grid_size as i32 {
            let mut spans = Vec::new();

            for x in 0..state.grid_size as i32 {
                let pos = Position::new(x, y);
                spans.push(self.cell_span(state, pos));

                let gap = if state.maze.is_blocked(pos)
                    && state.maze.is_blocked(pos.moved_in_direction(Heading::Right))
                {
                    Span::styled("█", Style::default().fg(Color::Gray))
                } else {
                    Span::raw(" ")
                };
                spans.push(gap);
            }

            lines.push(Line::from(spans));
        }

        lines
    }

    /// Corridor mazes draw walls on cell edges: each row is followed by a line
    /// holding the bottom walls of its cells
    fn corridor_lines(&self, state: &GameState, grid: &CorridorGrid) -> Vec<Line<'static>> {
        let wall_style = Style::default().fg(Color::Gray);
        let last = state.grid_size as i32 - 1;
        let mut lines = Vec::new();

        for y in 0..state.grid_size as i32 {
            let mut cells = Vec::new();
            let mut floor = Vec::new();

            for x in 0..state.grid_size as i32 {
                let pos = Position::new(x, y);
                cells.push(self.cell_span(state, pos));

                let right = x < last && grid.has_wall(pos, Heading::Right);
                cells.push(Span::styled(if right { "│" } else { " " }, wall_style));

                if y < last {
                    let bottom = grid.has_wall(pos, Heading::Down);
                    floor.push(Span::styled(if bottom { "─" } else { " " }, wall_style));
                    floor.push(Span::styled(if x < last { "┼" } else { " " }, wall_style));
                }
            }

            lines.push(Line::from(cells));
            if y < last {
                lines.push(Line::from(floor));
            }
        }

        lines
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let lines = match &state.maze {
            Maze::Corridor(grid) => self.corridor_lines(state, grid),
            Maze::Open | Maze::Blocked(_) => self.cell_lines(state),
        };

        let title = if state.is_paused() {
            " Snake - PAUSED "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Steps: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.steps.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn reason_text(reason: Option<GameOverReason>) -> &'static str {
        match reason {
            Some(GameOverReason::Wall) => "You hit the edge of the board",
            Some(GameOverReason::Maze) => "You ran into a maze wall",
            Some(GameOverReason::SelfCollision) => "You ran into yourself",
            None => "",
        }
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                Self::reason_text(state.game_over_reason),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
