use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{self, CollisionType, EndReason, GameState, GameStatus, Position};
use crate::input::{ControlPad, PadButton};
use crate::metrics::GameMetrics;

const TITLE: &str = " HIRO Snake ";
const HEAD_COLOR: Color = Color::Rgb(0xFF, 0x69, 0xB4);
const BODY_COLOR: Color = Color::Rgb(0xFF, 0xB6, 0xC1);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame and return where the control pad ended up
    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) -> ControlPad {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Control pad
                Constraint::Length(1), // Key help
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Self::board_area(chunks[1], state);

        if state.status == GameStatus::Over {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(state);
            frame.render_widget(grid, game_area);

            if state.status == GameStatus::Paused {
                let overlay = centered(game_area, 20, 3);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_paused(), overlay);
            }
        }

        let pad = ControlPad::layout(chunks[2]);
        for (button, rect) in pad.buttons() {
            frame.render_widget(self.render_button(*button, state), *rect);
        }

        frame.render_widget(self.render_controls(), chunks[3]);

        pad
    }

    /// Center a bordered board of two columns per cell inside `area`
    fn board_area(area: Rect, state: &GameState) -> Rect {
        let width = (state.grid_width as u16).saturating_mul(2).saturating_add(2);
        let height = (state.grid_height as u16).saturating_add(2);
        centered(area, width, height)
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        head_glyph(state.direction),
                        Style::default().fg(HEAD_COLOR).add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("■ ", Style::default().fg(BODY_COLOR))
                } else if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(HEAD_COLOR))
                .title(TITLE)
                .title_alignment(Alignment::Center),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let (status, status_color) = match state.status {
            GameStatus::Running => ("Running", Color::Green),
            GameStatus::Paused => ("Paused", Color::Yellow),
            GameStatus::Over => ("Over", Color::Red),
        };

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
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled(status, Style::default().fg(status_color)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_paused(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let reason = match state.end_reason {
            Some(EndReason::Collision(CollisionType::Wall)) => "You hit the wall",
            Some(EndReason::Collision(CollisionType::SelfCollision)) => "You bit yourself",
            Some(EndReason::BoardFull) => "The board is full!",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again now", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(TITLE),
        )
    }

    fn render_button(&self, button: PadButton, state: &GameState) -> Paragraph<'_> {
        let label = match button {
            PadButton::Pause if state.status == GameStatus::Paused => "Resume",
            _ => button.label(),
        };

        let color = match button {
            PadButton::Start => Color::Green,
            PadButton::Pause => Color::Yellow,
            PadButton::Reset => Color::Red,
            _ => Color::Cyan,
        };

        Paragraph::new(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: game::Direction) -> &'static str {
    match direction {
        game::Direction::Up => "▲ ",
        game::Direction::Down => "▼ ",
        game::Direction::Left => "◀ ",
        game::Direction::Right => "▶ ",
    }
}

/// A `width` x `height` rect centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction as Heading, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> GameState {
        GameState::new(
            Snake::from_cells(vec![Position::new(10, 10), Position::new(9, 10)]).unwrap(),
            Heading::Right,
            Position::new(20, 5),
            32,
            18,
        )
    }

    fn draw(state: &GameState) -> (String, ControlPad) {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        let mut pad = ControlPad::default();

        terminal
            .draw(|frame| {
                pad = renderer.render(frame, state, &metrics);
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        (text, pad)
    }

    #[test]
    fn test_running_frame_shows_board_and_score() {
        let (text, _) = draw(&state());

        assert!(text.contains("HIRO Snake"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("▶"));
        assert!(text.contains("■"));
        assert!(text.contains("●"));
        assert!(!text.contains("PAUSED"));
        assert!(text.contains("Start"));
        assert!(text.contains("Enter start"));
    }

    #[test]
    fn test_paused_frame_shows_overlay() {
        let mut state = state();
        state.status = GameStatus::Paused;

        let (text, _) = draw(&state);

        assert!(text.contains("PAUSED"));
        assert!(text.contains("Resume"));
    }

    #[test]
    fn test_game_over_frame_shows_final_score() {
        let mut state = state();
        state.score = 40;
        state.status = GameStatus::Over;
        state.end_reason = Some(EndReason::Collision(CollisionType::Wall));

        let (text, _) = draw(&state);

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 40"));
        assert!(text.contains("You hit the wall"));
    }

    #[test]
    fn test_render_reports_pad_inside_frame() {
        let (_, pad) = draw(&state());

        assert_eq!(pad.buttons().len(), PadButton::ALL.len());
        for (_, rect) in pad.buttons() {
            assert!(rect.bottom() <= 29);
        }
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        let rect = centered(area, 30, 30);
        assert_eq!(rect, area);

        let rect = centered(Rect::new(0, 0, 20, 10), 4, 2);
        assert_eq!(rect, Rect::new(8, 4, 4, 2));
    }
}
