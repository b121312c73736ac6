use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::game::{Action, GameConfig, GameEngine, GameState, GameStatus};
use crate::input::{ControlPad, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// What the run loop has to do after an input was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Followup {
    Nothing,
    /// The game went back to running; the tick timer starts over
    RestartTicks,
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    pad: ControlPad,
    should_quit: bool,
    /// Ticks left before a finished game resets on its own
    reset_countdown: Option<u32>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pad: ControlPad::default(),
            should_quit: false,
            reset_countdown: None,
        }
    }

    /// Begin with the game paused, waiting for Enter or Space
    pub fn start_paused(mut self) -> Self {
        if self.engine.pause(&mut self.state) {
            self.metrics.on_pause();
        }
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            width = self.engine.config().grid_width,
            height = self.engine.config().grid_height,
            tick_ms = self.engine.config().tick_interval_ms,
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) == Followup::RestartTicks {
                            tick_timer.reset();
                        }
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let mut pad = ControlPad::default();
                    terminal.draw(|frame| {
                        pad = self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                    self.pad = pad;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Followup {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse, &self.pad),
            _ => KeyAction::None,
        };

        self.handle_key_action(action)
    }

    fn handle_key_action(&mut self, action: KeyAction) -> Followup {
        match action {
            KeyAction::GameAction(action) => self.apply_action(action),
            KeyAction::Quit => {
                self.should_quit = true;
                Followup::Nothing
            }
            KeyAction::None => Followup::Nothing,
        }
    }

    fn apply_action(&mut self, action: Action) -> Followup {
        let before = self.state.status;
        self.engine.apply(&mut self.state, action);
        let after = self.state.status;

        let started_over =
            action == Action::Reset || (action == Action::Start && before == GameStatus::Over);
        if started_over {
            self.on_new_game();
            return Followup::RestartTicks;
        }

        match (before, after) {
            (GameStatus::Paused, GameStatus::Running) => {
                self.metrics.on_resume();
                Followup::RestartTicks
            }
            (GameStatus::Running, GameStatus::Paused) => {
                self.metrics.on_pause();
                Followup::Nothing
            }
            _ => Followup::Nothing,
        }
    }

    /// One tick: move the snake, or count down to the automatic reset
    fn update_game(&mut self) {
        if self.state.is_over() {
            match self.reset_countdown {
                Some(left) if left > 1 => self.reset_countdown = Some(left - 1),
                _ => self.reset_game(),
            }
            return;
        }

        let result = self.engine.advance(&mut self.state);

        if result.terminated() {
            self.metrics.on_game_over(self.state.score);
            info!(
                score = self.state.score,
                length = self.state.snake.len(),
                high_score = self.metrics.high_score,
                "final score"
            );
            if self.engine.config().game_over_ticks == 0 {
                self.reset_game();
            } else {
                self.reset_countdown = Some(self.engine.config().game_over_ticks);
            }
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.on_new_game();
    }

    fn on_new_game(&mut self) {
        self.metrics.on_game_start();
        self.reset_countdown = None;
        info!("new game");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
