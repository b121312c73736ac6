use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, EndReason, GameState, GameStatus, Position, Snake},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Status after the step
    pub status: GameStatus,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the game ended, if it ended on this step
    pub end_reason: Option<EndReason>,
}

impl StepResult {
    fn idle(status: GameStatus) -> Self {
        Self {
            status,
            ate_food: false,
            end_reason: None,
        }
    }

    fn ended(reason: EndReason) -> Self {
        Self {
            status: GameStatus::Over,
            ate_food: false,
            end_reason: Some(reason),
        }
    }

    pub fn terminated(&self) -> bool {
        self.end_reason.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration.
    ///
    /// Food placement is seeded from `config.seed` when set.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: one-cell snake on the start cell, score zero
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(Position::new(self.config.start_x, self.config.start_y));
        let direction = self.config.initial_direction;

        match self.place_food(&snake) {
            Some(food) => GameState::new(
                snake,
                direction,
                food,
                self.config.grid_width,
                self.config.grid_height,
            ),
            None => {
                // Nowhere to put food; the game is over before it starts
                let head = snake.head();
                let mut state = GameState::new(
                    snake,
                    direction,
                    head,
                    self.config.grid_width,
                    self.config.grid_height,
                );
                state.status = GameStatus::Over;
                state.end_reason = Some(EndReason::BoardFull);
                state
            }
        }
    }

    /// Execute one tick of the game.
    ///
    /// Paused and finished games are left untouched.
    pub fn advance(&mut self, state: &mut GameState) -> StepResult {
        if state.status != GameStatus::Running {
            return StepResult::idle(state.status);
        }

        state.direction = state.pending_direction;
        let new_head = state.snake.head().moved_in_direction(state.direction);
        state.ticks += 1;

        if let Some(collision) = self.check_collision(state, new_head) {
            return self.finish(state, EndReason::Collision(collision));
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);

        if ate_food {
            state.score += self.config.food_score;
            match self.place_food(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    let mut result = self.finish(state, EndReason::BoardFull);
                    result.ate_food = true;
                    return result;
                }
            }
        }

        StepResult {
            status: state.status,
            ate_food,
            end_reason: None,
        }
    }

    /// Queue a turn for the next tick
    pub fn set_direction(&self, state: &mut GameState, direction: Direction) {
        state.set_direction(direction);
    }

    /// Running -> Paused. Returns whether the status changed.
    pub fn pause(&self, state: &mut GameState) -> bool {
        if state.status == GameStatus::Running {
            state.status = GameStatus::Paused;
            info!(score = state.score, "game paused");
            true
        } else {
            false
        }
    }

    /// Paused -> Running. Returns whether the status changed.
    pub fn resume(&self, state: &mut GameState) -> bool {
        if state.status == GameStatus::Paused {
            state.status = GameStatus::Running;
            info!(score = state.score, "game resumed");
            true
        } else {
            false
        }
    }

    /// Apply a player command to the state
    pub fn apply(&mut self, state: &mut GameState, action: Action) {
        match action {
            Action::Turn(direction) => self.set_direction(state, direction),
            Action::TogglePause => {
                if !self.pause(state) {
                    self.resume(state);
                }
            }
            Action::Start => match state.status {
                GameStatus::Paused => {
                    self.resume(state);
                }
                GameStatus::Over => *state = self.reset(),
                GameStatus::Running => {}
            },
            Action::Reset => {
                info!(score = state.score, "game reset");
                *state = self.reset();
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it only moves out of the way after the check
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn finish(&self, state: &mut GameState, reason: EndReason) -> StepResult {
        state.status = GameStatus::Over;
        state.end_reason = Some(reason);
        info!(score = state.score, ticks = state.ticks, ?reason, "game over");
        StepResult::ended(reason)
    }

    /// Pick a free cell for the food.
    ///
    /// Tries random cells first, then falls back to choosing among all free
    /// cells. `None` means the snake covers the whole grid.
    pub fn place_food(&mut self, snake: &Snake) -> Option<Position> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        if width == 0 || height == 0 {
            return None;
        }

        for _ in 0..self.config.max_food_attempts {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        debug!(
            attempts = self.config.max_food_attempts,
            snake_len = snake.len(),
            "random food placement exhausted, scanning free cells"
        );

        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
