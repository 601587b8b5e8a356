use rand::{rngs::ThreadRng, Rng};

use crate::food::generate_food;
use crate::grid::{Bounds, Position};
use crate::input::InputHandler;
use crate::snake::{Advance, Direction, Snake};

pub const INITIAL_DIRECTION: Direction = Direction::Left;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Over,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Collided,
    /// The game had already ended; nothing changed.
    Halted,
}

/// Everything a game session mutates. Once `Over`, it stays over: a new game
/// means a new `GameState`.
pub struct GameState<R = ThreadRng> {
    rng: R,
    bounds: Bounds,
    snake: Snake,
    food: Position,
    input: InputHandler,
    score: u32,
    phase: Phase,
}

impl GameState<ThreadRng> {
    pub fn new(bounds: Bounds, initial_length: usize) -> Self {
        GameState::with_rng(bounds, initial_length, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(bounds: Bounds, initial_length: usize, mut rng: R) -> Self {
        let snake = Snake::new(Position::ORIGIN, initial_length, INITIAL_DIRECTION, &bounds);
        let food = generate_food(&bounds, &mut rng);

        GameState {
            rng,
            bounds,
            snake,
            food,
            input: InputHandler::new(),
            score: 0,
            phase: Phase::Running,
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.input.pending()
    }

    /// Queues a turn for the next tick. Reversals and input after game over
    /// are dropped.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase == Phase::Over {
            return false;
        }
        self.input.request(direction, self.snake.direction())
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == Phase::Over {
            return TickOutcome::Halted;
        }

        let direction = self.input.take().unwrap_or_else(|| self.snake.direction());

        match self.snake.advance(direction, &self.bounds, self.food) {
            Advance::Collided { .. } => {
                self.phase = Phase::Over;
                TickOutcome::Collided
            }
            Advance::Moved { ate_food: true, .. } => {
                self.score += 1;
                self.snake.grow();
                self.food = generate_food(&self.bounds, &mut self.rng);
                TickOutcome::Ate
            }
            Advance::Moved { ate_food: false, .. } => TickOutcome::Moved,
        }
    }

    #[cfg(test)]
    pub fn place(&mut self, snake: Snake, food: Position) {
        self.snake = snake;
        self.food = food;
    }
}
