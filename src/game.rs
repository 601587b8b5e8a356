use std::time::{Duration, Instant};

use crate::config::Config;
use crate::input::Command;
use crate::render::{CellStyle, Renderer};
use crate::state::{GameState, TickOutcome};
use crate::term::TermManager;
use crate::ticker::Ticker;

use anyhow::Result;
use crossterm::event::KeyEvent;
use log::{debug, info, trace};
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    PlayAgain,
    Quit,
}

pub struct SnakeGame {
    config: Config,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        let term = TermManager::new()?;
        Ok(SnakeGame { config, paused: false, term })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;

        let (cols, rows) = self.term.get_terminal_size();
        self.config = self.config.fit_to_terminal(cols, rows);
        self.config.validate()?;

        let bounds = self.config.bounds()?;
        info!(
            "Terminal {}x{}, grid {}x{} ({:?}), tick every {:?}",
            cols, rows, bounds.columns(), bounds.rows(), bounds, self.config.tick_interval
        );
        Ok(())
    }

    /// Returns false if the player quit from the intro screen.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;
        let quit = is_quit(&self.term.read_key_blocking()?);
        self.term.hide_message()?;
        Ok(!quit)
    }

    pub fn play(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.term.hide_message()?;
        self.paused = false;

        let bounds = self.config.bounds()?;
        self.term.set_grid(bounds)?;

        let mut state = GameState::new(bounds, self.config.initial_length);
        let mut ticker = Ticker::start(self.config.tick_interval, Instant::now());
        info!("New game, food at {:?}", state.food());

        self.term.set_score(state.score())?;
        draw_snake(&state, &mut self.term)?;
        self.term.present()?;

        while !ticker.is_cancelled() {
            let wait = input_wait(&ticker, self.paused, Instant::now());

            for key_ev in self.term.read_key_events(wait)? {
                match Command::from_key_event(&key_ev) {
                    Some(Command::Quit) => return Ok(Flow::Quit),
                    Some(Command::Pause) => self.toggle_pause(&mut ticker)?,
                    Some(Command::Steer(dir)) if !self.paused => {
                        state.steer(dir);
                    }
                    _ => {}
                }
            }

            if self.paused || !ticker.fire(Instant::now()) {
                continue;
            }

            if step(&mut state, &mut self.term)? == TickOutcome::Collided {
                ticker.cancel();
            }
        }

        self.game_over(state.score())?;

        // Quit if the user asks to after the game
        if is_quit(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }
        Ok(Flow::PlayAgain)
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, score: u32) -> Result<()> {
        info!("Game over, score {}", score);

        self.term.show_message(&[
            "Game over!",
            &*format!("Score: {}", score),
            "",
            "Press any key to play again,",
            "or Q / CTRL+C to quit."
        ])
    }

    fn toggle_pause(&mut self, ticker: &mut Ticker) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
            ticker.restart(Instant::now());
        }

        self.paused = !self.paused;
        debug!("Paused: {}", self.paused);
        Ok(())
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    Command::from_key_event(ev) == Some(Command::Quit)
}

/// How long to block on input before looking at the ticker again. While
/// paused the deadline is stale, so wait a whole interval instead.
fn input_wait(ticker: &Ticker, paused: bool, now: Instant) -> Duration {
    if paused {
        ticker.interval()
    } else {
        ticker.time_until_due(now).unwrap_or_default()
    }
}

/// Runs one tick and draws the resulting frame: background, food, then the
/// snake. Food is drawn where it was before the tick, so a freshly spawned
/// piece shows up on the next frame.
pub fn step<R: Rng, D: Renderer>(state: &mut GameState<R>, renderer: &mut D) -> Result<TickOutcome> {
    renderer.draw_background()?;
    renderer.draw_cell(state.food(), CellStyle::Food)?;

    let outcome = state.tick();
    trace!("Tick: {:?}, head at {:?}", outcome, state.snake().head());

    if outcome == TickOutcome::Ate {
        debug!("Ate food, score {}, next food at {:?}", state.score(), state.food());
        renderer.set_score(state.score())?;
    }

    draw_snake(state, renderer)?;
    renderer.present()?;
    Ok(outcome)
}

fn draw_snake<R: Rng, D: Renderer>(state: &GameState<R>, renderer: &mut D) -> Result<()> {
    // Tail first so the head stays visible over a freshly grown duplicate.
    for (i, pos) in state.snake().body().iter().enumerate().rev() {
        let style = if i == 0 {CellStyle::Head} else {CellStyle::Body};
        renderer.draw_cell(*pos, style)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Bounds, Position};
    use crate::snake::{Direction::*, Snake};
    use rand::{rngs::StdRng, SeedableRng};

    #[derive(Debug, PartialEq)]
    enum Call {
        Background,
        Cell(Position, CellStyle),
        Score(u32),
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer for Recorder {
        fn draw_background(&mut self) -> Result<()> {
            self.calls.push(Call::Background);
            Ok(())
        }

        fn draw_cell(&mut self, pos: Position, style: CellStyle) -> Result<()> {
            self.calls.push(Call::Cell(pos, style));
            Ok(())
        }

        fn set_score(&mut self, score: u32) -> Result<u32> {
            self.calls.push(Call::Score(score));
            Ok(score)
        }

        fn present(&mut self) -> Result<()> {
            self.calls.push(Call::Present);
            Ok(())
        }
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn paused_wait_ignores_the_stale_deadline() {
        let t0 = Instant::now();
        let interval = Duration::from_millis(100);
        let ticker = Ticker::start(interval, t0);

        for &late in [150u64, 500, 5000].iter() {
            let now = t0 + Duration::from_millis(late);
            assert_eq!(input_wait(&ticker, true, now), interval);
            assert_eq!(input_wait(&ticker, false, now), Duration::from_millis(0));
        }
        assert_eq!(input_wait(&ticker, false, t0 + Duration::from_millis(40)), Duration::from_millis(60));
    }

    #[test]
    fn q_and_ctrl_c_quit_prompts() {
        use crossterm::event::{KeyCode, KeyModifiers};

        let key = |code, modifiers| KeyEvent { code, modifiers };
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
    }

    fn state(snake: Snake, food: Position) -> GameState<StdRng> {
        let bounds = Bounds::from_viewport(600, 600, 15).unwrap();
        let mut state = GameState::with_rng(bounds, 3, StdRng::seed_from_u64(3));
        state.place(snake, food);
        state
    }

    #[test]
    fn frame_draw_order() {
        let mut state = state(Snake::from_segments(vec![p(0, 0), p(1, 0)], Left), p(5, 5));
        let mut rec = Recorder::default();

        assert_eq!(step(&mut state, &mut rec).unwrap(), TickOutcome::Moved);
        assert_eq!(rec.calls, vec![
            Call::Background,
            Call::Cell(p(5, 5), CellStyle::Food),
            Call::Cell(p(0, 0), CellStyle::Body),
            Call::Cell(p(-1, 0), CellStyle::Head),
            Call::Present,
        ]);
    }

    #[test]
    fn score_is_shown_on_eat() {
        let mut state = state(Snake::from_segments(vec![p(0, 0)], Left), p(-1, 0));
        let mut rec = Recorder::default();

        assert_eq!(step(&mut state, &mut rec).unwrap(), TickOutcome::Ate);
        assert!(rec.calls.contains(&Call::Score(1)));
        assert_eq!(state.snake().len(), 2);
    }

    #[test]
    fn collision_still_draws_the_last_frame() {
        let body = vec![p(0, 0), p(0, 1), p(-1, 0)];
        let mut state = state(Snake::from_segments(body, Left), p(5, 5));
        let mut rec = Recorder::default();

        assert_eq!(step(&mut state, &mut rec).unwrap(), TickOutcome::Collided);
        assert_eq!(rec.calls.last(), Some(&Call::Present));
        assert!(rec.calls.contains(&Call::Cell(p(0, 0), CellStyle::Head)));
        assert!(!rec.calls.iter().any(|c| matches!(c, Call::Score(_))));
    }

    #[test]
    fn halted_game_stays_put() {
        let body = vec![p(0, 0), p(0, 1), p(-1, 0)];
        let mut state = state(Snake::from_segments(body, Left), p(5, 5));
        let mut rec = Recorder::default();

        step(&mut state, &mut rec).unwrap();
        rec.calls.clear();
        assert_eq!(step(&mut state, &mut rec).unwrap(), TickOutcome::Halted);
        assert!(rec.calls.contains(&Call::Cell(p(-1, 0), CellStyle::Body)));
    }
}
