use std::{env, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{ensure, Result};
use log::LevelFilter;

use crate::grid::Bounds;
use crate::TermInt;

pub const LOG_LEVEL_VAR: &str = "SNAKE_LOG";

// Every cell is two terminal columns wide so it looks roughly square.
pub const COLUMNS_PER_CELL: TermInt = 2;
// Border on each side plus the score line on top.
const RESERVED_COLUMNS: TermInt = 2;
const RESERVED_ROWS: TermInt = 3;

#[derive(Clone, Debug)]
pub struct Config {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub cell_size: u32,
    pub tick_interval: Duration,
    pub initial_length: usize,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            viewport_width: 600,
            viewport_height: 600,
            cell_size: 15,
            tick_interval: Duration::from_millis(100),
            initial_length: 3,
            log_file: PathBuf::from("snake.log"),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Defaults, with the log level taken from `SNAKE_LOG` when it parses.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Some(level) = env::var(LOG_LEVEL_VAR).ok().and_then(|v| LevelFilter::from_str(&v).ok()) {
            config.log_level = level;
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.initial_length > 0, "initial snake length must be at least 1");
        ensure!(!self.tick_interval.is_zero(), "tick interval must be positive");
        let bounds = self.bounds()?;
        // The starting body lies along x; any longer and it would overlap itself.
        ensure!(
            self.initial_length <= bounds.columns() as usize,
            "initial snake length {} does not fit in {} columns",
            self.initial_length, bounds.columns()
        );
        Ok(())
    }

    pub fn bounds(&self) -> Result<Bounds> {
        Bounds::from_viewport(self.viewport_width, self.viewport_height, self.cell_size)
    }

    /// Shrinks the viewport so the whole grid, its border and the score line
    /// fit in a `cols` x `rows` terminal. Never grows it.
    pub fn fit_to_terminal(&self, cols: TermInt, rows: TermInt) -> Config {
        let max_columns = (cols.saturating_sub(RESERVED_COLUMNS) / COLUMNS_PER_CELL) as u32;
        let max_rows = rows.saturating_sub(RESERVED_ROWS) as u32;

        Config {
            viewport_width: self.viewport_width.min(max_columns * self.cell_size),
            viewport_height: self.viewport_height.min(max_rows * self.cell_size),
            ..self.clone()
        }
    }
}
