use std::fs::File;

use anyhow::{Context, Result};
use log::{error, info};
use simplelog::{Config as LogConfig, WriteLogger};

use torus_snake::config::Config;
use torus_snake::game::{Flow, SnakeGame};

fn main() -> Result<()> {
    let config = Config::from_env();

    // The terminal is in raw mode while playing, so logs go to a file
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("Error creating log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, LogConfig::default(), log_file)
        .context("Error initializing logger")?;
    info!("Starting snake");

    let mut game = SnakeGame::new(config)?;
    let res = run(&mut game);

    // Always hand the terminal back, even if the game loop failed
    let restored = game.restore();
    if let Err(e) = &res {
        error!("Game loop failed: {:#}", e);
    }
    info!("Exiting");

    res.and(restored)
}

fn run(game: &mut SnakeGame) -> Result<()> {
    game.initialize()?;
    if !game.show_intro()? {
        return Ok(());
    }

    // The main game loop reports when the player asked to quit
    while game.play()? == Flow::PlayAgain {}
    Ok(())
}
