//! Snake on a wrap-around grid, played in the terminal.
//!
//! The simulation (`grid`, `food`, `snake`, `input`, `state`, `ticker`) knows
//! nothing about the screen; `term` is one `render::Renderer` for it and
//! `game` ties them together into the interactive loop.

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;
pub mod state;
pub mod term;
pub mod ticker;

pub type TermInt = u16;
pub type Coords = (u16, u16);
