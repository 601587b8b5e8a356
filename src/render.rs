use anyhow::Result;

use crate::grid::Position;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellStyle {
    Food,
    Head,
    Body,
}

/// Drawing surface for one frame. Cells arrive in grid coordinates; mapping
/// them to the screen is up to the implementation.
pub trait Renderer {
    fn draw_background(&mut self) -> Result<()>;

    fn draw_cell(&mut self, pos: Position, style: CellStyle) -> Result<()>;

    /// Shows `score` and hands it back.
    fn set_score(&mut self, score: u32) -> Result<u32>;

    fn present(&mut self) -> Result<()>;
}
