use anyhow::{ensure, Result};

/// A cell on the grid, in grid units rather than pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// Inclusive cell bounds of the play field.
///
/// The viewport is split into whole cells centred on the origin. With an even
/// number of cells the negative side gets the extra one, so a 40-cell axis
/// spans `-20..=19`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn from_viewport(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        ensure!(cell_size > 0, "cell size must be positive");
        let columns = width / cell_size;
        let rows = height / cell_size;
        ensure!(
            columns > 0 && rows > 0,
            "viewport {}x{} is smaller than a single {}px cell",
            width, height, cell_size
        );

        let (min_x, max_x) = axis(columns);
        let (min_y, max_y) = axis(rows);
        Ok(Bounds { min_x, max_x, min_y, max_y })
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_y..=self.max_y).contains(&pos.y)
    }

    pub fn columns(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    pub fn rows(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }
}

fn axis(cells: u32) -> (i32, i32) {
    let min = -((cells / 2) as i32);
    (min, min + cells as i32 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_viewport_is_centred() {
        let bounds = Bounds::from_viewport(600, 600, 15).unwrap();
        assert_eq!(bounds, Bounds { min_x: -20, max_x: 19, min_y: -20, max_y: 19 });
        assert_eq!(bounds.columns(), 40);
        assert_eq!(bounds.rows(), 40);
    }

    #[test]
    fn partial_cells_are_dropped() {
        let bounds = Bounds::from_viewport(100, 47, 10).unwrap();
        assert_eq!((bounds.min_x, bounds.max_x), (-5, 4));
        assert_eq!((bounds.min_y, bounds.max_y), (-2, 1));
    }

    #[test]
    fn odd_cell_count_is_symmetric() {
        let bounds = Bounds::from_viewport(5, 1, 1).unwrap();
        assert_eq!((bounds.min_x, bounds.max_x), (-2, 2));
        assert_eq!((bounds.min_y, bounds.max_y), (0, 0));
        assert!(bounds.contains(Position::ORIGIN));
    }

    #[test]
    fn rejects_degenerate_viewports() {
        assert!(Bounds::from_viewport(600, 600, 0).is_err());
        assert!(Bounds::from_viewport(10, 600, 15).is_err());
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = Bounds::from_viewport(40, 40, 10).unwrap();
        assert!(bounds.contains(Position::new(-2, -2)));
        assert!(bounds.contains(Position::new(1, 1)));
        assert!(!bounds.contains(Position::new(2, 0)));
        assert!(!bounds.contains(Position::new(0, -3)));
    }
}
