use rand::Rng;

use crate::grid::{Bounds, Position};

/// Picks any cell of the grid. Cells under the snake are fair game.
pub fn generate_food<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Position {
    Position {
        x: rng.gen_range(bounds.min_x..=bounds.max_x),
        y: rng.gen_range(bounds.min_y..=bounds.max_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn always_inside_bounds() {
        let bounds = Bounds::from_viewport(60, 30, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(bounds.contains(generate_food(&bounds, &mut rng)));
        }
    }

    #[test]
    fn reaches_every_cell() {
        let bounds = Bounds::from_viewport(3, 2, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<Position> = (0..500).map(|_| generate_food(&bounds, &mut rng)).collect();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn single_cell_grid() {
        let bounds = Bounds::from_viewport(1, 1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate_food(&bounds, &mut rng), Position::ORIGIN);
    }
}
