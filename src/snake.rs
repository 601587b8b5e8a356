use crate::grid::{Bounds, Position};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Advance {
    Moved { head: Position, ate_food: bool },
    Collided { head: Position },
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
}

impl Snake {
    /// Lays out `size` segments starting at `head` and trailing away from
    /// `direction`, wrapping around the grid edges if needed.
    pub fn new(head: Position, size: usize, direction: Direction, bounds: &Bounds) -> Self {
        let mut body = Vec::with_capacity(size.max(1));
        body.push(head);
        while body.len() < size {
            let last = body[body.len() - 1];
            body.push(next_head(last, direction.opposite(), bounds));
        }

        Snake { body, direction }
    }

    #[cfg(test)]
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body, direction }
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True if `head` lands on any segment but the current head. Checked
    /// against the body as it was before this tick's shift.
    pub fn has_self_collision(&self, head: Position) -> bool {
        self.body[1..].iter().any(|&segment| has_collision(head, segment))
    }

    /// The body after moving: every segment takes the place of the one ahead
    /// of it and `new_head` goes in front.
    pub fn shifted(&self, new_head: Position) -> Vec<Position> {
        let mut next = Vec::with_capacity(self.body.len());
        next.push(new_head);
        next.extend_from_slice(&self.body[..self.body.len() - 1]);
        next
    }

    pub fn advance(&mut self, direction: Direction, bounds: &Bounds, food: Position) -> Advance {
        let head = next_head(self.head(), direction, bounds);

        if self.has_self_collision(head) {
            return Advance::Collided { head };
        }

        self.body = self.shifted(head);
        self.direction = direction;
        Advance::Moved { head, ate_food: has_collision(head, food) }
    }

    /// Duplicates the tail. The copy separates from it on the next move.
    pub fn grow(&mut self) {
        let tail = self.body[self.body.len() - 1];
        self.body.push(tail);
    }
}

/// One step from `head` towards `direction`. Leaving the grid on an axis puts
/// the head on the opposite edge of that axis.
pub fn next_head(head: Position, direction: Direction, bounds: &Bounds) -> Position {
    let (dx, dy) = direction.delta();
    Position {
        x: wrap(head.x + dx, bounds.min_x, bounds.max_x),
        y: wrap(head.y + dy, bounds.min_y, bounds.max_y),
    }
}

pub fn has_collision(a: Position, b: Position) -> bool {
    a == b
}

fn wrap(value: i32, min: i32, max: i32) -> i32 {
    if value > max {
        min
    } else if value < min {
        max
    } else {
        value
    }
}
