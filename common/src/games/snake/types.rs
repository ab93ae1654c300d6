use serde::{Deserialize, Serialize};

/// One grid coordinate. Signed so that a head stepping off the left or top edge is representable
/// and can be rejected by the bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn neighbor(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    /// Unit step with y growing downwards.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    Food,
    PowerUp,
    Poison,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Right.is_opposite(&Direction::Right));
    }

    #[test]
    fn test_neighbor_moves_one_unit() {
        let origin = Cell::new(10, 10);
        assert_eq!(origin.neighbor(Direction::Up), Cell::new(10, 9));
        assert_eq!(origin.neighbor(Direction::Down), Cell::new(10, 11));
        assert_eq!(origin.neighbor(Direction::Left), Cell::new(9, 10));
        assert_eq!(origin.neighbor(Direction::Right), Cell::new(11, 10));
    }

    #[test]
    fn test_neighbor_can_leave_the_grid() {
        assert_eq!(Cell::new(0, 0).neighbor(Direction::Left), Cell::new(-1, 0));
    }
}
