use super::types::Direction;

/// Swipes shorter than this (in host pixels) are treated as taps.
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Holds the direction the snake is moving this tick and the one requested for the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputController {
    committed: Direction,
    pending: Direction,
}

impl InputController {
    pub fn new(direction: Direction) -> Self {
        Self {
            committed: direction,
            pending: direction,
        }
    }

    /// Requests are validated against the committed direction only, so two quick turns inside
    /// one tick can never add up to a reversal. Rejected requests are dropped silently.
    pub fn request_direction(&mut self, candidate: Direction) {
        if candidate.is_opposite(&self.committed) {
            return;
        }
        self.pending = candidate;
    }

    /// Makes the pending direction the one used for this tick's movement.
    pub fn commit(&mut self) -> Direction {
        self.committed = self.pending;
        self.committed
    }

    pub fn committed(&self) -> Direction {
        self.committed
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }
}

impl Direction {
    /// Keyboard key names as reported by hosts: arrow keys and WASD.
    pub fn from_key_name(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    /// On-screen button identifiers.
    pub fn from_button(name: &str) -> Option<Direction> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Dominant axis of a drag vector, y pointing down.
    pub fn from_swipe(dx: f32, dy: f32) -> Option<Direction> {
        if !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        if dx.abs().max(dy.abs()) < MIN_SWIPE_DISTANCE {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}
